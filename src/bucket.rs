//! Priority bucket
//!
//! Unique-membership set backing a single priority tier. Members live in a
//! dense Vec so a uniform random index can be drawn in O(1); a HashMap maps
//! each member to its slot for O(1) contains/remove.

use rand::Rng;
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// The set of elements sharing one priority.
#[derive(Clone)]
pub struct Bucket<T> {
    items: Vec<T>,
    slots: HashMap<T, usize>, // member -> position in `items`
}

impl<T> Bucket<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&T> {
        self.items.get(i)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Members in storage order. The order is arbitrary and changes on removal.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Draw a uniformly random slot over the current members.
    /// Returns None if the bucket is empty.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<usize> {
        if self.items.is_empty() {
            return None;
        }
        Some(rng.random_range(0..self.items.len()))
    }
}

impl<T: Eq + Hash + Clone> Bucket<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            slots: HashMap::new(),
        }
    }

    /// Insert a member. Returns its slot and whether it was newly added;
    /// an existing member is left in place.
    pub fn insert(&mut self, value: T) -> (usize, bool) {
        if let Some(&i) = self.slots.get(&value) {
            return (i, false);
        }
        let i = self.items.len();
        self.slots.insert(value.clone(), i);
        self.items.push(value);
        (i, true)
    }

    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.slots.contains_key(value)
    }

    /// Remove a member by value.
    pub fn remove<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let i = *self.slots.get(value)?;
        self.swap_remove_at(i)
    }

    /// Remove the member at slot `i`, moving the last member into its place.
    pub fn swap_remove_at(&mut self, i: usize) -> Option<T> {
        if i >= self.items.len() {
            return None;
        }
        let value = self.items.swap_remove(i);
        self.slots.remove(&value);
        if let Some(moved) = self.items.get(i) {
            let slot = self.slots.get_mut(moved);
            debug_assert!(slot.is_some(), "bucket member missing from slot map");
            if let Some(slot) = slot {
                *slot = i;
            }
        }
        debug_assert_eq!(self.items.len(), self.slots.len());
        Some(value)
    }
}

impl<T: Eq + Hash + Clone> Default for Bucket<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Bucket<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.items.iter()).finish()
    }
}
