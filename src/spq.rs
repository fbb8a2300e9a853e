//! Shuffled Priority Queue
//!
//! Elements are grouped into buckets by priority. A BTreeMap keyed by
//! priority gives ordered access to the lowest and highest tier; within a
//! tier, every peek or extraction picks a member uniformly at random.
//!
//! Not thread safe. Peeks draw from a RefCell'd RNG, and extraction is a
//! single pick-and-remove on one bucket, so a caller sharing a queue across
//! threads must hold one lock around each whole call.

use crate::bucket::Bucket;
use crate::rng::SeededRng;
use rand::RngCore;
use std::borrow::Borrow;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::Hash;
use tracing::{debug, trace};

/// Priority of a queue member. Lower values come out of `shift`, higher
/// values out of `pop`.
pub type Priority = i64;

/// The priority used by [`ShuffledPriorityQueue::add`] unless configured otherwise.
pub const DEFAULT_PRIORITY: Priority = 0;

/// Construction options for a queue.
#[derive(Clone, Debug)]
pub struct QueueConfig {
    /// Seed for tie-breaking. `None` draws a seed from system entropy.
    pub seed: Option<String>,
    /// Priority assigned by `add`.
    pub default_priority: Priority,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            seed: None,
            default_priority: DEFAULT_PRIORITY,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum End {
    Lowest,
    Highest,
}

/// A priority queue that returns elements sharing a priority in random order.
///
/// An element may sit in at most one bucket per priority; adding it again at
/// the same priority is a no-op. Changing an element's priority is done by
/// `remove` followed by `add_with_priority`.
pub struct ShuffledPriorityQueue<T, R = SeededRng> {
    buckets: BTreeMap<Priority, Bucket<T>>,
    len: usize,
    default_priority: Priority,
    rng: RefCell<R>,
}

impl<T: Eq + Hash + Clone> ShuffledPriorityQueue<T, SeededRng> {
    /// Create an empty queue seeded from system entropy.
    pub fn new() -> Self {
        Self::with_config(QueueConfig::default())
    }

    /// Create an empty queue whose tie-breaking is reproducible from `seed`.
    pub fn with_seed(seed: &str) -> Self {
        Self::with_config(QueueConfig {
            seed: Some(seed.to_string()),
            ..QueueConfig::default()
        })
    }

    pub fn with_config(config: QueueConfig) -> Self {
        let rng = match &config.seed {
            Some(seed) => {
                debug!(seed = %seed, "creating seeded shuffled queue");
                SeededRng::new(seed)
            }
            None => {
                debug!("creating entropy-seeded shuffled queue");
                SeededRng::from_entropy()
            }
        };
        let mut queue = Self::with_rng(rng);
        queue.default_priority = config.default_priority;
        queue
    }
}

impl<T: Eq + Hash + Clone, R: RngCore> ShuffledPriorityQueue<T, R> {
    /// Create an empty queue that breaks ties with the given generator.
    pub fn with_rng(rng: R) -> Self {
        Self {
            buckets: BTreeMap::new(),
            len: 0,
            default_priority: DEFAULT_PRIORITY,
            rng: RefCell::new(rng),
        }
    }

    pub fn default_priority(&self) -> Priority {
        self.default_priority
    }

    /// Add an element at the default priority. Returns the stored element.
    pub fn add(&mut self, value: T) -> &T {
        self.add_with_priority(value, self.default_priority)
    }

    /// Add an element at `priority`. Returns the stored element.
    ///
    /// Adding an element already present at this priority leaves the queue
    /// unchanged.
    pub fn add_with_priority(&mut self, value: T, priority: Priority) -> &T {
        let bucket = self.buckets.entry(priority).or_insert_with(|| {
            trace!(priority, "creating priority bucket");
            Bucket::new()
        });
        let (slot, inserted) = bucket.insert(value);
        if inserted {
            self.len += 1;
        }
        self.debug_check();

        &self.buckets[&priority].as_slice()[slot]
    }

    /// Remove an element, searching from the lowest priority up.
    /// Returns false if the element was not found.
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(priority) = self.find_priority(value) else {
            return false;
        };
        let Some(bucket) = self.buckets.get_mut(&priority) else {
            debug_assert!(false, "priority {priority} found without a bucket");
            return false;
        };
        let removed = bucket.remove(value).is_some();
        if bucket.is_empty() {
            self.buckets.remove(&priority);
            trace!(priority, "dropped empty priority bucket");
        }
        if removed {
            self.len -= 1;
        }
        self.debug_check();
        removed
    }

    /// Priority of the lowest bucket holding `value`, or None if absent.
    pub fn find_priority<Q>(&self, value: &Q) -> Option<Priority>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.buckets
            .iter()
            .find(|(_, bucket)| bucket.contains(value))
            .map(|(priority, _)| *priority)
    }

    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find_priority(value).is_some()
    }

    /// Peek a random element from the lowest priority bucket.
    pub fn first(&self) -> Option<&T> {
        let (_, bucket) = self.buckets.first_key_value()?;
        self.sample(bucket)
    }

    /// Peek a random element from the highest priority bucket.
    pub fn last(&self) -> Option<&T> {
        let (_, bucket) = self.buckets.last_key_value()?;
        self.sample(bucket)
    }

    /// Remove and return a random element from the lowest priority bucket.
    pub fn shift(&mut self) -> Option<T> {
        self.take(End::Lowest)
    }

    /// Remove and return a random element from the highest priority bucket.
    pub fn pop(&mut self) -> Option<T> {
        self.take(End::Highest)
    }

    /// Number of elements across all buckets.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Priorities currently in use, ascending.
    pub fn priorities(&self) -> impl DoubleEndedIterator<Item = Priority> + '_ {
        self.buckets.keys().copied()
    }

    pub fn lowest_priority(&self) -> Option<Priority> {
        self.buckets.keys().next().copied()
    }

    pub fn highest_priority(&self) -> Option<Priority> {
        self.buckets.keys().next_back().copied()
    }

    /// Number of elements at `priority`.
    pub fn bucket_len(&self, priority: Priority) -> usize {
        self.buckets.get(&priority).map_or(0, Bucket::len)
    }

    /// All elements with their priority, in ascending priority order.
    /// Order within a bucket is unspecified.
    pub fn iter(&self) -> impl Iterator<Item = (Priority, &T)> + '_ {
        self.buckets
            .iter()
            .flat_map(|(priority, bucket)| bucket.iter().map(move |v| (*priority, v)))
    }

    pub fn clear(&mut self) {
        debug!(len = self.len, buckets = self.buckets.len(), "clearing shuffled queue");
        self.buckets.clear();
        self.len = 0;
    }

    fn sample<'a>(&self, bucket: &'a Bucket<T>) -> Option<&'a T> {
        let slot = bucket.pick(&mut *self.rng.borrow_mut())?;
        bucket.get(slot)
    }

    fn take(&mut self, end: End) -> Option<T> {
        let mut entry = match end {
            End::Lowest => self.buckets.first_entry()?,
            End::Highest => self.buckets.last_entry()?,
        };
        let priority = *entry.key();
        let slot = entry.get().pick(self.rng.get_mut())?;
        let value = entry.get_mut().swap_remove_at(slot)?;
        if entry.get().is_empty() {
            entry.remove();
            trace!(priority, "dropped empty priority bucket");
        }
        self.len -= 1;
        trace!(priority, ?end, remaining = self.len, "took element");
        self.debug_check();
        Some(value)
    }

    /// Length matches bucket contents and no empty bucket is retained.
    fn debug_check(&self) {
        debug_assert!(
            self.buckets.values().all(|b| !b.is_empty()),
            "empty priority bucket retained"
        );
        debug_assert_eq!(
            self.len,
            self.buckets.values().map(Bucket::len).sum::<usize>(),
            "queue length out of sync with buckets"
        );
    }
}

impl<T: Eq + Hash + Clone> Default for ShuffledPriorityQueue<T, SeededRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Eq + Hash + Clone, R: RngCore> Extend<T> for ShuffledPriorityQueue<T, R> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

impl<T: Eq + Hash + Clone> FromIterator<T> for ShuffledPriorityQueue<T, SeededRng> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.extend(iter);
        queue
    }
}

impl<T: fmt::Debug, R> fmt::Debug for ShuffledPriorityQueue<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShuffledPriorityQueue")
            .field("len", &self.len)
            .field("buckets", &self.buckets)
            .finish()
    }
}
