//! Shuffled Priority Queue
//!
//! An in-memory priority queue in which elements sharing a priority come
//! back in random order:
//! - Ordered tiers (BTreeMap keyed by priority, O(log n) min/max)
//! - Unique membership per tier, O(1) add/remove/contains
//! - Uniform tie-breaking from a per-queue seedable RNG
//!
//! The queue is single threaded and does no I/O. Wrap it in one lock if it
//! must be shared.

pub mod bucket;
pub mod rng;
pub mod spq;


pub use rng::SeededRng;
pub use spq::{Priority, QueueConfig, ShuffledPriorityQueue, DEFAULT_PRIORITY};
