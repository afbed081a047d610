//! Insertion Order Tracker Module
//!
//! Tracks the order in which keys were inserted, for oldest-first
//! capacity eviction. Unlike an LRU list, reads never reorder keys:
//! eviction is strictly least-recently-inserted.

use std::collections::VecDeque;

// == Insertion Tracker ==
/// Tracks key insertion order.
///
/// Keys are stored in a VecDeque where:
/// - Front = Most recently inserted
/// - Back = Oldest insertion
#[derive(Debug, Default)]
pub struct InsertionTracker {
    /// Keys ordered by insertion time
    order: VecDeque<String>,
}

impl InsertionTracker {
    // == Constructor ==
    /// Creates a new empty tracker.
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Record ==
    /// Records an insert (or overwrite) of a key.
    ///
    /// An overwrite counts as a fresh insertion, so the key moves to
    /// the front.
    pub fn record(&mut self, key: &str) {
        self.remove(key);
        self.order.push_front(key.to_string());
    }

    // == Remove ==
    /// Removes a key from the tracker.
    pub fn remove(&mut self, key: &str) {
        self.order.retain(|k| k != key);
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently inserted key.
    ///
    /// Returns None if the tracker is empty.
    pub fn evict_oldest(&mut self) -> Option<String> {
        self.order.pop_back()
    }

    // == Peek Oldest ==
    /// Returns the least recently inserted key without removing it.
    #[allow(dead_code)]
    pub fn peek_oldest(&self) -> Option<&String> {
        self.order.back()
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    // == Is Empty ==
    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
