//! Bounded most-recent-first buffers

use super::transaction::Transaction;
use std::collections::VecDeque;

pub const DEFAULT_WINDOW_CAPACITY: usize = 50;

/// Ordered buffer that inserts at the front and evicts from the tail.
///
/// Entries are never reordered or updated in place.
#[derive(Debug, Clone)]
pub struct RecentFeed<T> {
    entries: VecDeque<T>,
    capacity: usize,
}

impl<T> RecentFeed<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Insert at the front, then drop tail entries beyond capacity.
    /// Returns how many entries were evicted.
    pub fn push(&mut self, entry: T) -> usize {
        self.entries.push_front(entry);
        let evicted = self.entries.len().saturating_sub(self.capacity);
        self.entries.truncate(self.capacity);
        evicted
    }

    pub fn current(&self) -> impl ExactSizeIterator<Item = &T> + DoubleEndedIterator {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<T: Clone> RecentFeed<T> {
    /// Owned copy for publishing
    pub fn to_vec(&self) -> Vec<T> {
        self.entries.iter().cloned().collect()
    }
}

/// Rolling window of recent transactions
pub type TransactionWindow = RecentFeed<Transaction>;

impl Default for TransactionWindow {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_CAPACITY)
    }
}
