//! Bounded message history.

use std::collections::VecDeque;

use super::entity::HistoryEntry;

/// Maximum number of messages kept in history
pub const HISTORY_CAPACITY: usize = 100;

/// Append-only ring of recent chat entries.
///
/// Insertion order is send order. Once `capacity` is exceeded the oldest
/// entries are dropped.
#[derive(Debug, Clone)]
pub struct MessageHistory {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl MessageHistory {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append an entry at the tail, evicting from the head while over capacity
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push_back(entry);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// The last `min(count, len)` entries in chronological order.
    ///
    /// Returns `None` when the history holds no entries at all.
    pub fn recent(&self, count: usize) -> Option<Vec<HistoryEntry>> {
        if self.entries.is_empty() {
            return None;
        }
        let skip = self.entries.len().saturating_sub(count);
        Some(self.entries.iter().skip(skip).cloned().collect())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MessageHistory {
    fn default() -> Self {
        Self::new()
    }
}
