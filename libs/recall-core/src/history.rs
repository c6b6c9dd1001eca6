//! Review history with bounded retention.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::types::ReviewLogEntry;

/// Maximum number of log entries retained.
pub const MAX_ENTRIES: usize = 1000;

/// Append-only review history, oldest entries evicted first once the
/// retention cap is reached.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewHistory {
    entries: VecDeque<ReviewLogEntry>,
}

impl ReviewHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, dropping the oldest once the cap is hit.
    pub fn push(&mut self, entry: ReviewLogEntry) {
        if self.entries.len() == MAX_ENTRIES {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recent entry.
    pub fn latest(&self) -> Option<&ReviewLogEntry> {
        self.entries.back()
    }

    /// Entries in review order, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &ReviewLogEntry> {
        self.entries.iter()
    }
}
