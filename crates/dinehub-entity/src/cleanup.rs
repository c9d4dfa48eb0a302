//! Outcome of one retention sweep.

use serde::{Deserialize, Serialize};

/// Counts produced by a retention sweep. Never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanupResult {
    /// Cancelled orders permanently deleted.
    pub cancelled_deleted: u64,
    /// Completed orders moved to the archive.
    pub orders_archived: u64,
    /// The sweep ended between batches because a stop was requested.
    #[serde(default)]
    pub stopped_early: bool,
}

impl CleanupResult {
    /// Total records removed from the live collection.
    pub fn total(&self) -> u64 {
        self.cancelled_deleted + self.orders_archived
    }

    /// Whether the sweep changed nothing.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}
