//! Age thresholds deciding which orders a sweep touches.

use chrono::{DateTime, Duration, Utc};

use dinehub_core::config::RetentionConfig;
use dinehub_entity::{Order, OrderStatus};

/// Thresholds and batch size for a retention sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    /// Age after which cancelled orders are deleted.
    pub cancelled_ttl: Duration,
    /// Age after which completed orders are archived.
    pub archive_after: Duration,
    /// Records processed between stop checks.
    pub batch_size: usize,
}

impl RetentionPolicy {
    /// Builds the policy from configuration. A zero batch size becomes one.
    pub fn from_config(config: &RetentionConfig) -> Self {
        Self {
            cancelled_ttl: config.cancelled_ttl(),
            archive_after: config.archive_after(),
            batch_size: config.batch_size.max(1),
        }
    }

    /// Orders created before this instant are old enough to purge.
    pub fn purge_cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - self.cancelled_ttl
    }

    /// Orders created before this instant are old enough to archive.
    pub fn archive_cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - self.archive_after
    }

    /// Cancelled and strictly older than the purge threshold.
    pub fn is_purgeable(&self, order: &Order, now: DateTime<Utc>) -> bool {
        order.status == OrderStatus::Cancelled && order.created_before(self.purge_cutoff(now))
    }

    /// Completed, not yet archived, and strictly older than the archival threshold.
    pub fn is_archivable(&self, order: &Order, now: DateTime<Utc>) -> bool {
        order.status == OrderStatus::Completed
            && !order.archived
            && order.created_before(self.archive_cutoff(now))
    }
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self::from_config(&RetentionConfig::default())
    }
}
