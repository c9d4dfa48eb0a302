//! Retention sweep configuration.

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Order retention and archival policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetentionConfig {
    /// Whether the scheduled sweep is registered.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Age in days after which cancelled orders are purged.
    #[serde(default = "default_cancelled_ttl")]
    pub cancelled_ttl_days: i64,
    /// Age in days after which completed orders are archived.
    #[serde(default = "default_archive_after")]
    pub archive_after_days: i64,
    /// Records processed between stop checks.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Cron expression (with seconds) for the scheduled sweep.
    #[serde(default = "default_schedule")]
    pub schedule: String,
    /// Also take a store-level lease (multi-scheduler deployments).
    #[serde(default)]
    pub use_store_lease: bool,
    /// Lease lifetime in seconds.
    #[serde(default = "default_lease_ttl")]
    pub lease_ttl_seconds: u64,
}

impl RetentionConfig {
    /// Age threshold for the cancelled-order purge.
    pub fn cancelled_ttl(&self) -> Duration {
        Duration::days(self.cancelled_ttl_days)
    }

    /// Age threshold for completed-order archival.
    pub fn archive_after(&self) -> Duration {
        Duration::days(self.archive_after_days)
    }
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cancelled_ttl_days: default_cancelled_ttl(),
            archive_after_days: default_archive_after(),
            batch_size: default_batch_size(),
            schedule: default_schedule(),
            use_store_lease: false,
            lease_ttl_seconds: default_lease_ttl(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_cancelled_ttl() -> i64 {
    7
}

fn default_archive_after() -> i64 {
    365
}

fn default_batch_size() -> usize {
    50
}

fn default_schedule() -> String {
    "0 30 3 * * *".to_string()
}

fn default_lease_ttl() -> u64 {
    600
}
