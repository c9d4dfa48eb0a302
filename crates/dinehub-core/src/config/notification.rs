//! Notification feed configuration.

use serde::{Deserialize, Serialize};

/// Notification aggregator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Keep building the feed when one source fails, reporting the failed
    /// source instead of failing the whole request.
    #[serde(default)]
    pub tolerate_source_failures: bool,
    /// Number of items returned when the caller does not ask for a limit.
    #[serde(default = "default_limit")]
    pub default_limit: usize,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            tolerate_source_failures: false,
            default_limit: default_limit(),
        }
    }
}

fn default_limit() -> usize {
    10
}
