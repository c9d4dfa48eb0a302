//! Sales report configuration.

use serde::{Deserialize, Serialize};

/// Daily sales report settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Whether the daily report job is registered.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Cron expression (with seconds) for the daily report.
    #[serde(default = "default_schedule")]
    pub schedule: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            schedule: default_schedule(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_schedule() -> String {
    "0 5 0 * * *".to_string()
}
