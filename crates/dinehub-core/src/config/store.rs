//! Record store adapter configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Store adapter settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Deadline applied to every store call, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Capacity of the change-event broadcast buffer.
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,
}

impl StoreConfig {
    /// Per-call deadline.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            event_buffer: default_event_buffer(),
        }
    }
}

fn default_timeout_ms() -> u64 {
    5_000
}

fn default_event_buffer() -> usize {
    256
}
