//! Notification item model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::kind::NotificationKind;

/// One entry of the operator feed. Built fresh on every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationItem {
    /// Source collection.
    pub kind: NotificationKind,
    /// Identifier of the source record.
    pub source_id: String,
    /// Title synthesized from the source record.
    pub title: String,
    /// Creation time of the source record, if it has one.
    pub timestamp: Option<DateTime<Utc>>,
    /// Status label shown next to the title.
    pub status_label: String,
}

impl NotificationItem {
    /// Sort key in milliseconds; records without a timestamp rank as epoch zero.
    pub fn sort_key(&self) -> i64 {
        self.timestamp.map_or(0, |ts| ts.timestamp_millis())
    }
}
