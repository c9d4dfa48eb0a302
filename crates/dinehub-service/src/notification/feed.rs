//! A merged, sorted notification feed.

use chrono::{DateTime, Utc};
use serde::Serialize;

use dinehub_core::types::{PageRequest, PageResponse};
use dinehub_entity::{NotificationItem, NotificationKind};

/// Every notification from one aggregation pass, newest first.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationFeed {
    items: Vec<NotificationItem>,
    failed_sources: Vec<NotificationKind>,
    generated_at: DateTime<Utc>,
}

impl NotificationFeed {
    /// Sorts `items` newest first.
    ///
    /// Items without a timestamp rank as the Unix epoch. The sort is stable,
    /// so ties keep the order in which they were merged.
    pub fn new(
        mut items: Vec<NotificationItem>,
        failed_sources: Vec<NotificationKind>,
        generated_at: DateTime<Utc>,
    ) -> Self {
        items.sort_by(|a, b| b.sort_key().cmp(&a.sort_key()));
        Self {
            items,
            failed_sources,
            generated_at,
        }
    }

    /// All items in feed order.
    pub fn items(&self) -> &[NotificationItem] {
        &self.items
    }

    /// The first `limit` items.
    pub fn top(&self, limit: usize) -> &[NotificationItem] {
        &self.items[..limit.min(self.items.len())]
    }

    /// One page of the feed.
    pub fn page(&self, request: &PageRequest) -> PageResponse<NotificationItem> {
        PageResponse::from_slice(&self.items, request)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sources that could not be read for this feed.
    pub fn failed_sources(&self) -> &[NotificationKind] {
        &self.failed_sources
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }
}
