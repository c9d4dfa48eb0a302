//! Change notifications layered on top of the pull-based store.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Store collection names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    /// Live orders.
    Orders,
    /// Archived orders.
    ArchivedOrders,
    /// Table reservations.
    Reservations,
    /// Contact messages.
    Contacts,
    /// Customer reviews.
    Feedback,
    /// Sales reports.
    Reports,
}

impl Collection {
    /// Return the collection name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Orders => "orders",
            Self::ArchivedOrders => "archived_orders",
            Self::Reservations => "reservations",
            Self::Contacts => "contacts",
            Self::Feedback => "feedback",
            Self::Reports => "reports",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What happened to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// A record was created.
    Created,
    /// A record was modified.
    Updated,
    /// A record was removed.
    Deleted,
}

/// A single change notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreEvent {
    /// Affected collection.
    pub collection: Collection,
    /// Affected record id.
    pub record_id: String,
    /// Kind of change.
    pub change: ChangeKind,
}

impl StoreEvent {
    /// Create a new event.
    pub fn new(collection: Collection, record_id: impl Into<String>, change: ChangeKind) -> Self {
        Self {
            collection,
            record_id: record_id.into(),
            change,
        }
    }
}

/// A store that can push change notifications to subscribers.
///
/// Slow subscribers may miss events (`RecvError::Lagged`); the store itself
/// stays the source of truth and a lagging subscriber should re-read.
pub trait ChangeFeed: Send + Sync {
    /// Subscribe to all future changes.
    fn subscribe(&self) -> broadcast::Receiver<StoreEvent>;
}
