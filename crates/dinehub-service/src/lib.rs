//! # dinehub-service
//!
//! Business logic for the DineHub operations core. Each service works
//! purely through the [`RecordStore`](dinehub_store::RecordStore) adapter
//! and keeps no record state between calls.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod lifecycle;
pub mod notification;
pub mod report;
pub mod retention;
pub mod search;

pub use lifecycle::{OrderLifecycle, ReservationLifecycle};
pub use notification::{FeedPage, NotificationAggregator, NotificationFeed, NotificationFormatter};
pub use report::SalesReportService;
pub use retention::{RetentionEngine, RetentionPolicy, SweepError};
pub use search::{ReservationSearch, StatusFilter, filter_reservations};

#[cfg(test)]
pub(crate) mod fixtures;
