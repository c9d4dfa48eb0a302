//! Record store adapter contract.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use dinehub_core::result::AppResult;
use dinehub_core::types::TimeRange;
use dinehub_entity::{
    ArchivedOrder, Contact, CreateContact, CreateFeedback, CreateOrder, CreateReservation,
    Feedback, Order, OrderStatus, ReservationStatus, SalesReport, TableReservation,
};

/// Filter for order listings. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderQuery {
    /// Exact status.
    pub status: Option<OrderStatus>,
    /// Archived flag.
    pub archived: Option<bool>,
    /// Range over `created_at`.
    #[serde(default)]
    pub created: TimeRange,
}

impl OrderQuery {
    /// Match every order.
    pub fn all() -> Self {
        Self::default()
    }

    /// Restrict to one status.
    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restrict on the archived flag.
    pub fn with_archived(mut self, archived: bool) -> Self {
        self.archived = Some(archived);
        self
    }

    /// Restrict to orders created strictly before `cutoff`.
    pub fn created_before(mut self, cutoff: DateTime<Utc>) -> Self {
        self.created = TimeRange::before(cutoff);
        self
    }

    /// Restrict to orders created inside `range`.
    pub fn created_in(mut self, range: TimeRange) -> Self {
        self.created = range;
        self
    }

    /// Whether `order` satisfies the filter.
    pub fn matches(&self, order: &Order) -> bool {
        self.status.is_none_or(|s| order.status == s)
            && self.archived.is_none_or(|a| order.archived == a)
            && self.created.contains(order.created_at)
    }
}

/// Filter for reservation listings. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationQuery {
    /// Exact status.
    pub status: Option<ReservationStatus>,
    /// Requested date.
    pub date: Option<NaiveDate>,
    /// Range over `created_at`.
    #[serde(default)]
    pub created: TimeRange,
}

impl ReservationQuery {
    /// Match every reservation.
    pub fn all() -> Self {
        Self::default()
    }

    /// Restrict to one status.
    pub fn with_status(mut self, status: ReservationStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restrict to one requested date.
    pub fn on_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Whether `reservation` satisfies the filter.
    pub fn matches(&self, reservation: &TableReservation) -> bool {
        self.status.is_none_or(|s| reservation.status == s)
            && self.date.is_none_or(|d| reservation.reservation_date == d)
            && self.created.contains(reservation.created_at)
    }
}

/// Typed access to the restaurant's document collections.
///
/// Listings return records in a stable order (insertion order for the
/// in-memory adapter). Status updates are conditional: the write only
/// happens when the stored status still equals `expected`, otherwise the
/// call fails with `Conflict`.
#[async_trait]
pub trait RecordStore: Send + Sync + 'static {
    // ── Orders ───────────────────────────────────────────────────

    /// List live orders matching `query`.
    async fn list_orders(&self, query: &OrderQuery) -> AppResult<Vec<Order>>;

    /// Fetch one live order.
    async fn get_order(&self, id: &str) -> AppResult<Option<Order>>;

    /// Create a pending order.
    async fn create_order(&self, order: CreateOrder) -> AppResult<Order>;

    /// Conditionally change an order's status and `updated_at`.
    async fn update_order_status(
        &self,
        id: &str,
        expected: OrderStatus,
        status: OrderStatus,
        at: DateTime<Utc>,
    ) -> AppResult<Order>;

    /// Permanently delete a live order. Returns `true` if it existed.
    async fn delete_order(&self, id: &str) -> AppResult<bool>;

    /// Copy an order into the archive collection. Re-archiving the same
    /// order id replaces the earlier copy.
    async fn archive_order(&self, order: &Order, archived_at: DateTime<Utc>)
    -> AppResult<ArchivedOrder>;

    /// List archived orders whose `created_at` falls in `range`.
    async fn list_archived_orders(&self, range: &TimeRange) -> AppResult<Vec<ArchivedOrder>>;

    // ── Reservations ─────────────────────────────────────────────

    /// List reservations matching `query`.
    async fn list_reservations(&self, query: &ReservationQuery) -> AppResult<Vec<TableReservation>>;

    /// Fetch one reservation.
    async fn get_reservation(&self, id: &str) -> AppResult<Option<TableReservation>>;

    /// Create a pending reservation.
    async fn create_reservation(&self, reservation: CreateReservation)
    -> AppResult<TableReservation>;

    /// Conditionally change a reservation's status.
    async fn update_reservation_status(
        &self,
        id: &str,
        expected: ReservationStatus,
        status: ReservationStatus,
        at: DateTime<Utc>,
    ) -> AppResult<TableReservation>;

    // ── Contacts & feedback ──────────────────────────────────────

    /// List every contact message.
    async fn list_contacts(&self) -> AppResult<Vec<Contact>>;

    /// Store a contact message.
    async fn create_contact(&self, contact: CreateContact) -> AppResult<Contact>;

    /// List every review.
    async fn list_feedback(&self) -> AppResult<Vec<Feedback>>;

    /// Store a review.
    async fn create_feedback(&self, feedback: CreateFeedback) -> AppResult<Feedback>;

    // ── Reports ──────────────────────────────────────────────────

    /// Persist a report, assigning an id if it has none.
    async fn save_report(&self, report: SalesReport) -> AppResult<SalesReport>;

    /// List stored reports, oldest first.
    async fn list_reports(&self) -> AppResult<Vec<SalesReport>>;

    // ── Leases ───────────────────────────────────────────────────

    /// Take (or renew) the named lease for `holder`. Returns `false` when
    /// another holder owns an unexpired lease.
    async fn try_acquire_lease(&self, name: &str, holder: &str, ttl: Duration) -> AppResult<bool>;

    /// Release the named lease if `holder` owns it.
    async fn release_lease(&self, name: &str, holder: &str) -> AppResult<()>;
}
