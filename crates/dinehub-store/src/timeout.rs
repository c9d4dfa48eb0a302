//! Deadline decorator for any [`RecordStore`].

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::broadcast;
use tracing::warn;

use dinehub_core::error::AppError;
use dinehub_core::result::AppResult;
use dinehub_core::types::TimeRange;
use dinehub_entity::{
    ArchivedOrder, Contact, CreateContact, CreateFeedback, CreateOrder, CreateReservation,
    Feedback, Order, OrderStatus, ReservationStatus, SalesReport, TableReservation,
};

use crate::adapter::{OrderQuery, RecordStore, ReservationQuery};
use crate::events::{ChangeFeed, StoreEvent};

/// Wraps a store so that every call fails with `StoreTimeout` once it
/// exceeds the configured deadline.
#[derive(Debug, Clone)]
pub struct TimedStore<S> {
    inner: S,
    timeout: Duration,
}

impl<S: RecordStore> TimedStore<S> {
    /// Wrap `inner` with a per-call deadline.
    pub fn new(inner: S, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    /// The wrapped store.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    async fn run<T>(&self, op: &'static str, call: impl Future<Output = AppResult<T>>) -> AppResult<T> {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                warn!(op, timeout_ms = self.timeout.as_millis() as u64, "Store call timed out");
                Err(AppError::store_timeout(format!(
                    "Store call '{op}' exceeded {}ms",
                    self.timeout.as_millis()
                )))
            }
        }
    }
}

impl<S: ChangeFeed> ChangeFeed for TimedStore<S> {
    fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.inner.subscribe()
    }
}

#[async_trait]
impl<S: RecordStore> RecordStore for TimedStore<S> {
    async fn list_orders(&self, query: &OrderQuery) -> AppResult<Vec<Order>> {
        self.run("list_orders", self.inner.list_orders(query)).await
    }

    async fn get_order(&self, id: &str) -> AppResult<Option<Order>> {
        self.run("get_order", self.inner.get_order(id)).await
    }

    async fn create_order(&self, order: CreateOrder) -> AppResult<Order> {
        self.run("create_order", self.inner.create_order(order)).await
    }

    async fn update_order_status(
        &self,
        id: &str,
        expected: OrderStatus,
        status: OrderStatus,
        at: DateTime<Utc>,
    ) -> AppResult<Order> {
        self.run(
            "update_order_status",
            self.inner.update_order_status(id, expected, status, at),
        )
        .await
    }

    async fn delete_order(&self, id: &str) -> AppResult<bool> {
        self.run("delete_order", self.inner.delete_order(id)).await
    }

    async fn archive_order(
        &self,
        order: &Order,
        archived_at: DateTime<Utc>,
    ) -> AppResult<ArchivedOrder> {
        self.run("archive_order", self.inner.archive_order(order, archived_at))
            .await
    }

    async fn list_archived_orders(&self, range: &TimeRange) -> AppResult<Vec<ArchivedOrder>> {
        self.run("list_archived_orders", self.inner.list_archived_orders(range))
            .await
    }

    async fn list_reservations(&self, query: &ReservationQuery) -> AppResult<Vec<TableReservation>> {
        self.run("list_reservations", self.inner.list_reservations(query))
            .await
    }

    async fn get_reservation(&self, id: &str) -> AppResult<Option<TableReservation>> {
        self.run("get_reservation", self.inner.get_reservation(id)).await
    }

    async fn create_reservation(
        &self,
        reservation: CreateReservation,
    ) -> AppResult<TableReservation> {
        self.run("create_reservation", self.inner.create_reservation(reservation))
            .await
    }

    async fn update_reservation_status(
        &self,
        id: &str,
        expected: ReservationStatus,
        status: ReservationStatus,
        at: DateTime<Utc>,
    ) -> AppResult<TableReservation> {
        self.run(
            "update_reservation_status",
            self.inner.update_reservation_status(id, expected, status, at),
        )
        .await
    }

    async fn list_contacts(&self) -> AppResult<Vec<Contact>> {
        self.run("list_contacts", self.inner.list_contacts()).await
    }

    async fn create_contact(&self, contact: CreateContact) -> AppResult<Contact> {
        self.run("create_contact", self.inner.create_contact(contact)).await
    }

    async fn list_feedback(&self) -> AppResult<Vec<Feedback>> {
        self.run("list_feedback", self.inner.list_feedback()).await
    }

    async fn create_feedback(&self, feedback: CreateFeedback) -> AppResult<Feedback> {
        self.run("create_feedback", self.inner.create_feedback(feedback))
            .await
    }

    async fn save_report(&self, report: SalesReport) -> AppResult<SalesReport> {
        self.run("save_report", self.inner.save_report(report)).await
    }

    async fn list_reports(&self) -> AppResult<Vec<SalesReport>> {
        self.run("list_reports", self.inner.list_reports()).await
    }

    async fn try_acquire_lease(&self, name: &str, holder: &str, ttl: Duration) -> AppResult<bool> {
        self.run(
            "try_acquire_lease",
            self.inner.try_acquire_lease(name, holder, ttl),
        )
        .await
    }

    async fn release_lease(&self, name: &str, holder: &str) -> AppResult<()> {
        self.run("release_lease", self.inner.release_lease(name, holder))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fault::FaultyStore;
    use crate::memory::MemoryStore;
    use dinehub_core::error::ErrorKind;

    #[tokio::test(start_paused = true)]
    async fn test_slow_call_times_out() {
        let faulty = FaultyStore::new(MemoryStore::default());
        faulty.delay("list_contacts", Duration::from_secs(10));
        let store = TimedStore::new(faulty, Duration::from_millis(500));

        let err = store.list_contacts().await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::StoreTimeout);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fast_call_passes_through() {
        let store = TimedStore::new(MemoryStore::default(), Duration::from_millis(500));
        assert!(store.list_feedback().await.unwrap().is_empty());
    }
}
