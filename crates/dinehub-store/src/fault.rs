//! Fault injection wrapper for exercising failure paths in tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::broadcast;

use dinehub_core::error::AppError;
use dinehub_core::result::AppResult;
use dinehub_core::types::TimeRange;
use dinehub_entity::{
    ArchivedOrder, Contact, CreateContact, CreateFeedback, CreateOrder, CreateReservation,
    Feedback, Order, OrderStatus, ReservationStatus, SalesReport, TableReservation,
};

use crate::adapter::{OrderQuery, RecordStore, ReservationQuery};
use crate::events::{ChangeFeed, StoreEvent};

#[derive(Debug, Default, Clone, Copy)]
struct Plan {
    /// Calls allowed to succeed before failures start.
    succeed_first: Option<usize>,
    /// Delay applied before the call runs.
    delay: Option<Duration>,
}

#[derive(Debug, Default)]
struct State {
    plans: HashMap<&'static str, Plan>,
    calls: HashMap<&'static str, usize>,
}

/// Wraps a store and fails or delays chosen operations by name.
///
/// Clones share the fault plan, so a test can keep one handle while the
/// services own another.
#[derive(Debug, Clone)]
pub struct FaultyStore<S> {
    inner: S,
    state: Arc<Mutex<State>>,
}

impl<S: RecordStore> FaultyStore<S> {
    /// Wrap `inner` with no faults configured.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            state: Arc::new(Mutex::new(State::default())),
        }
    }

    /// The wrapped store.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Make every call to `op` fail.
    pub fn fail(&self, op: &'static str) {
        self.fail_after(op, 0);
    }

    /// Let `successes` calls to `op` through, then fail the rest.
    pub fn fail_after(&self, op: &'static str, successes: usize) {
        let mut state = self.lock();
        state.plans.entry(op).or_default().succeed_first = Some(successes);
    }

    /// Delay every call to `op`.
    pub fn delay(&self, op: &'static str, delay: Duration) {
        let mut state = self.lock();
        state.plans.entry(op).or_default().delay = Some(delay);
    }

    /// Remove every configured fault.
    pub fn heal(&self) {
        self.lock().plans.clear();
    }

    /// Number of times `op` was invoked.
    pub fn calls(&self, op: &'static str) -> usize {
        self.lock().calls.get(op).copied().unwrap_or(0)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    async fn check(&self, op: &'static str) -> AppResult<()> {
        let (plan, seen) = {
            let mut state = self.lock();
            let seen = {
                let count = state.calls.entry(op).or_insert(0);
                *count += 1;
                *count - 1
            };
            (state.plans.get(op).copied().unwrap_or_default(), seen)
        };

        if let Some(delay) = plan.delay {
            tokio::time::sleep(delay).await;
        }

        match plan.succeed_first {
            Some(limit) if seen >= limit => {
                Err(AppError::store(format!("Injected failure in '{op}'")))
            }
            _ => Ok(()),
        }
    }
}

impl<S: ChangeFeed> ChangeFeed for FaultyStore<S> {
    fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.inner.subscribe()
    }
}

#[async_trait]
impl<S: RecordStore> RecordStore for FaultyStore<S> {
    async fn list_orders(&self, query: &OrderQuery) -> AppResult<Vec<Order>> {
        self.check("list_orders").await?;
        self.inner.list_orders(query).await
    }

    async fn get_order(&self, id: &str) -> AppResult<Option<Order>> {
        self.check("get_order").await?;
        self.inner.get_order(id).await
    }

    async fn create_order(&self, order: CreateOrder) -> AppResult<Order> {
        self.check("create_order").await?;
        self.inner.create_order(order).await
    }

    async fn update_order_status(
        &self,
        id: &str,
        expected: OrderStatus,
        status: OrderStatus,
        at: DateTime<Utc>,
    ) -> AppResult<Order> {
        self.check("update_order_status").await?;
        self.inner.update_order_status(id, expected, status, at).await
    }

    async fn delete_order(&self, id: &str) -> AppResult<bool> {
        self.check("delete_order").await?;
        self.inner.delete_order(id).await
    }

    async fn archive_order(
        &self,
        order: &Order,
        archived_at: DateTime<Utc>,
    ) -> AppResult<ArchivedOrder> {
        self.check("archive_order").await?;
        self.inner.archive_order(order, archived_at).await
    }

    async fn list_archived_orders(&self, range: &TimeRange) -> AppResult<Vec<ArchivedOrder>> {
        self.check("list_archived_orders").await?;
        self.inner.list_archived_orders(range).await
    }

    async fn list_reservations(&self, query: &ReservationQuery) -> AppResult<Vec<TableReservation>> {
        self.check("list_reservations").await?;
        self.inner.list_reservations(query).await
    }

    async fn get_reservation(&self, id: &str) -> AppResult<Option<TableReservation>> {
        self.check("get_reservation").await?;
        self.inner.get_reservation(id).await
    }

    async fn create_reservation(
        &self,
        reservation: CreateReservation,
    ) -> AppResult<TableReservation> {
        self.check("create_reservation").await?;
        self.inner.create_reservation(reservation).await
    }

    async fn update_reservation_status(
        &self,
        id: &str,
        expected: ReservationStatus,
        status: ReservationStatus,
        at: DateTime<Utc>,
    ) -> AppResult<TableReservation> {
        self.check("update_reservation_status").await?;
        self.inner
            .update_reservation_status(id, expected, status, at)
            .await
    }

    async fn list_contacts(&self) -> AppResult<Vec<Contact>> {
        self.check("list_contacts").await?;
        self.inner.list_contacts().await
    }

    async fn create_contact(&self, contact: CreateContact) -> AppResult<Contact> {
        self.check("create_contact").await?;
        self.inner.create_contact(contact).await
    }

    async fn list_feedback(&self) -> AppResult<Vec<Feedback>> {
        self.check("list_feedback").await?;
        self.inner.list_feedback().await
    }

    async fn create_feedback(&self, feedback: CreateFeedback) -> AppResult<Feedback> {
        self.check("create_feedback").await?;
        self.inner.create_feedback(feedback).await
    }

    async fn save_report(&self, report: SalesReport) -> AppResult<SalesReport> {
        self.check("save_report").await?;
        self.inner.save_report(report).await
    }

    async fn list_reports(&self) -> AppResult<Vec<SalesReport>> {
        self.check("list_reports").await?;
        self.inner.list_reports().await
    }

    async fn try_acquire_lease(&self, name: &str, holder: &str, ttl: Duration) -> AppResult<bool> {
        self.check("try_acquire_lease").await?;
        self.inner.try_acquire_lease(name, holder, ttl).await
    }

    async fn release_lease(&self, name: &str, holder: &str) -> AppResult<()> {
        self.check("release_lease").await?;
        self.inner.release_lease(name, holder).await
    }
}
