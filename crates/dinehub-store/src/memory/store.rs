//! In-memory record store implementation using `dashmap`.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tokio::sync::broadcast;
use tokio::time::Instant;
use tracing::debug;
use uuid::Uuid;

use dinehub_core::error::AppError;
use dinehub_core::result::AppResult;
use dinehub_core::types::TimeRange;
use dinehub_entity::{
    ArchivedOrder, Contact, ContactStatus, CreateContact, CreateFeedback, CreateOrder,
    CreateReservation, Feedback, Order, OrderStatus, ReservationStatus, SalesReport,
    TableReservation,
};

use crate::adapter::{OrderQuery, RecordStore, ReservationQuery};
use crate::events::{ChangeFeed, ChangeKind, Collection, StoreEvent};

/// A stored document plus its insertion sequence number.
#[derive(Debug)]
struct Row<T> {
    seq: u64,
    record: T,
}

/// A named lease held by one process.
#[derive(Debug)]
struct Lease {
    holder: String,
    expires_at: Instant,
}

#[derive(Debug)]
struct Inner {
    seq: AtomicU64,
    orders: DashMap<String, Row<Order>>,
    archived_orders: DashMap<String, Row<ArchivedOrder>>,
    reservations: DashMap<String, Row<TableReservation>>,
    contacts: DashMap<String, Row<Contact>>,
    feedback: DashMap<String, Row<Feedback>>,
    reports: DashMap<String, Row<SalesReport>>,
    leases: DashMap<String, Lease>,
    events: broadcast::Sender<StoreEvent>,
}

/// In-memory document store.
///
/// Cloning is cheap; clones share the same collections. Listings come back
/// in insertion order. Status updates hold the record's shard lock for the
/// compare-and-set, so concurrent transitions on one record are serialized.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

impl MemoryStore {
    /// Create an empty store whose change feed buffers `event_buffer` events.
    pub fn new(event_buffer: usize) -> Self {
        let (events, _) = broadcast::channel(event_buffer.max(1));
        Self {
            inner: Arc::new(Inner {
                seq: AtomicU64::new(0),
                orders: DashMap::new(),
                archived_orders: DashMap::new(),
                reservations: DashMap::new(),
                contacts: DashMap::new(),
                feedback: DashMap::new(),
                reports: DashMap::new(),
                leases: DashMap::new(),
                events,
            }),
        }
    }

    /// Insert an order as-is (imports and fixtures). An empty id is replaced.
    pub fn insert_order(&self, mut order: Order) -> Order {
        if order.id.is_empty() {
            order.id = new_id();
        }
        let row = Row {
            seq: self.next_seq(),
            record: order.clone(),
        };
        self.inner.orders.insert(order.id.clone(), row);
        self.publish(Collection::Orders, &order.id, ChangeKind::Created);
        order
    }

    /// Insert a reservation as-is. An empty id is replaced.
    pub fn insert_reservation(&self, mut reservation: TableReservation) -> TableReservation {
        if reservation.id.is_empty() {
            reservation.id = new_id();
        }
        let row = Row {
            seq: self.next_seq(),
            record: reservation.clone(),
        };
        self.inner.reservations.insert(reservation.id.clone(), row);
        self.publish(Collection::Reservations, &reservation.id, ChangeKind::Created);
        reservation
    }

    /// Insert a contact message as-is. An empty id is replaced.
    pub fn insert_contact(&self, mut contact: Contact) -> Contact {
        if contact.id.is_empty() {
            contact.id = new_id();
        }
        let row = Row {
            seq: self.next_seq(),
            record: contact.clone(),
        };
        self.inner.contacts.insert(contact.id.clone(), row);
        self.publish(Collection::Contacts, &contact.id, ChangeKind::Created);
        contact
    }

    /// Insert a review as-is. An empty id is replaced.
    pub fn insert_feedback(&self, mut feedback: Feedback) -> Feedback {
        if feedback.id.is_empty() {
            feedback.id = new_id();
        }
        let row = Row {
            seq: self.next_seq(),
            record: feedback.clone(),
        };
        self.inner.feedback.insert(feedback.id.clone(), row);
        self.publish(Collection::Feedback, &feedback.id, ChangeKind::Created);
        feedback
    }

    /// Fetch an archived order by its original id.
    pub fn archived_order(&self, id: &str) -> Option<ArchivedOrder> {
        self.inner
            .archived_orders
            .get(id)
            .map(|row| row.record.clone())
    }

    /// Number of live orders.
    pub fn order_count(&self) -> usize {
        self.inner.orders.len()
    }

    /// Number of archived orders.
    pub fn archived_count(&self) -> usize {
        self.inner.archived_orders.len()
    }

    fn next_seq(&self) -> u64 {
        self.inner.seq.fetch_add(1, Ordering::SeqCst)
    }

    fn publish(&self, collection: Collection, id: &str, change: ChangeKind) {
        // No subscribers is not an error.
        let _ = self
            .inner
            .events
            .send(StoreEvent::new(collection, id, change));
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(256)
    }
}

impl ChangeFeed for MemoryStore {
    fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.inner.events.subscribe()
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Snapshot a collection in insertion order, keeping rows that match.
fn collect_sorted<T: Clone>(map: &DashMap<String, Row<T>>, keep: impl Fn(&T) -> bool) -> Vec<T> {
    let mut rows: Vec<(u64, T)> = map
        .iter()
        .filter(|entry| keep(&entry.value().record))
        .map(|entry| (entry.value().seq, entry.value().record.clone()))
        .collect();
    rows.sort_by_key(|(seq, _)| *seq);
    rows.into_iter().map(|(_, record)| record).collect()
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn list_orders(&self, query: &OrderQuery) -> AppResult<Vec<Order>> {
        Ok(collect_sorted(&self.inner.orders, |o| query.matches(o)))
    }

    async fn get_order(&self, id: &str) -> AppResult<Option<Order>> {
        Ok(self.inner.orders.get(id).map(|row| row.record.clone()))
    }

    async fn create_order(&self, order: CreateOrder) -> AppResult<Order> {
        let now = Utc::now();
        Ok(self.insert_order(Order {
            id: new_id(),
            order_code: order.order_code,
            table_id: order.table_id,
            table_number: order.table_number,
            customer_name: order.customer_name,
            items: order.items,
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
            archived: false,
        }))
    }

    async fn update_order_status(
        &self,
        id: &str,
        expected: OrderStatus,
        status: OrderStatus,
        at: DateTime<Utc>,
    ) -> AppResult<Order> {
        let updated = {
            let mut row = self
                .inner
                .orders
                .get_mut(id)
                .ok_or_else(|| AppError::not_found(format!("Order '{id}' not found")))?;

            if row.record.status != expected {
                return Err(AppError::conflict(format!(
                    "Order '{id}' is '{}', expected '{expected}'",
                    row.record.status
                )));
            }

            row.record.status = status;
            row.record.updated_at = at;
            row.record.clone()
        };

        self.publish(Collection::Orders, id, ChangeKind::Updated);
        Ok(updated)
    }

    async fn delete_order(&self, id: &str) -> AppResult<bool> {
        let removed = self.inner.orders.remove(id).is_some();
        if removed {
            self.publish(Collection::Orders, id, ChangeKind::Deleted);
        }
        Ok(removed)
    }

    async fn archive_order(
        &self,
        order: &Order,
        archived_at: DateTime<Utc>,
    ) -> AppResult<ArchivedOrder> {
        let archived = ArchivedOrder::from_order(order, archived_at);
        let seq = self.next_seq();

        self.inner
            .archived_orders
            .entry(order.id.clone())
            .and_modify(|row| row.record = archived.clone())
            .or_insert_with(|| Row {
                seq,
                record: archived.clone(),
            });

        debug!(order_id = %order.id, "Order copied to archive");
        self.publish(Collection::ArchivedOrders, &order.id, ChangeKind::Created);
        Ok(archived)
    }

    async fn list_archived_orders(&self, range: &TimeRange) -> AppResult<Vec<ArchivedOrder>> {
        Ok(collect_sorted(&self.inner.archived_orders, |a| {
            range.contains(a.order.created_at)
        }))
    }

    async fn list_reservations(&self, query: &ReservationQuery) -> AppResult<Vec<TableReservation>> {
        Ok(collect_sorted(&self.inner.reservations, |r| query.matches(r)))
    }

    async fn get_reservation(&self, id: &str) -> AppResult<Option<TableReservation>> {
        Ok(self.inner.reservations.get(id).map(|row| row.record.clone()))
    }

    async fn create_reservation(
        &self,
        reservation: CreateReservation,
    ) -> AppResult<TableReservation> {
        Ok(self.insert_reservation(TableReservation {
            id: new_id(),
            customer_name: reservation.customer_name,
            customer_phone: reservation.customer_phone,
            number_of_guests: reservation.number_of_guests,
            reservation_date: reservation.reservation_date,
            reservation_time: reservation.reservation_time,
            notes: reservation.notes,
            status: ReservationStatus::Pending,
            created_at: Utc::now(),
            updated_at: None,
        }))
    }

    async fn update_reservation_status(
        &self,
        id: &str,
        expected: ReservationStatus,
        status: ReservationStatus,
        at: DateTime<Utc>,
    ) -> AppResult<TableReservation> {
        let updated = {
            let mut row = self
                .inner
                .reservations
                .get_mut(id)
                .ok_or_else(|| AppError::not_found(format!("Reservation '{id}' not found")))?;

            if row.record.status != expected {
                return Err(AppError::conflict(format!(
                    "Reservation '{id}' is '{}', expected '{expected}'",
                    row.record.status
                )));
            }

            row.record.status = status;
            row.record.updated_at = Some(at);
            row.record.clone()
        };

        self.publish(Collection::Reservations, id, ChangeKind::Updated);
        Ok(updated)
    }

    async fn list_contacts(&self) -> AppResult<Vec<Contact>> {
        Ok(collect_sorted(&self.inner.contacts, |_| true))
    }

    async fn create_contact(&self, contact: CreateContact) -> AppResult<Contact> {
        Ok(self.insert_contact(Contact {
            id: new_id(),
            name: contact.name,
            email: contact.email,
            phone: contact.phone,
            subject: contact.subject,
            message: contact.message,
            status: ContactStatus::Unread,
            created_at: Some(Utc::now()),
        }))
    }

    async fn list_feedback(&self) -> AppResult<Vec<Feedback>> {
        Ok(collect_sorted(&self.inner.feedback, |_| true))
    }

    async fn create_feedback(&self, feedback: CreateFeedback) -> AppResult<Feedback> {
        Ok(self.insert_feedback(Feedback {
            id: new_id(),
            customer_name: feedback.customer_name,
            rating: feedback.rating,
            comment: feedback.comment,
            hidden: false,
            created_at: Some(Utc::now()),
        }))
    }

    async fn save_report(&self, mut report: SalesReport) -> AppResult<SalesReport> {
        if report.id.is_empty() {
            report.id = new_id();
        }
        let row = Row {
            seq: self.next_seq(),
            record: report.clone(),
        };
        self.inner.reports.insert(report.id.clone(), row);
        self.publish(Collection::Reports, &report.id, ChangeKind::Created);
        Ok(report)
    }

    async fn list_reports(&self) -> AppResult<Vec<SalesReport>> {
        Ok(collect_sorted(&self.inner.reports, |_| true))
    }

    async fn try_acquire_lease(&self, name: &str, holder: &str, ttl: Duration) -> AppResult<bool> {
        let now = Instant::now();
        let lease = Lease {
            holder: holder.to_string(),
            expires_at: now + ttl,
        };

        match self.inner.leases.entry(name.to_string()) {
            Entry::Occupied(mut entry) => {
                let current = entry.get();
                if current.holder == holder || current.expires_at <= now {
                    entry.insert(lease);
                    Ok(true)
                } else {
                    Ok(false)
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(lease);
                Ok(true)
            }
        }
    }

    async fn release_lease(&self, name: &str, holder: &str) -> AppResult<()> {
        self.inner
            .leases
            .remove_if(name, |_, lease| lease.holder == holder);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use dinehub_core::error::ErrorKind;
    use dinehub_entity::OrderItem;

    fn create_order_req(code: &str) -> CreateOrder {
        CreateOrder {
            order_code: code.to_string(),
            table_id: "t-1".to_string(),
            table_number: 1,
            customer_name: "Hoa".to_string(),
            items: vec![OrderItem {
                name: "Bún chả".to_string(),
                quantity: 1,
                unit_price: 45_000,
            }],
        }
    }

    fn create_reservation_req(name: &str) -> CreateReservation {
        CreateReservation {
            customer_name: name.to_string(),
            customer_phone: "0901234567".to_string(),
            number_of_guests: 2,
            reservation_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            reservation_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let store = MemoryStore::default();
        for code in ["A", "B", "C", "D"] {
            store.create_order(create_order_req(code)).await.unwrap();
        }
        let codes: Vec<String> = store
            .list_orders(&OrderQuery::all())
            .await
            .unwrap()
            .into_iter()
            .map(|o| o.order_code)
            .collect();
        assert_eq!(codes, vec!["A", "B", "C", "D"]);
    }

    #[tokio::test]
    async fn test_conditional_update_detects_conflict() {
        let store = MemoryStore::default();
        let order = store.create_order(create_order_req("A")).await.unwrap();
        let now = Utc::now();

        store
            .update_order_status(&order.id, OrderStatus::Pending, OrderStatus::Confirmed, now)
            .await
            .unwrap();

        let err = store
            .update_order_status(&order.id, OrderStatus::Pending, OrderStatus::Cancelled, now)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);

        let stored = store.get_order(&order.id).await.unwrap().unwrap();
        assert_eq!(stored.status, OrderStatus::Confirmed);
    }

    #[tokio::test]
    async fn test_update_missing_reservation_is_not_found() {
        let store = MemoryStore::default();
        let err = store
            .update_reservation_status(
                "missing",
                ReservationStatus::Pending,
                ReservationStatus::Confirmed,
                Utc::now(),
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_archive_is_idempotent_per_order() {
        let store = MemoryStore::default();
        let order = store.create_order(create_order_req("A")).await.unwrap();
        store.archive_order(&order, Utc::now()).await.unwrap();
        store.archive_order(&order, Utc::now()).await.unwrap();

        assert_eq!(store.archived_count(), 1);
        assert!(store.archived_order(&order.id).unwrap().order.archived);
        // Archiving alone does not remove the live copy.
        assert_eq!(store.order_count(), 1);
    }

    #[tokio::test]
    async fn test_delete_reports_existence() {
        let store = MemoryStore::default();
        let order = store.create_order(create_order_req("A")).await.unwrap();
        assert!(store.delete_order(&order.id).await.unwrap());
        assert!(!store.delete_order(&order.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_reservation_query_by_status() {
        let store = MemoryStore::default();
        let a = store
            .create_reservation(create_reservation_req("An"))
            .await
            .unwrap();
        store
            .create_reservation(create_reservation_req("Bình"))
            .await
            .unwrap();
        store
            .update_reservation_status(
                &a.id,
                ReservationStatus::Pending,
                ReservationStatus::Confirmed,
                Utc::now(),
            )
            .await
            .unwrap();

        let confirmed = store
            .list_reservations(&ReservationQuery::all().with_status(ReservationStatus::Confirmed))
            .await
            .unwrap();
        assert_eq!(confirmed.len(), 1);
        assert_eq!(confirmed[0].customer_name, "An");
        assert!(confirmed[0].updated_at.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_lease_exclusive_until_expiry() {
        let store = MemoryStore::default();
        let ttl = Duration::from_secs(60);

        assert!(store.try_acquire_lease("sweep", "a", ttl).await.unwrap());
        assert!(!store.try_acquire_lease("sweep", "b", ttl).await.unwrap());
        assert!(store.try_acquire_lease("sweep", "a", ttl).await.unwrap());

        tokio::time::advance(Duration::from_secs(61)).await;
        assert!(store.try_acquire_lease("sweep", "b", ttl).await.unwrap());
    }

    #[tokio::test]
    async fn test_release_only_by_holder() {
        let store = MemoryStore::default();
        let ttl = Duration::from_secs(60);
        store.try_acquire_lease("sweep", "a", ttl).await.unwrap();

        store.release_lease("sweep", "b").await.unwrap();
        assert!(!store.try_acquire_lease("sweep", "b", ttl).await.unwrap());

        store.release_lease("sweep", "a").await.unwrap();
        assert!(store.try_acquire_lease("sweep", "b", ttl).await.unwrap());
    }

    #[tokio::test]
    async fn test_change_feed_reports_mutations() {
        let store = MemoryStore::default();
        let mut events = store.subscribe();

        let order = store.create_order(create_order_req("A")).await.unwrap();
        store.delete_order(&order.id).await.unwrap();

        let first = events.recv().await.unwrap();
        assert_eq!(
            first,
            StoreEvent::new(Collection::Orders, order.id.clone(), ChangeKind::Created)
        );
        let second = events.recv().await.unwrap();
        assert_eq!(second.change, ChangeKind::Deleted);
    }

    #[tokio::test]
    async fn test_save_report_assigns_id() {
        let store = MemoryStore::default();
        let now = Utc::now();
        let report = SalesReport {
            id: String::new(),
            period_start: now,
            period_end: now,
            orders_by_status: Default::default(),
            completed_revenue: 0,
            archived_orders_included: 0,
            generated_at: now,
        };
        let saved = store.save_report(report).await.unwrap();
        assert!(!saved.id.is_empty());
        assert_eq!(store.list_reports().await.unwrap().len(), 1);
    }
}
