//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

use dinehub_core::config::AppConfig;
use dinehub_entity::{
    Contact, ContactStatus, Feedback, Order, OrderItem, OrderStatus, ReservationStatus,
    TableReservation,
};
use dinehub_service::{
    NotificationAggregator, OrderLifecycle, ReservationLifecycle, RetentionEngine,
    SalesReportService,
};
use dinehub_store::fault::FaultyStore;
use dinehub_store::{MemoryStore, RecordStore, TimedStore};

/// Test application context
pub struct TestApp {
    /// The raw store, for seeding and direct inspection
    pub memory: MemoryStore,
    /// Fault injection layer between the services and the memory store
    pub faults: FaultyStore<MemoryStore>,
    /// Application config
    pub config: AppConfig,
    pub reservations: ReservationLifecycle,
    pub orders: OrderLifecycle,
    pub retention: RetentionEngine,
    pub notifications: NotificationAggregator,
    pub reports: SalesReportService,
}

impl TestApp {
    /// Create a new test application with default configuration
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a new test application
    ///
    /// Services see the store through the fault layer and a deadline, the
    /// way the server wires them.
    pub fn with_config(config: AppConfig) -> Self {
        let memory = MemoryStore::new(config.store.event_buffer);
        let faults = FaultyStore::new(memory.clone());
        let store: Arc<dyn RecordStore> =
            Arc::new(TimedStore::new(faults.clone(), config.store.timeout()));

        Self {
            reservations: ReservationLifecycle::new(Arc::clone(&store)),
            orders: OrderLifecycle::new(Arc::clone(&store)),
            retention: RetentionEngine::new(Arc::clone(&store), &config.retention),
            notifications: NotificationAggregator::new(
                Arc::clone(&store),
                config.notifications.clone(),
            ),
            reports: SalesReportService::new(store),
            memory,
            faults,
            config,
        }
    }

    /// Store timeout used by this app
    pub fn store_timeout(&self) -> StdDuration {
        self.config.store.timeout()
    }

    pub fn seed_order(&self, status: OrderStatus, created_at: DateTime<Utc>) -> Order {
        self.memory.insert_order(order(status, created_at))
    }

    pub fn seed_reservation(
        &self,
        name: &str,
        phone: &str,
        status: ReservationStatus,
        created_at: DateTime<Utc>,
    ) -> TableReservation {
        self.memory
            .insert_reservation(reservation(name, phone, status, created_at))
    }

    pub fn seed_contact(&self, name: &str, created_at: Option<DateTime<Utc>>) -> Contact {
        self.memory.insert_contact(Contact {
            id: String::new(),
            name: name.to_string(),
            email: "guest@example.com".to_string(),
            phone: String::new(),
            subject: "Question".to_string(),
            message: "Are you open on public holidays?".to_string(),
            status: ContactStatus::Unread,
            created_at,
        })
    }

    pub fn seed_feedback(
        &self,
        name: &str,
        rating: u8,
        created_at: Option<DateTime<Utc>>,
    ) -> Feedback {
        self.memory.insert_feedback(Feedback {
            id: String::new(),
            customer_name: name.to_string(),
            rating,
            comment: String::new(),
            hidden: false,
            created_at,
        })
    }
}

/// The instant `age_days` days before `now`
pub fn aged(now: DateTime<Utc>, age_days: i64) -> DateTime<Utc> {
    now - Duration::days(age_days)
}

pub fn order(status: OrderStatus, created_at: DateTime<Utc>) -> Order {
    Order {
        id: String::new(),
        order_code: "T-100".to_string(),
        table_id: "table-9".to_string(),
        table_number: 9,
        customer_name: "Vũ Lan".to_string(),
        items: vec![
            OrderItem {
                name: "Bánh mì".to_string(),
                quantity: 2,
                unit_price: 25_000,
            },
            OrderItem {
                name: "Trà đá".to_string(),
                quantity: 2,
                unit_price: 5_000,
            },
        ],
        status,
        created_at,
        updated_at: created_at,
        archived: false,
    }
}

pub fn reservation(
    name: &str,
    phone: &str,
    status: ReservationStatus,
    created_at: DateTime<Utc>,
) -> TableReservation {
    TableReservation {
        id: String::new(),
        customer_name: name.to_string(),
        customer_phone: phone.to_string(),
        number_of_guests: 3,
        reservation_date: NaiveDate::from_ymd_opt(2024, 9, 2).unwrap(),
        reservation_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
        notes: None,
        status,
        created_at,
        updated_at: None,
    }
}
