//! Record builders shared by the unit tests in this crate.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

use dinehub_entity::{
    Contact, ContactStatus, Feedback, Order, OrderItem, OrderStatus, ReservationStatus,
    TableReservation,
};

pub(crate) fn order(status: OrderStatus, created_at: DateTime<Utc>) -> Order {
    Order {
        id: String::new(),
        order_code: "A-001".to_string(),
        table_id: "table-4".to_string(),
        table_number: 4,
        customer_name: "Trần Minh".to_string(),
        items: vec![OrderItem {
            name: "Phở bò".to_string(),
            quantity: 2,
            unit_price: 55_000,
        }],
        status,
        created_at,
        updated_at: created_at,
        archived: false,
    }
}

pub(crate) fn aged_order(status: OrderStatus, now: DateTime<Utc>, age_days: i64) -> Order {
    order(status, now - Duration::days(age_days))
}

pub(crate) fn reservation(
    name: &str,
    phone: &str,
    status: ReservationStatus,
    created_at: DateTime<Utc>,
) -> TableReservation {
    TableReservation {
        id: String::new(),
        customer_name: name.to_string(),
        customer_phone: phone.to_string(),
        number_of_guests: 2,
        reservation_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        reservation_time: NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
        notes: None,
        status,
        created_at,
        updated_at: None,
    }
}

pub(crate) fn contact(name: &str, created_at: Option<DateTime<Utc>>) -> Contact {
    Contact {
        id: String::new(),
        name: name.to_string(),
        email: "guest@example.com".to_string(),
        phone: String::new(),
        subject: "Hello".to_string(),
        message: "Do you have vegetarian options?".to_string(),
        status: ContactStatus::Unread,
        created_at,
    }
}

pub(crate) fn feedback(name: &str, rating: u8, created_at: Option<DateTime<Utc>>) -> Feedback {
    Feedback {
        id: String::new(),
        customer_name: name.to_string(),
        rating,
        comment: "Great broth".to_string(),
        hidden: false,
        created_at,
    }
}
