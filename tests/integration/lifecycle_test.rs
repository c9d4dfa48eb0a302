//! Integration tests for reservation and order status transitions.

mod helpers;

use chrono::{NaiveDate, NaiveTime, Utc};

use dinehub_core::error::ErrorKind;
use dinehub_entity::{CreateReservation, OrderStatus, ReservationStatus};
use dinehub_store::{ChangeFeed, ChangeKind, Collection, RecordStore};

use helpers::TestApp;

#[tokio::test]
async fn test_book_then_confirm_reservation() {
    let app = TestApp::new();

    let booked = app
        .reservations
        .book_reservation(CreateReservation {
            customer_name: "Nguyễn Văn Anh".to_string(),
            customer_phone: "0988 994 799".to_string(),
            number_of_guests: 6,
            reservation_date: NaiveDate::from_ymd_opt(2024, 12, 24).unwrap(),
            reservation_time: NaiveTime::from_hms_opt(19, 30, 0).unwrap(),
            notes: Some("Birthday".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(booked.status, ReservationStatus::Pending);

    let confirmed = app
        .reservations
        .transition_reservation(&booked.id, ReservationStatus::Confirmed)
        .await
        .unwrap();
    assert_eq!(confirmed.status, ReservationStatus::Confirmed);
    assert!(confirmed.updated_at.is_some());
}

#[tokio::test]
async fn test_confirmed_reservation_cannot_be_cancelled() {
    let app = TestApp::new();
    let r = app.seed_reservation("Bình", "0912345678", ReservationStatus::Confirmed, Utc::now());

    let err = app
        .reservations
        .transition_reservation(&r.id, ReservationStatus::Cancelled)
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::InvalidTransition);
    assert_eq!(app.faults.calls("update_reservation_status"), 0);
    let stored = app.memory.get_reservation(&r.id).await.unwrap().unwrap();
    assert_eq!(stored.status, ReservationStatus::Confirmed);
}

#[tokio::test]
async fn test_cancelled_reservation_cannot_be_confirmed() {
    let app = TestApp::new();
    let r = app.seed_reservation("Bình", "0912345678", ReservationStatus::Cancelled, Utc::now());

    let err = app
        .reservations
        .transition_reservation(&r.id, ReservationStatus::Confirmed)
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::InvalidTransition);
    let stored = app.memory.get_reservation(&r.id).await.unwrap().unwrap();
    assert_eq!(stored.status, ReservationStatus::Cancelled);
}

#[tokio::test]
async fn test_order_walks_the_kitchen_flow() {
    let app = TestApp::new();
    let order = app.seed_order(OrderStatus::Pending, Utc::now());

    for step in [
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::Completed,
    ] {
        app.orders.transition_order(&order.id, step).await.unwrap();
    }

    let err = app
        .orders
        .transition_order(&order.id, OrderStatus::Cancelled)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidTransition);
}

#[tokio::test]
async fn test_transition_publishes_one_change() {
    let app = TestApp::new();
    let order = app.seed_order(OrderStatus::Pending, Utc::now());
    let mut events = app.memory.subscribe();

    app.orders
        .transition_order(&order.id, OrderStatus::Cancelled)
        .await
        .unwrap();

    let event = events.recv().await.unwrap();
    assert_eq!(event.collection, Collection::Orders);
    assert_eq!(event.record_id, order.id);
    assert_eq!(event.change, ChangeKind::Updated);
    assert!(events.try_recv().is_err());
}
