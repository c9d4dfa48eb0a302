//! Integration tests for reservation search over fetched records.

mod helpers;

use chrono::Utc;

use dinehub_entity::ReservationStatus;
use dinehub_service::{StatusFilter, filter_reservations};
use dinehub_store::{RecordStore, ReservationQuery};

use helpers::TestApp;

async fn seeded() -> (TestApp, Vec<dinehub_entity::TableReservation>) {
    let app = TestApp::new();
    let now = Utc::now();
    app.seed_reservation("Nguyễn Văn Anh", "0988994799", ReservationStatus::Pending, now);
    app.seed_reservation("Anh Tuấn", "0903 111 222", ReservationStatus::Confirmed, now);
    app.seed_reservation("Bình", "0912 345 678", ReservationStatus::Pending, now);

    let records = app
        .memory
        .list_reservations(&ReservationQuery::all())
        .await
        .unwrap();
    (app, records)
}

fn names(found: &[&dinehub_entity::TableReservation]) -> Vec<String> {
    found.iter().map(|r| r.customer_name.clone()).collect()
}

#[tokio::test]
async fn test_name_query_matches_tokens() {
    let (_app, records) = seeded().await;

    let found = filter_reservations(&records, "Anh", StatusFilter::All);
    assert_eq!(names(&found), ["Nguyễn Văn Anh", "Anh Tuấn"]);
}

#[tokio::test]
async fn test_phone_query_matches_digits() {
    let (_app, records) = seeded().await;

    let found = filter_reservations(&records, "799", StatusFilter::All);
    assert_eq!(names(&found), ["Nguyễn Văn Anh"]);
}

#[tokio::test]
async fn test_status_filter_narrows_text_matches() {
    let (_app, records) = seeded().await;

    let pending: StatusFilter = "pending".parse().unwrap();
    let found = filter_reservations(&records, "anh", pending);
    assert_eq!(names(&found), ["Nguyễn Văn Anh"]);

    let everyone = filter_reservations(&records, "", pending);
    assert_eq!(names(&everyone), ["Nguyễn Văn Anh", "Bình"]);
}
