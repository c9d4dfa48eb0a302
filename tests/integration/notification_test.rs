//! Integration tests for the notification feed.

mod helpers;

use chrono::{Duration, Utc};

use dinehub_core::config::AppConfig;
use dinehub_core::error::ErrorKind;
use dinehub_core::types::PageRequest;
use dinehub_entity::{NotificationKind, OrderStatus, ReservationStatus};

use helpers::TestApp;

fn seed(app: &TestApp) {
    let now = Utc::now();
    app.seed_reservation(
        "Nguyễn Văn Anh",
        "0988994799",
        ReservationStatus::Pending,
        now - Duration::hours(2),
    );
    app.seed_order(OrderStatus::Confirmed, now - Duration::minutes(1));
    app.seed_contact("No Date", None);
    app.seed_contact("Hà", Some(now - Duration::hours(1)));
    app.seed_feedback("Old Review", 2, None);
    app.seed_feedback("Linh", 5, Some(now));
}

#[tokio::test]
async fn test_feed_is_sorted_newest_first_with_nulls_last() {
    let app = TestApp::new();
    seed(&app);

    let feed = app.notifications.get_notification_feed(Some(10)).await.unwrap();

    let titles: Vec<&str> = feed.items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(
        titles,
        [
            "Feedback: Linh (5/5)",
            "Order T-100: Table 9",
            "Contact: Hà",
            "Reservation: Nguyễn Văn Anh",
            "Contact: No Date",
            "Feedback: Old Review (2/5)",
        ]
    );
    assert_eq!(feed.items[1].status_label, "Confirmed");
    assert_eq!(feed.items[3].status_label, "Pending");
}

#[tokio::test]
async fn test_default_limit_and_see_more() {
    let app = TestApp::new();
    let now = Utc::now();
    for i in 0..15 {
        app.seed_contact(&format!("Guest {i:02}"), Some(now - Duration::minutes(i)));
    }

    let head = app.notifications.get_notification_feed(None).await.unwrap();
    assert_eq!(head.items.len(), app.config.notifications.default_limit);
    assert_eq!(head.total_items, 15);

    let rest = app
        .notifications
        .see_more(PageRequest::new(2, 10))
        .await
        .unwrap();
    assert_eq!(rest.items.len(), 5);
    assert_eq!(rest.items[0].title, "Contact: Guest 10");
    assert!(!rest.has_next);
}

#[tokio::test]
async fn test_fail_fast_surfaces_source_failure() {
    let app = TestApp::new();
    seed(&app);
    app.faults.fail("list_feedback");

    let err = app
        .notifications
        .get_notification_feed(None)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::SourceFetchFailure);
    assert!(err.message.contains("feedback"));
}

#[tokio::test]
async fn test_tolerant_mode_uses_remaining_sources() {
    let mut config = AppConfig::default();
    config.notifications.tolerate_source_failures = true;
    let app = TestApp::with_config(config);
    seed(&app);
    app.faults.fail("list_reservations");

    let feed = app.notifications.get_notification_feed(None).await.unwrap();

    assert_eq!(feed.failed_sources, [NotificationKind::Reservation]);
    assert_eq!(feed.total_items, 5);
    assert!(
        feed.items
            .iter()
            .all(|i| i.kind != NotificationKind::Reservation)
    );
}
