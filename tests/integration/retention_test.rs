//! Integration tests for the retention sweep.

mod helpers;

use std::time::Duration;

use chrono::Utc;

use dinehub_core::error::{AppError, ErrorKind};
use dinehub_entity::OrderStatus;
use dinehub_service::SweepError;
use dinehub_store::{OrderQuery, RecordStore};

use helpers::{TestApp, aged};

#[tokio::test]
async fn test_scenario_purge_archive_and_keep() {
    let app = TestApp::new();
    let now = Utc::now();
    let a = app.seed_order(OrderStatus::Cancelled, aged(now, 10));
    let b = app.seed_order(OrderStatus::Completed, aged(now, 400));
    let c = app.seed_order(OrderStatus::Completed, aged(now, 10));

    let result = app.retention.run_cleanup_at(now).await.unwrap();

    assert_eq!(result.cancelled_deleted, 1);
    assert_eq!(result.orders_archived, 1);

    let live = app.memory.list_orders(&OrderQuery::all()).await.unwrap();
    let ids: Vec<&str> = live.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, [c.id.as_str()]);
    assert!(!ids.contains(&a.id.as_str()));

    let archived = app.memory.archived_order(&b.id).unwrap();
    assert!(archived.order.archived);
    assert_eq!(archived.order.status, OrderStatus::Completed);
    assert_eq!(archived.order.total(), b.total());
}

#[tokio::test]
async fn test_second_sweep_returns_zero_counts() {
    let app = TestApp::new();
    let now = Utc::now();
    app.seed_order(OrderStatus::Cancelled, aged(now, 30));
    app.seed_order(OrderStatus::Completed, aged(now, 700));

    let first = app.retention.run_cleanup_at(now).await.unwrap();
    assert_eq!(first.total(), 2);

    let second = app.retention.run_cleanup_at(now).await.unwrap();
    assert_eq!(second.cancelled_deleted, 0);
    assert_eq!(second.orders_archived, 0);
    assert_eq!(app.memory.archived_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_sweep_fails_with_in_progress() {
    let app = TestApp::new();
    app.faults.delay("list_orders", Duration::from_millis(200));

    let engine = app.retention.clone();
    let first = tokio::spawn(async move { engine.run_cleanup().await });
    while !app.retention.is_running() {
        tokio::task::yield_now().await;
    }

    let err: AppError = app.retention.run_cleanup().await.unwrap_err().into();
    assert_eq!(err.kind, ErrorKind::SweepInProgress);

    assert!(first.await.unwrap().is_ok());
}

#[tokio::test(start_paused = true)]
async fn test_timed_out_record_adds_no_count() {
    let app = TestApp::new();
    let now = Utc::now();
    app.seed_order(OrderStatus::Cancelled, aged(now, 30));
    app.seed_order(OrderStatus::Cancelled, aged(now, 30));
    app.faults
        .delay("delete_order", app.store_timeout() + Duration::from_secs(1));

    let err = app.retention.run_cleanup_at(now).await.unwrap_err();
    match err {
        SweepError::Partial { completed, source } => {
            assert_eq!(completed.cancelled_deleted, 0);
            assert_eq!(source.kind, ErrorKind::StoreTimeout);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_partial_failure_then_retry_finishes() {
    let app = TestApp::new();
    let now = Utc::now();
    for _ in 0..4 {
        app.seed_order(OrderStatus::Completed, aged(now, 500));
    }
    app.faults.fail_after("archive_order", 3);

    let err = app.retention.run_cleanup_at(now).await.unwrap_err();
    assert_eq!(err.completed().orders_archived, 3);
    let err: AppError = err.into();
    assert_eq!(err.kind, ErrorKind::PartialSweepFailure);
    assert_eq!(app.memory.order_count(), 1);

    app.faults.heal();
    let retry = app.retention.run_cleanup_at(now).await.unwrap();
    assert_eq!(retry.orders_archived, 1);
    assert_eq!(app.memory.order_count(), 0);
    assert_eq!(app.memory.archived_count(), 4);
}

#[tokio::test]
async fn test_archived_orders_still_count_in_reports() {
    let app = TestApp::new();
    let now = Utc::now();
    let old = app.seed_order(OrderStatus::Completed, aged(now, 400));
    app.retention.run_cleanup_at(now).await.unwrap();

    let day = old.created_at.date_naive();
    let report = app.reports.generate_daily(day).await.unwrap();
    assert_eq!(report.archived_orders_included, 1);
    assert_eq!(report.completed_revenue, old.total());
}
