//! DineHub Server: restaurant operations scheduler daemon
//!
//! Main entry point that wires the store, services and scheduler together
//! and runs until a shutdown signal arrives.

use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tracing;
use tracing_subscriber::{EnvFilter, fmt};

use dinehub_core::config::AppConfig;
use dinehub_core::error::AppError;
use dinehub_service::{RetentionEngine, SalesReportService};
use dinehub_store::{ChangeFeed, MemoryStore, RecordStore, TimedStore};
use dinehub_worker::jobs::{ReportJobHandler, RetentionJobHandler};
use dinehub_worker::{CronScheduler, JobExecutor};

#[tokio::main]
async fn main() {
    let env = std::env::var("DINEHUB_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting DineHub v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Record store ─────────────────────────────────────
    let memory = MemoryStore::new(config.store.event_buffer);
    let store: Arc<dyn RecordStore> = Arc::new(TimedStore::new(
        memory.clone(),
        config.store.timeout(),
    ));
    tracing::info!(
        timeout_ms = config.store.timeout_ms,
        "Record store initialized"
    );

    // ── Step 2: Change feed logger ───────────────────────────────
    let mut events = memory.subscribe();
    let events_handle = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => tracing::debug!(
                    collection = %event.collection,
                    record_id = %event.record_id,
                    change = ?event.change,
                    "Store change"
                ),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Change feed lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    // ── Step 3: Services ─────────────────────────────────────────
    let retention = RetentionEngine::new(Arc::clone(&store), &config.retention);
    let reports = SalesReportService::new(Arc::clone(&store));

    // ── Step 4: Jobs and scheduler ───────────────────────────────
    let mut executor = JobExecutor::new();
    executor.register(Arc::new(RetentionJobHandler::new(retention.clone())));
    executor.register(Arc::new(ReportJobHandler::new(reports)));
    let executor = Arc::new(executor);

    let mut scheduler = CronScheduler::new(Arc::clone(&executor)).await?;
    scheduler.register_configured_tasks(&config).await?;
    scheduler.start().await?;

    tracing::info!(jobs = ?executor.registered_types(), "DineHub server running");

    // ── Step 5: Wait for shutdown ────────────────────────────────
    shutdown_signal().await;
    tracing::info!("Shutdown signal received, starting graceful shutdown...");

    retention.request_stop();
    scheduler.shutdown().await?;
    events_handle.abort();

    tracing::info!("DineHub server shut down gracefully");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
