//! Single-flight retention sweep over the orders collection.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use dinehub_core::config::RetentionConfig;
use dinehub_core::error::AppError;
use dinehub_entity::{CleanupResult, Order, OrderStatus};
use dinehub_store::{OrderQuery, RecordStore};

use super::error::SweepError;
use super::policy::RetentionPolicy;

/// Store lease name shared by every scheduler instance.
const LEASE_NAME: &str = "retention-sweep";

#[derive(Debug, Clone)]
struct LeaseSettings {
    holder: String,
    ttl: Duration,
}

/// Purges expired cancelled orders and archives old completed ones.
///
/// At most one sweep runs per engine at a time; clones share the guard.
/// With `use_store_lease` the store lease extends that to every process
/// sharing the store.
#[derive(Clone)]
pub struct RetentionEngine {
    /// Backing record store.
    store: Arc<dyn RecordStore>,
    /// Thresholds and batch size.
    policy: RetentionPolicy,
    /// In-process single-flight guard.
    guard: Arc<Mutex<()>>,
    /// Set while a sweep holds the guard.
    running: Arc<AtomicBool>,
    /// Set by `request_stop`, checked between batches.
    stop: Arc<AtomicBool>,
    /// Cross-process lease, when enabled.
    lease: Option<LeaseSettings>,
}

impl std::fmt::Debug for RetentionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetentionEngine")
            .field("policy", &self.policy)
            .field("use_store_lease", &self.lease.is_some())
            .finish()
    }
}

impl RetentionEngine {
    /// Creates an engine from the `[retention]` configuration.
    pub fn new(store: Arc<dyn RecordStore>, config: &RetentionConfig) -> Self {
        let lease = config.use_store_lease.then(|| LeaseSettings {
            holder: Uuid::new_v4().to_string(),
            ttl: Duration::from_secs(config.lease_ttl_seconds),
        });

        Self {
            store,
            policy: RetentionPolicy::from_config(config),
            guard: Arc::new(Mutex::new(())),
            running: Arc::new(AtomicBool::new(false)),
            stop: Arc::new(AtomicBool::new(false)),
            lease,
        }
    }

    /// The active policy.
    pub fn policy(&self) -> &RetentionPolicy {
        &self.policy
    }

    /// Whether a sweep currently holds the guard.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Asks the running sweep to stop after its current batch.
    pub fn request_stop(&self) {
        if self.is_running() {
            info!("Retention sweep stop requested");
        }
        self.stop.store(true, Ordering::SeqCst);
    }

    /// Runs a sweep against the current time.
    pub async fn run_cleanup(&self) -> Result<CleanupResult, SweepError> {
        self.run_cleanup_at(Utc::now()).await
    }

    /// Runs a sweep treating `now` as the current time.
    pub async fn run_cleanup_at(&self, now: DateTime<Utc>) -> Result<CleanupResult, SweepError> {
        let _guard = self.guard.try_lock().map_err(|_| {
            debug!("Retention sweep skipped, another sweep holds the guard");
            SweepError::InProgress
        })?;
        let _running = RunningFlag::raise(&self.running);
        self.stop.store(false, Ordering::SeqCst);

        if let Some(lease) = &self.lease {
            let acquired = self
                .store
                .try_acquire_lease(LEASE_NAME, &lease.holder, lease.ttl)
                .await
                .map_err(|source| SweepError::Partial {
                    completed: CleanupResult::default(),
                    source,
                })?;
            if !acquired {
                debug!("Retention sweep skipped, lease held elsewhere");
                return Err(SweepError::InProgress);
            }
        }

        info!(%now, batch_size = self.policy.batch_size, "Retention sweep started");

        let outcome = self.sweep(now).await;

        if let Some(lease) = &self.lease {
            if let Err(e) = self.store.release_lease(LEASE_NAME, &lease.holder).await {
                warn!(error = %e, "Failed to release retention lease");
            }
        }

        match &outcome {
            Ok(result) => info!(
                cancelled_deleted = result.cancelled_deleted,
                orders_archived = result.orders_archived,
                stopped_early = result.stopped_early,
                "Retention sweep finished"
            ),
            Err(e) => warn!(
                error = %e,
                cancelled_deleted = e.completed().cancelled_deleted,
                orders_archived = e.completed().orders_archived,
                "Retention sweep failed"
            ),
        }

        outcome
    }

    async fn sweep(&self, now: DateTime<Utc>) -> Result<CleanupResult, SweepError> {
        let mut result = CleanupResult::default();

        let purgeable = self
            .candidates(
                OrderQuery::all()
                    .with_status(OrderStatus::Cancelled)
                    .created_before(self.policy.purge_cutoff(now)),
                |order| self.policy.is_purgeable(order, now),
                &result,
            )
            .await?;

        for batch in purgeable.chunks(self.policy.batch_size) {
            if self.stop_requested() {
                result.stopped_early = true;
                return Ok(result);
            }
            for order in batch {
                self.purge(order, &mut result).await?;
            }
        }

        let archivable = self
            .candidates(
                OrderQuery::all()
                    .with_status(OrderStatus::Completed)
                    .with_archived(false)
                    .created_before(self.policy.archive_cutoff(now)),
                |order| self.policy.is_archivable(order, now),
                &result,
            )
            .await?;

        for batch in archivable.chunks(self.policy.batch_size) {
            if self.stop_requested() {
                result.stopped_early = true;
                return Ok(result);
            }
            for order in batch {
                self.archive(order, now, &mut result).await?;
            }
        }

        Ok(result)
    }

    async fn candidates(
        &self,
        query: OrderQuery,
        keep: impl Fn(&Order) -> bool,
        result: &CleanupResult,
    ) -> Result<Vec<Order>, SweepError> {
        let orders = self
            .store
            .list_orders(&query)
            .await
            .map_err(|source| SweepError::Partial {
                completed: *result,
                source,
            })?;
        Ok(orders.into_iter().filter(|order| keep(order)).collect())
    }

    async fn purge(&self, order: &Order, result: &mut CleanupResult) -> Result<(), SweepError> {
        let deleted = self
            .store
            .delete_order(&order.id)
            .await
            .map_err(|source| self.record_failure(order, "purge", *result, source))?;

        if deleted {
            result.cancelled_deleted += 1;
            debug!(order_id = %order.id, "Purged cancelled order");
        } else {
            debug!(order_id = %order.id, "Cancelled order already gone");
        }
        Ok(())
    }

    async fn archive(
        &self,
        order: &Order,
        now: DateTime<Utc>,
        result: &mut CleanupResult,
    ) -> Result<(), SweepError> {
        self.store
            .archive_order(order, now)
            .await
            .map_err(|source| self.record_failure(order, "archive", *result, source))?;

        self.store
            .delete_order(&order.id)
            .await
            .map_err(|source| self.record_failure(order, "archive", *result, source))?;

        result.orders_archived += 1;
        debug!(order_id = %order.id, "Archived completed order");
        Ok(())
    }

    fn record_failure(
        &self,
        order: &Order,
        step: &'static str,
        completed: CleanupResult,
        source: AppError,
    ) -> SweepError {
        warn!(order_id = %order.id, step, error = %source, "Retention step failed");
        SweepError::Partial { completed, source }
    }

    fn stop_requested(&self) -> bool {
        self.stop.load(Ordering::SeqCst)
    }
}

/// Holds `running` high until dropped, including when the sweep future is
/// cancelled.
struct RunningFlag<'a>(&'a AtomicBool);

impl<'a> RunningFlag<'a> {
    fn raise(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for RunningFlag<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
