//! Cron scheduler for the retention sweep and the daily sales report.

use std::sync::Arc;

use serde_json::Value;
use tokio_cron_scheduler::{Job as CronJob, JobScheduler};
use tracing;

use dinehub_core::config::AppConfig;
use dinehub_core::error::AppError;

use crate::executor::JobExecutor;
use crate::jobs::{DAILY_SALES_REPORT, RETENTION_SWEEP};

/// Cron-based scheduler for periodic background tasks
pub struct CronScheduler {
    /// The underlying job scheduler
    scheduler: JobScheduler,
    /// Executor the scheduled jobs are dispatched to
    executor: Arc<JobExecutor>,
}

impl std::fmt::Debug for CronScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CronScheduler").finish()
    }
}

impl CronScheduler {
    /// Create a new cron scheduler
    pub async fn new(executor: Arc<JobExecutor>) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {e}")))?;

        Ok(Self {
            scheduler,
            executor,
        })
    }

    /// Register the scheduled tasks enabled in configuration
    pub async fn register_configured_tasks(&self, config: &AppConfig) -> Result<(), AppError> {
        if config.retention.enabled {
            self.register(RETENTION_SWEEP, &config.retention.schedule)
                .await?;
        } else {
            tracing::info!("Retention sweep disabled");
        }

        if config.reports.enabled {
            self.register(DAILY_SALES_REPORT, &config.reports.schedule)
                .await?;
        } else {
            tracing::info!("Daily sales report disabled");
        }

        Ok(())
    }

    /// Start the scheduler
    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {e}")))?;

        tracing::info!("Cron scheduler started");
        Ok(())
    }

    /// Shutdown the scheduler
    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {e}")))?;

        tracing::info!("Cron scheduler shut down");
        Ok(())
    }

    /// Run `job_type` through the executor on every `schedule` tick
    async fn register(&self, job_type: &'static str, schedule: &str) -> Result<(), AppError> {
        let executor = Arc::clone(&self.executor);
        let job = CronJob::new_async(schedule, move |_uuid, _lock| {
            let executor = Arc::clone(&executor);
            Box::pin(async move {
                tracing::debug!(job_type, "Scheduled job firing");
                match executor.execute(job_type, &Value::Null).await {
                    Ok(output) => {
                        tracing::info!(job_type, output = ?output, "Scheduled job finished");
                    }
                    Err(e) if e.is_transient() => {
                        tracing::warn!(job_type, error = %e, "Scheduled job failed, next run will retry");
                    }
                    Err(e) => {
                        tracing::error!(job_type, error = %e, "Scheduled job failed");
                    }
                }
            })
        })
        .map_err(|e| {
            AppError::configuration(format!(
                "Invalid schedule '{schedule}' for {job_type}: {e}"
            ))
        })?;

        self.scheduler.add(job).await.map_err(|e| {
            AppError::internal(format!("Failed to add {job_type} schedule: {e}"))
        })?;

        tracing::info!(job_type, schedule, "Registered scheduled task");
        Ok(())
    }
}
