//! Retention sweep job handler.

use async_trait::async_trait;
use serde_json::Value;
use tracing;

use dinehub_service::{RetentionEngine, SweepError};

use super::RETENTION_SWEEP;
use crate::executor::{JobExecutionError, JobHandler};

/// Runs one retention sweep per job
#[derive(Debug, Clone)]
pub struct RetentionJobHandler {
    /// Sweep engine, shared with whoever may request a stop
    engine: RetentionEngine,
}

impl RetentionJobHandler {
    /// Create a new retention job handler
    pub fn new(engine: RetentionEngine) -> Self {
        Self { engine }
    }
}

#[async_trait]
impl JobHandler for RetentionJobHandler {
    fn job_type(&self) -> &str {
        RETENTION_SWEEP
    }

    async fn execute(&self, _payload: &Value) -> Result<Option<Value>, JobExecutionError> {
        tracing::info!("Running retention sweep");

        match self.engine.run_cleanup().await {
            Ok(result) => Ok(Some(serde_json::json!({
                "task": RETENTION_SWEEP,
                "cancelled_deleted": result.cancelled_deleted,
                "orders_archived": result.orders_archived,
                "stopped_early": result.stopped_early,
            }))),
            Err(SweepError::InProgress) => Err(JobExecutionError::Permanent(
                "Retention sweep already running".to_string(),
            )),
            Err(e @ SweepError::Partial { .. }) => {
                Err(JobExecutionError::Transient(e.to_string()))
            }
        }
    }
}
