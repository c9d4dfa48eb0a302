//! Sweep failure modes.

use thiserror::Error;

use dinehub_core::error::{AppError, ErrorKind};
use dinehub_entity::CleanupResult;

/// Why a retention sweep did not finish.
#[derive(Debug, Error)]
pub enum SweepError {
    /// Another sweep holds the guard or the store lease.
    #[error("A retention sweep is already running")]
    InProgress,

    /// A store call failed part-way. Work already done stays done.
    #[error(
        "Retention sweep stopped after deleting {} and archiving {} orders",
        completed.cancelled_deleted,
        completed.orders_archived
    )]
    Partial {
        /// Counts of records fully processed before the failure.
        completed: CleanupResult,
        /// The store error that ended the sweep.
        #[source]
        source: AppError,
    },
}

impl SweepError {
    /// Counts completed before the sweep ended.
    pub fn completed(&self) -> CleanupResult {
        match self {
            Self::InProgress => CleanupResult::default(),
            Self::Partial { completed, .. } => *completed,
        }
    }
}

impl From<SweepError> for AppError {
    fn from(err: SweepError) -> Self {
        let message = err.to_string();
        match err {
            SweepError::InProgress => AppError::sweep_in_progress(message),
            SweepError::Partial { source, .. } => {
                AppError::with_source(ErrorKind::PartialSweepFailure, message, source)
            }
        }
    }
}
