//! Unified application error types for DineHub.
//!
//! Every crate maps its internal failures into [`AppError`] so that the
//! caller (the presentation layer) sees one error type and can branch on
//! [`ErrorKind`] to decide between retrying and surfacing to the operator.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The requested record was not found.
    NotFound,
    /// Input validation failed.
    Validation,
    /// A conditional write lost a race against another writer.
    Conflict,
    /// A status change is not allowed by the lifecycle state machine.
    InvalidTransition,
    /// A retention sweep is already running.
    SweepInProgress,
    /// A retention sweep stopped part-way because the store failed.
    PartialSweepFailure,
    /// A store call exceeded its deadline.
    StoreTimeout,
    /// One of the notification sources could not be fetched.
    SourceFetchFailure,
    /// The backing store reported an error.
    Store,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// An internal error occurred.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::InvalidTransition => write!(f, "INVALID_TRANSITION"),
            Self::SweepInProgress => write!(f, "SWEEP_IN_PROGRESS"),
            Self::PartialSweepFailure => write!(f, "PARTIAL_SWEEP_FAILURE"),
            Self::StoreTimeout => write!(f, "STORE_TIMEOUT"),
            Self::SourceFetchFailure => write!(f, "SOURCE_FETCH_FAILURE"),
            Self::Store => write!(f, "STORE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout DineHub.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create an invalid-transition error.
    pub fn invalid_transition(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidTransition, message)
    }

    /// Create a sweep-in-progress error.
    pub fn sweep_in_progress(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SweepInProgress, message)
    }

    /// Create a store-timeout error.
    pub fn store_timeout(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::StoreTimeout, message)
    }

    /// Create a source-fetch-failure error.
    pub fn source_fetch(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SourceFetchFailure, message)
    }

    /// Create a store error.
    pub fn store(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Store, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Whether retrying the same call may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::StoreTimeout
                | ErrorKind::Store
                | ErrorKind::Conflict
                | ErrorKind::SweepInProgress
                | ErrorKind::PartialSweepFailure
                | ErrorKind::SourceFetchFailure
        )
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::with_source(ErrorKind::Validation, format!("Invalid input: {err}"), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_kind() {
        let err = AppError::invalid_transition("confirmed -> cancelled");
        assert_eq!(err.to_string(), "INVALID_TRANSITION: confirmed -> cancelled");
    }

    #[test]
    fn test_retryable_kinds() {
        assert!(AppError::store_timeout("slow").is_retryable());
        assert!(AppError::conflict("race").is_retryable());
        assert!(!AppError::invalid_transition("no").is_retryable());
        assert!(!AppError::not_found("gone").is_retryable());
    }

    #[test]
    fn test_clone_drops_source() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = AppError::from(json_err);
        assert!(err.source.is_some());
        let cloned = err.clone();
        assert_eq!(cloned.kind, ErrorKind::Serialization);
        assert!(cloned.source.is_none());
    }
}
