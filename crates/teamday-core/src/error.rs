//! Core error types for teamday-core.
//!
//! Scheduling failures are always recoverable: they surface here so callers
//! can log and move on, never so a create/edit flow can fail over a reminder.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for teamday-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Reminder backend errors
    #[error("Reminder error: {0}")]
    Reminder(#[from] ReminderError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from the notification store. These are the `SchedulingFailure`
/// class: transient, logged, retried at the next refresh.
#[derive(Error, Debug)]
pub enum ReminderError {
    /// The backend call failed
    #[error("Notification backend failed during {operation}: {message}")]
    Backend {
        operation: &'static str,
        message: String,
    },

    /// The backend call did not complete within the configured bound
    #[error("Notification backend timed out during {operation} after {timeout_secs}s")]
    Timeout {
        operation: &'static str,
        timeout_secs: u64,
    },
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Configuration directory cannot be used
    #[error("Failed to locate configuration directory: {0}")]
    DirUnavailable(String),
}

/// Validation errors. Raised per event at the feed boundary; one malformed
/// record never fails the batch it arrived in.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Invalid time range
    #[error("Invalid time range: end ({end}) must be greater than start ({start})")]
    InvalidTimeRange {
        start: chrono::DateTime<chrono::Utc>,
        end: chrono::DateTime<chrono::Utc>,
    },

    /// Required timestamp absent or unparseable
    #[error("Missing timestamp field '{field}' on {kind} {id}")]
    MissingTimestamp {
        kind: &'static str,
        id: String,
        field: &'static str,
    },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
