//! Error types for schedule building.

use thiserror::Error;

/// Errors that can occur while loading data or building a schedule.
#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Invalid date '{0}'")]
    InvalidDate(String),

    #[error("Invalid time '{0}'")]
    InvalidTime(String),

    #[error("Course group '{0}' not found")]
    UnknownGroup(String),

    #[error("Unknown timezone '{0}'")]
    UnknownTimezone(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for schedule operations.
pub type ScheduleResult<T> = Result<T, ScheduleError>;
