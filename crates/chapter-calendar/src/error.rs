//! Error types for chapter-calendar boundary operations.
//!
//! The grid, bucketing, lane and formatting computations never fail. Errors
//! only arise where untyped input enters the crate: timezone and locale
//! names, configuration files, and raw event rows from the store.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid locale: {0}")]
    InvalidLocale(String),

    #[error("Invalid instant: {0}")]
    InvalidInstant(String),

    #[error("Invalid month '{0}'. Expected YYYY-MM")]
    InvalidMonth(String),

    #[error("Invalid event {id}: {reason}")]
    InvalidEvent { id: i64, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CalendarError>;
