//! Error types for booking-engine operations.

use chrono::NaiveTime;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Invalid time '{text}': expected H:MM AM/PM")]
    InvalidTime { text: String },

    /// A source row that cannot be ingested. Aborts the whole load.
    #[error("Row {line}: {message}")]
    Row { line: usize, message: String },

    #[error("Invalid span for {space}: start {start} is not before end {end}")]
    InvalidSpan {
        space: String,
        start: NaiveTime,
        end: NaiveTime,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BookingError>;
