//! Error types for zonewise operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ZoneError {
    #[error("Invalid timezone '{zone}': {reason}")]
    InvalidTimezone { zone: String, reason: String },

    #[error("Invalid time format for '{input}'. Expected format: {format}")]
    InvalidFormat { input: String, format: String },

    #[error("Ambiguous local time {local} in '{zone}': it occurs twice across a DST transition")]
    AmbiguousLocalTime { local: String, zone: String },

    #[error("Nonexistent local time {local} in '{zone}': it falls inside a DST gap")]
    NonexistentLocalTime { local: String, zone: String },

    #[error("Local time {local} in '{zone}' is outside the supported date range")]
    OutOfRange { local: String, zone: String },

    #[error("No timezone database available")]
    NoZoneDatabase,
}

pub type Result<T> = std::result::Result<T, ZoneError>;
