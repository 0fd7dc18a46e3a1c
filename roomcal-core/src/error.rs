//! Error types for the roomcal ecosystem.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur in roomcal operations.
///
/// Two outcomes are deliberately NOT here: skipping already-booked dates
/// during a range commit is normal behavior, and canceling or editing a
/// day that is not booked is a no-op reported as `false`, not a failure.
#[derive(Error, Debug)]
pub enum RoomCalError {
    #[error("Invalid date range: {start} .. {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Not authorized to edit bookings")]
    Unauthorized,

    #[error("Unknown room: {0}")]
    UnknownRoom(String),

    #[error("Sync error: {0}")]
    Sync(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for roomcal operations.
pub type RoomCalResult<T> = Result<T, RoomCalError>;
