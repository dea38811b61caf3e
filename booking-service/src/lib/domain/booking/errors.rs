use chrono::DateTime;
use chrono::Utc;
use thiserror::Error;

use crate::domain::space::errors::SpaceIdError;
use crate::user::errors::UserIdError;

/// Error for BookingId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BookingIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TimeSlotError {
    #[error("End time {ends_at} must be after start time {starts_at}")]
    EndNotAfterStart {
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
    },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BookingStatusError {
    #[error("Unknown booking status '{0}' (expected pending, confirmed, cancelled or completed)")]
    Unknown(String),
}

/// Top-level error for all booking-related operations
#[derive(Debug, Clone, Error)]
pub enum BookingError {
    #[error("Invalid booking ID: {0}")]
    InvalidBookingId(#[from] BookingIdError),

    #[error("Invalid user ID: {0}")]
    InvalidUserId(#[from] UserIdError),

    #[error("Invalid space ID: {0}")]
    InvalidSpaceId(#[from] SpaceIdError),

    #[error("Invalid time slot: {0}")]
    InvalidTimeSlot(#[from] TimeSlotError),

    #[error("Invalid status: {0}")]
    InvalidStatus(#[from] BookingStatusError),

    #[error("Booking not found: {0}")]
    NotFound(String),

    #[error("Space {0} is already booked for an overlapping time slot")]
    SlotUnavailable(String),

    #[error("User does not exist: {0}")]
    UnknownUser(String),

    #[error("Space does not exist: {0}")]
    UnknownSpace(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
