use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain;
use crate::domain::booking::errors::BookingIdError;
use crate::domain::booking::errors::BookingStatusError;
use crate::domain::booking::errors::TimeSlotError;
use crate::domain::space::models::SpaceId;
use crate::domain::user::models::UserId;

/// Reservation of a space by a user for a time slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub id: BookingId,
    pub user_id: UserId,
    pub space_id: SpaceId,
    pub slot: TimeSlot,
    pub status: BookingStatus,
}

impl Booking {
    /// Whether both bookings hold the same space at the same time.
    ///
    /// Cancelled bookings never conflict, and a booking never conflicts with
    /// itself.
    pub fn conflicts_with(&self, other: &Booking) -> bool {
        self.id != other.id
            && self.space_id == other.space_id
            && self.status.holds_space()
            && other.status.holds_space()
            && self.slot.overlaps(&other.slot)
    }
}

/// Booking unique identifier value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BookingId(pub Uuid);

impl BookingId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a booking ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, BookingIdError> {
        Uuid::parse_str(s)
            .map(BookingId)
            .map_err(|e| BookingIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for BookingId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Half-open interval `[starts_at, ends_at)` with `ends_at > starts_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlot {
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
}

impl TimeSlot {
    /// # Errors
    /// * `EndNotAfterStart` - `ends_at` is not strictly after `starts_at`
    pub fn new(starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> Result<Self, TimeSlotError> {
        let starts_at = domain::stored_precision(starts_at);
        let ends_at = domain::stored_precision(ends_at);
        if ends_at <= starts_at {
            return Err(TimeSlotError::EndNotAfterStart { starts_at, ends_at });
        }

        Ok(Self { starts_at, ends_at })
    }

    pub fn starts_at(&self) -> DateTime<Utc> {
        self.starts_at
    }

    pub fn ends_at(&self) -> DateTime<Utc> {
        self.ends_at
    }

    /// Back-to-back slots (one ends when the other starts) do not overlap.
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.starts_at < other.ends_at && other.starts_at < self.ends_at
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
        }
    }

    /// Whether a booking in this status blocks the space for its slot.
    pub fn holds_space(&self) -> bool {
        !matches!(self, BookingStatus::Cancelled)
    }
}

impl FromStr for BookingStatus {
    type Err = BookingStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            "completed" => Ok(BookingStatus::Completed),
            _ => Err(BookingStatusError::Unknown(s.to_string())),
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
pub struct CreateBookingCommand {
    pub user_id: UserId,
    pub space_id: SpaceId,
    pub slot: TimeSlot,
    pub status: BookingStatus,
}

/// Partial update. Start and end are validated together against the stored
/// values, so moving only one edge is allowed.
#[derive(Debug, Default)]
pub struct UpdateBookingCommand {
    pub space_id: Option<SpaceId>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub status: Option<BookingStatus>,
}
