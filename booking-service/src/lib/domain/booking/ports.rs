use async_trait::async_trait;

use crate::domain::booking::errors::BookingError;
use crate::domain::booking::models::Booking;
use crate::domain::booking::models::BookingId;
use crate::domain::booking::models::CreateBookingCommand;
use crate::domain::booking::models::UpdateBookingCommand;
use crate::domain::user::models::UserId;

/// Port for booking domain service operations.
///
/// Mutations take the acting user, who is credited in the activity log.
#[async_trait]
pub trait BookingServicePort: Send + Sync + 'static {
    /// # Errors
    /// * `SlotUnavailable` - The space is already held for an overlapping slot
    /// * `UnknownUser` / `UnknownSpace` - Referenced entity does not exist
    /// * `DatabaseError` - Database operation failed
    async fn create_booking(
        &self,
        actor: &UserId,
        command: CreateBookingCommand,
    ) -> Result<Booking, BookingError>;

    /// # Errors
    /// * `NotFound` - Booking does not exist
    async fn get_booking(&self, id: &BookingId) -> Result<Booking, BookingError>;

    async fn list_bookings(&self) -> Result<Vec<Booking>, BookingError>;

    /// # Errors
    /// * `NotFound` - Booking does not exist
    /// * `InvalidTimeSlot` - Resulting slot ends before it starts
    /// * `SlotUnavailable` - The space is already held for an overlapping slot
    async fn update_booking(
        &self,
        actor: &UserId,
        id: &BookingId,
        command: UpdateBookingCommand,
    ) -> Result<Booking, BookingError>;

    /// Delete a booking together with its payment.
    ///
    /// # Errors
    /// * `NotFound` - Booking does not exist
    async fn delete_booking(&self, actor: &UserId, id: &BookingId) -> Result<(), BookingError>;
}

/// Persistence operations for bookings.
///
/// `create` and `update` must reject, atomically with the write, a booking
/// that conflicts with a stored one (see [`Booking::conflicts_with`]).
#[async_trait]
pub trait BookingRepository: Send + Sync + 'static {
    /// # Errors
    /// * `SlotUnavailable` - Conflicts with a stored booking
    /// * `UnknownUser` / `UnknownSpace` - Referenced entity does not exist
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, booking: Booking) -> Result<Booking, BookingError>;

    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, BookingError>;

    /// All bookings ordered by start time.
    async fn list_all(&self) -> Result<Vec<Booking>, BookingError>;

    /// # Errors
    /// * `NotFound` - Booking does not exist
    /// * `SlotUnavailable` - Conflicts with a stored booking
    /// * `UnknownSpace` - Referenced space does not exist
    async fn update(&self, booking: Booking) -> Result<Booking, BookingError>;

    /// # Errors
    /// * `NotFound` - Booking does not exist
    async fn delete(&self, id: &BookingId) -> Result<(), BookingError>;
}
