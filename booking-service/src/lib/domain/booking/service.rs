use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::activity::models::actions;
use crate::domain::activity::ports::ActivityRecorder;
use crate::domain::booking::errors::BookingError;
use crate::domain::booking::models::Booking;
use crate::domain::booking::models::BookingId;
use crate::domain::booking::models::CreateBookingCommand;
use crate::domain::booking::models::TimeSlot;
use crate::domain::booking::models::UpdateBookingCommand;
use crate::domain::booking::ports::BookingRepository;
use crate::domain::booking::ports::BookingServicePort;
use crate::domain::user::models::UserId;

pub struct BookingService<BR, AR>
where
    BR: BookingRepository,
    AR: ActivityRecorder,
{
    repository: Arc<BR>,
    activity: Arc<AR>,
}

impl<BR, AR> BookingService<BR, AR>
where
    BR: BookingRepository,
    AR: ActivityRecorder,
{
    pub fn new(repository: Arc<BR>, activity: Arc<AR>) -> Self {
        Self {
            repository,
            activity,
        }
    }
}

#[async_trait]
impl<BR, AR> BookingServicePort for BookingService<BR, AR>
where
    BR: BookingRepository,
    AR: ActivityRecorder,
{
    async fn create_booking(
        &self,
        actor: &UserId,
        command: CreateBookingCommand,
    ) -> Result<Booking, BookingError> {
        let booking = Booking {
            id: BookingId::new(),
            user_id: command.user_id,
            space_id: command.space_id,
            slot: command.slot,
            status: command.status,
        };

        let created = self.repository.create(booking).await?;

        self.activity
            .record(
                actor,
                actions::BOOKING_CREATED,
                format!(
                    "Booking {} of space {} from {} to {}",
                    created.id,
                    created.space_id,
                    created.slot.starts_at().to_rfc3339(),
                    created.slot.ends_at().to_rfc3339()
                ),
            )
            .await;

        Ok(created)
    }

    async fn get_booking(&self, id: &BookingId) -> Result<Booking, BookingError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(BookingError::NotFound(id.to_string()))
    }

    async fn list_bookings(&self) -> Result<Vec<Booking>, BookingError> {
        self.repository.list_all().await
    }

    async fn update_booking(
        &self,
        actor: &UserId,
        id: &BookingId,
        command: UpdateBookingCommand,
    ) -> Result<Booking, BookingError> {
        let mut booking = self.get_booking(id).await?;

        if command.starts_at.is_some() || command.ends_at.is_some() {
            booking.slot = TimeSlot::new(
                command.starts_at.unwrap_or(booking.slot.starts_at()),
                command.ends_at.unwrap_or(booking.slot.ends_at()),
            )?;
        }

        if let Some(space_id) = command.space_id {
            booking.space_id = space_id;
        }

        if let Some(status) = command.status {
            booking.status = status;
        }

        let updated = self.repository.update(booking).await?;

        self.activity
            .record(
                actor,
                actions::BOOKING_UPDATED,
                format!("Booking {} is now {}", updated.id, updated.status),
            )
            .await;

        Ok(updated)
    }

    async fn delete_booking(&self, actor: &UserId, id: &BookingId) -> Result<(), BookingError> {
        self.repository.delete(id).await?;

        self.activity
            .record(actor, actions::BOOKING_DELETED, format!("Booking {} deleted", id))
            .await;

        Ok(())
    }
}
