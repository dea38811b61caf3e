use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::JsonBody;
use crate::domain::booking::errors::BookingError;
use crate::domain::booking::models::Booking;
use crate::domain::booking::models::BookingId;
use crate::domain::booking::models::BookingStatus;
use crate::domain::booking::models::CreateBookingCommand;
use crate::domain::booking::models::TimeSlot;
use crate::domain::booking::models::UpdateBookingCommand;
use crate::domain::space::models::SpaceId;
use crate::domain::user::models::UserId;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingResponse {
    pub id: String,
    pub user_id: String,
    pub space_id: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub status: String,
}

impl From<&Booking> for BookingResponse {
    fn from(booking: &Booking) -> Self {
        Self {
            id: booking.id.to_string(),
            user_id: booking.user_id.to_string(),
            space_id: booking.space_id.to_string(),
            starts_at: booking.slot.starts_at(),
            ends_at: booking.slot.ends_at(),
            status: booking.status.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateBookingRequest {
    user_id: Option<String>,
    space_id: String,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
    status: Option<String>,
}

impl CreateBookingRequest {
    /// A booking without an explicit owner is made for `current`.
    fn try_into_command(self, current: UserId) -> Result<CreateBookingCommand, BookingError> {
        let user_id = match self.user_id {
            Some(id) => UserId::from_string(&id)?,
            None => current,
        };

        Ok(CreateBookingCommand {
            user_id,
            space_id: SpaceId::from_string(&self.space_id)?,
            slot: TimeSlot::new(self.starts_at, self.ends_at)?,
            status: self
                .status
                .as_deref()
                .map(str::parse::<BookingStatus>)
                .transpose()?
                .unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateBookingRequest {
    space_id: Option<String>,
    starts_at: Option<DateTime<Utc>>,
    ends_at: Option<DateTime<Utc>>,
    status: Option<String>,
}

impl UpdateBookingRequest {
    fn try_into_command(self) -> Result<UpdateBookingCommand, BookingError> {
        Ok(UpdateBookingCommand {
            space_id: self
                .space_id
                .as_deref()
                .map(SpaceId::from_string)
                .transpose()?,
            starts_at: self.starts_at,
            ends_at: self.ends_at,
            status: self
                .status
                .as_deref()
                .map(str::parse::<BookingStatus>)
                .transpose()?,
        })
    }
}

pub async fn list_bookings(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<BookingResponse>>, ApiError> {
    let bookings = state.booking_service.list_bookings().await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        bookings.iter().map(BookingResponse::from).collect(),
    ))
}

pub async fn create_booking(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    JsonBody(body): JsonBody<CreateBookingRequest>,
) -> Result<ApiSuccess<BookingResponse>, ApiError> {
    let command = body.try_into_command(current.user_id)?;

    state
        .booking_service
        .create_booking(&current.user_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref booking| ApiSuccess::new(StatusCode::CREATED, booking.into()))
}

pub async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<BookingResponse>, ApiError> {
    let booking_id = BookingId::from_string(&id).map_err(BookingError::from)?;

    state
        .booking_service
        .get_booking(&booking_id)
        .await
        .map_err(ApiError::from)
        .map(|ref booking| ApiSuccess::new(StatusCode::OK, booking.into()))
}

pub async fn update_booking(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<UpdateBookingRequest>,
) -> Result<ApiSuccess<BookingResponse>, ApiError> {
    let booking_id = BookingId::from_string(&id).map_err(BookingError::from)?;
    let command = body.try_into_command()?;

    state
        .booking_service
        .update_booking(&current.user_id, &booking_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref booking| ApiSuccess::new(StatusCode::OK, booking.into()))
}

pub async fn delete_booking(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let booking_id = BookingId::from_string(&id).map_err(BookingError::from)?;

    state
        .booking_service
        .delete_booking(&current.user_id, &booking_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
