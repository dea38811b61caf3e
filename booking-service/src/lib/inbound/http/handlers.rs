use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;
use serde_json::json;

use crate::activity::errors::ActivityLogError;
use crate::booking::errors::BookingError;
use crate::payment::errors::PaymentError;
use crate::space::errors::SpaceError;
use crate::user::errors::UserError;

pub mod auth;
pub mod bookings;
pub mod logs;
pub mod payments;
pub mod ping;
pub mod spaces;
pub mod users;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// `{"message": ...}` acknowledgement body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// JSON body extractor whose rejections use the API error shape.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => ApiError::NotFound(err.to_string()),
            UserError::EmailAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            UserError::InvalidCredentials | UserError::IncorrectCurrentPassword => {
                ApiError::Unauthorized(err.to_string())
            }
            UserError::InvalidUserId(_)
            | UserError::InvalidName(_)
            | UserError::InvalidEmail(_)
            | UserError::InvalidPassword(_)
            | UserError::InvalidRoleId(_)
            | UserError::UnknownRole(_) => ApiError::BadRequest(err.to_string()),
            UserError::Password(_) | UserError::Token(_) | UserError::DatabaseError(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<SpaceError> for ApiError {
    fn from(err: SpaceError) -> Self {
        match err {
            SpaceError::NotFound(_) => ApiError::NotFound(err.to_string()),
            SpaceError::InvalidSpaceId(_)
            | SpaceError::InvalidName(_)
            | SpaceError::InvalidCapacity(_)
            | SpaceError::InvalidLocation(_) => ApiError::BadRequest(err.to_string()),
            SpaceError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<BookingError> for ApiError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::NotFound(_) => ApiError::NotFound(err.to_string()),
            BookingError::SlotUnavailable(_) => ApiError::Conflict(err.to_string()),
            BookingError::InvalidBookingId(_)
            | BookingError::InvalidUserId(_)
            | BookingError::InvalidSpaceId(_)
            | BookingError::InvalidTimeSlot(_)
            | BookingError::InvalidStatus(_)
            | BookingError::UnknownUser(_)
            | BookingError::UnknownSpace(_) => ApiError::BadRequest(err.to_string()),
            BookingError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<PaymentError> for ApiError {
    fn from(err: PaymentError) -> Self {
        match err {
            PaymentError::NotFound(_) => ApiError::NotFound(err.to_string()),
            PaymentError::AlreadyExistsForBooking(_) => ApiError::Conflict(err.to_string()),
            PaymentError::InvalidPaymentId(_)
            | PaymentError::InvalidBookingId(_)
            | PaymentError::InvalidAmount(_)
            | PaymentError::InvalidMethod(_)
            | PaymentError::InvalidStatus(_)
            | PaymentError::UnknownBooking(_) => ApiError::BadRequest(err.to_string()),
            PaymentError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<ActivityLogError> for ApiError {
    fn from(err: ActivityLogError) -> Self {
        match err {
            ActivityLogError::InvalidAction(_)
            | ActivityLogError::InvalidUserId(_)
            | ActivityLogError::UnknownUser(_) => ApiError::BadRequest(err.to_string()),
            ActivityLogError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}
