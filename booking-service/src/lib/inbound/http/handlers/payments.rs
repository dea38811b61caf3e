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
use crate::domain::booking::models::BookingId;
use crate::domain::payment::errors::PaymentError;
use crate::domain::payment::models::Amount;
use crate::domain::payment::models::CreatePaymentCommand;
use crate::domain::payment::models::Payment;
use crate::domain::payment::models::PaymentId;
use crate::domain::payment::models::PaymentMethod;
use crate::domain::payment::models::PaymentStatus;
use crate::domain::payment::models::UpdatePaymentCommand;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentResponse {
    pub id: String,
    pub booking_id: String,
    pub amount: f64,
    pub method: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Payment> for PaymentResponse {
    fn from(payment: &Payment) -> Self {
        Self {
            id: payment.id.to_string(),
            booking_id: payment.booking_id.to_string(),
            amount: payment.amount.get(),
            method: payment.method.as_str().to_string(),
            status: payment.status.as_str().to_string(),
            created_at: payment.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatePaymentRequest {
    booking_id: String,
    amount: f64,
    method: String,
    status: Option<String>,
}

impl CreatePaymentRequest {
    fn try_into_command(self) -> Result<CreatePaymentCommand, PaymentError> {
        Ok(CreatePaymentCommand {
            booking_id: BookingId::from_string(&self.booking_id)?,
            amount: Amount::new(self.amount)?,
            method: self.method.parse::<PaymentMethod>()?,
            status: self
                .status
                .as_deref()
                .map(str::parse::<PaymentStatus>)
                .transpose()?
                .unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UpdatePaymentRequest {
    amount: Option<f64>,
    method: Option<String>,
    status: Option<String>,
}

impl UpdatePaymentRequest {
    fn try_into_command(self) -> Result<UpdatePaymentCommand, PaymentError> {
        Ok(UpdatePaymentCommand {
            amount: self.amount.map(Amount::new).transpose()?,
            method: self
                .method
                .as_deref()
                .map(str::parse::<PaymentMethod>)
                .transpose()?,
            status: self
                .status
                .as_deref()
                .map(str::parse::<PaymentStatus>)
                .transpose()?,
        })
    }
}

pub async fn list_payments(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<PaymentResponse>>, ApiError> {
    let payments = state.payment_service.list_payments().await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        payments.iter().map(PaymentResponse::from).collect(),
    ))
}

pub async fn create_payment(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    JsonBody(body): JsonBody<CreatePaymentRequest>,
) -> Result<ApiSuccess<PaymentResponse>, ApiError> {
    let command = body.try_into_command()?;

    state
        .payment_service
        .create_payment(&current.user_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref payment| ApiSuccess::new(StatusCode::CREATED, payment.into()))
}

pub async fn get_payment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<PaymentResponse>, ApiError> {
    let payment_id = PaymentId::from_string(&id).map_err(PaymentError::from)?;

    state
        .payment_service
        .get_payment(&payment_id)
        .await
        .map_err(ApiError::from)
        .map(|ref payment| ApiSuccess::new(StatusCode::OK, payment.into()))
}

pub async fn update_payment(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<UpdatePaymentRequest>,
) -> Result<ApiSuccess<PaymentResponse>, ApiError> {
    let payment_id = PaymentId::from_string(&id).map_err(PaymentError::from)?;
    let command = body.try_into_command()?;

    state
        .payment_service
        .update_payment(&current.user_id, &payment_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref payment| ApiSuccess::new(StatusCode::OK, payment.into()))
}

pub async fn delete_payment(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let payment_id = PaymentId::from_string(&id).map_err(PaymentError::from)?;

    state
        .payment_service
        .delete_payment(&current.user_id, &payment_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
