use thiserror::Error;

use crate::domain::booking::errors::BookingIdError;

/// Error for PaymentId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PaymentIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AmountError {
    #[error("Amount must not be negative, got {0}")]
    Negative(f64),

    #[error("Amount must be a finite number")]
    NotFinite,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PaymentMethodError {
    #[error("Unknown payment method '{0}' (expected card, cash or transfer)")]
    Unknown(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PaymentStatusError {
    #[error("Unknown payment status '{0}' (expected pending, paid, refunded or failed)")]
    Unknown(String),
}

/// Top-level error for all payment-related operations
#[derive(Debug, Clone, Error)]
pub enum PaymentError {
    #[error("Invalid payment ID: {0}")]
    InvalidPaymentId(#[from] PaymentIdError),

    #[error("Invalid booking ID: {0}")]
    InvalidBookingId(#[from] BookingIdError),

    #[error("Invalid amount: {0}")]
    InvalidAmount(#[from] AmountError),

    #[error("Invalid payment method: {0}")]
    InvalidMethod(#[from] PaymentMethodError),

    #[error("Invalid payment status: {0}")]
    InvalidStatus(#[from] PaymentStatusError),

    #[error("Payment not found: {0}")]
    NotFound(String),

    #[error("Booking {0} already has a payment")]
    AlreadyExistsForBooking(String),

    #[error("Booking does not exist: {0}")]
    UnknownBooking(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
