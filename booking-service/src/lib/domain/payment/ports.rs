use async_trait::async_trait;

use crate::domain::payment::errors::PaymentError;
use crate::domain::payment::models::CreatePaymentCommand;
use crate::domain::payment::models::Payment;
use crate::domain::payment::models::PaymentId;
use crate::domain::payment::models::UpdatePaymentCommand;
use crate::domain::user::models::UserId;

/// Port for payment domain service operations.
#[async_trait]
pub trait PaymentServicePort: Send + Sync + 'static {
    /// # Errors
    /// * `AlreadyExistsForBooking` - The booking already has a payment
    /// * `UnknownBooking` - Referenced booking does not exist
    /// * `DatabaseError` - Database operation failed
    async fn create_payment(
        &self,
        actor: &UserId,
        command: CreatePaymentCommand,
    ) -> Result<Payment, PaymentError>;

    /// # Errors
    /// * `NotFound` - Payment does not exist
    async fn get_payment(&self, id: &PaymentId) -> Result<Payment, PaymentError>;

    async fn list_payments(&self) -> Result<Vec<Payment>, PaymentError>;

    /// # Errors
    /// * `NotFound` - Payment does not exist
    async fn update_payment(
        &self,
        actor: &UserId,
        id: &PaymentId,
        command: UpdatePaymentCommand,
    ) -> Result<Payment, PaymentError>;

    /// # Errors
    /// * `NotFound` - Payment does not exist
    async fn delete_payment(&self, actor: &UserId, id: &PaymentId) -> Result<(), PaymentError>;
}

/// Persistence operations for payments.
#[async_trait]
pub trait PaymentRepository: Send + Sync + 'static {
    /// # Errors
    /// * `AlreadyExistsForBooking` - The booking already has a payment
    /// * `UnknownBooking` - Referenced booking does not exist
    async fn create(&self, payment: Payment) -> Result<Payment, PaymentError>;

    async fn find_by_id(&self, id: &PaymentId) -> Result<Option<Payment>, PaymentError>;

    /// All payments, newest first.
    async fn list_all(&self) -> Result<Vec<Payment>, PaymentError>;

    /// # Errors
    /// * `NotFound` - Payment does not exist
    async fn update(&self, payment: Payment) -> Result<Payment, PaymentError>;

    /// # Errors
    /// * `NotFound` - Payment does not exist
    async fn delete(&self, id: &PaymentId) -> Result<(), PaymentError>;
}
