use std::sync::Arc;

use async_trait::async_trait;

use crate::domain;
use crate::domain::activity::models::actions;
use crate::domain::activity::ports::ActivityRecorder;
use crate::domain::payment::errors::PaymentError;
use crate::domain::payment::models::CreatePaymentCommand;
use crate::domain::payment::models::Payment;
use crate::domain::payment::models::PaymentId;
use crate::domain::payment::models::UpdatePaymentCommand;
use crate::domain::payment::ports::PaymentRepository;
use crate::domain::payment::ports::PaymentServicePort;
use crate::domain::user::models::UserId;

pub struct PaymentService<PR, AR>
where
    PR: PaymentRepository,
    AR: ActivityRecorder,
{
    repository: Arc<PR>,
    activity: Arc<AR>,
}

impl<PR, AR> PaymentService<PR, AR>
where
    PR: PaymentRepository,
    AR: ActivityRecorder,
{
    pub fn new(repository: Arc<PR>, activity: Arc<AR>) -> Self {
        Self {
            repository,
            activity,
        }
    }
}

#[async_trait]
impl<PR, AR> PaymentServicePort for PaymentService<PR, AR>
where
    PR: PaymentRepository,
    AR: ActivityRecorder,
{
    async fn create_payment(
        &self,
        actor: &UserId,
        command: CreatePaymentCommand,
    ) -> Result<Payment, PaymentError> {
        let payment = Payment {
            id: PaymentId::new(),
            booking_id: command.booking_id,
            amount: command.amount,
            method: command.method,
            status: command.status,
            created_at: domain::now(),
        };

        let created = self.repository.create(payment).await?;

        self.activity
            .record(
                actor,
                actions::PAYMENT_CREATED,
                format!(
                    "Payment {} of {:.2} by {} for booking {}",
                    created.id,
                    created.amount.get(),
                    created.method.as_str(),
                    created.booking_id
                ),
            )
            .await;

        Ok(created)
    }

    async fn get_payment(&self, id: &PaymentId) -> Result<Payment, PaymentError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(PaymentError::NotFound(id.to_string()))
    }

    async fn list_payments(&self) -> Result<Vec<Payment>, PaymentError> {
        self.repository.list_all().await
    }

    async fn update_payment(
        &self,
        actor: &UserId,
        id: &PaymentId,
        command: UpdatePaymentCommand,
    ) -> Result<Payment, PaymentError> {
        let mut payment = self.get_payment(id).await?;

        if let Some(amount) = command.amount {
            payment.amount = amount;
        }

        if let Some(method) = command.method {
            payment.method = method;
        }

        if let Some(status) = command.status {
            payment.status = status;
        }

        let updated = self.repository.update(payment).await?;

        self.activity
            .record(
                actor,
                actions::PAYMENT_UPDATED,
                format!("Payment {} is now {}", updated.id, updated.status),
            )
            .await;

        Ok(updated)
    }

    async fn delete_payment(&self, actor: &UserId, id: &PaymentId) -> Result<(), PaymentError> {
        self.repository.delete(id).await?;

        self.activity
            .record(actor, actions::PAYMENT_DELETED, format!("Payment {} deleted", id))
            .await;

        Ok(())
    }
}
