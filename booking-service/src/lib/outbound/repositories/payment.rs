use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::booking::models::BookingId;
use crate::domain::payment::errors::PaymentError;
use crate::domain::payment::models::Amount;
use crate::domain::payment::models::Payment;
use crate::domain::payment::models::PaymentId;
use crate::domain::payment::ports::PaymentRepository;

pub struct PostgresPaymentRepository {
    pool: PgPool,
}

impl PostgresPaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_write_error(e: sqlx::Error, payment: &Payment) -> PaymentError {
        if let Some(db_err) = e.as_database_error() {
            match db_err.constraint() {
                Some("payments_booking_id_key") if db_err.is_unique_violation() => {
                    return PaymentError::AlreadyExistsForBooking(payment.booking_id.to_string())
                }
                Some("payments_booking_id_fkey") if db_err.is_foreign_key_violation() => {
                    return PaymentError::UnknownBooking(payment.booking_id.to_string())
                }
                _ => {}
            }
        }
        PaymentError::DatabaseError(e.to_string())
    }
}

#[derive(FromRow)]
struct PaymentRow {
    id: Uuid,
    booking_id: Uuid,
    amount: f64,
    method: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<PaymentRow> for Payment {
    type Error = PaymentError;

    fn try_from(r: PaymentRow) -> Result<Self, Self::Error> {
        Ok(Payment {
            id: PaymentId(r.id),
            booking_id: BookingId(r.booking_id),
            amount: Amount::new(r.amount)?,
            method: r.method.parse()?,
            status: r.status.parse()?,
            created_at: r.created_at,
        })
    }
}

#[async_trait]
impl PaymentRepository for PostgresPaymentRepository {
    async fn create(&self, payment: Payment) -> Result<Payment, PaymentError> {
        sqlx::query(
            r#"
            INSERT INTO payments (id, booking_id, amount, method, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(payment.id.0)
        .bind(payment.booking_id.0)
        .bind(payment.amount.get())
        .bind(payment.method.as_str())
        .bind(payment.status.as_str())
        .bind(payment.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::map_write_error(e, &payment))?;

        Ok(payment)
    }

    async fn find_by_id(&self, id: &PaymentId) -> Result<Option<Payment>, PaymentError> {
        let row = sqlx::query_as::<_, PaymentRow>(
            r#"
            SELECT id, booking_id, amount, method, status, created_at
            FROM payments
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PaymentError::DatabaseError(e.to_string()))?;

        row.map(Payment::try_from).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Payment>, PaymentError> {
        let rows = sqlx::query_as::<_, PaymentRow>(
            r#"
            SELECT id, booking_id, amount, method, status, created_at
            FROM payments
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PaymentError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Payment::try_from).collect()
    }

    async fn update(&self, payment: Payment) -> Result<Payment, PaymentError> {
        let result = sqlx::query(
            r#"
            UPDATE payments
            SET amount = $2, method = $3, status = $4
            WHERE id = $1
            "#,
        )
        .bind(payment.id.0)
        .bind(payment.amount.get())
        .bind(payment.method.as_str())
        .bind(payment.status.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| Self::map_write_error(e, &payment))?;

        if result.rows_affected() == 0 {
            return Err(PaymentError::NotFound(payment.id.to_string()));
        }

        Ok(payment)
    }

    async fn delete(&self, id: &PaymentId) -> Result<(), PaymentError> {
        let result = sqlx::query("DELETE FROM payments WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| PaymentError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(PaymentError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
