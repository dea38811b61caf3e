use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgConnection;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::booking::errors::BookingError;
use crate::domain::booking::models::Booking;
use crate::domain::booking::models::BookingId;
use crate::domain::booking::models::TimeSlot;
use crate::domain::booking::ports::BookingRepository;
use crate::domain::space::models::SpaceId;
use crate::domain::user::models::UserId;

/// SQLSTATE raised when a SERIALIZABLE transaction loses a race.
const SERIALIZATION_FAILURE: &str = "40001";

pub struct PostgresBookingRepository {
    pool: PgPool,
}

impl PostgresBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_write_error(e: sqlx::Error, booking: &Booking) -> BookingError {
        if let Some(db_err) = e.as_database_error() {
            if db_err.code().as_deref() == Some(SERIALIZATION_FAILURE) {
                return BookingError::SlotUnavailable(booking.space_id.to_string());
            }
            if db_err.is_foreign_key_violation() {
                match db_err.constraint() {
                    Some("bookings_user_id_fkey") => {
                        return BookingError::UnknownUser(booking.user_id.to_string())
                    }
                    Some("bookings_space_id_fkey") => {
                        return BookingError::UnknownSpace(booking.space_id.to_string())
                    }
                    _ => {}
                }
            }
        }
        BookingError::DatabaseError(e.to_string())
    }

    /// Opens a SERIALIZABLE transaction, checks `booking` against the stored
    /// bookings of its space, then runs `write` before committing.
    async fn write_if_slot_free(
        &self,
        booking: &Booking,
        write: &str,
    ) -> Result<u64, BookingError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| BookingError::DatabaseError(e.to_string()))?;

        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut *tx)
            .await
            .map_err(|e| BookingError::DatabaseError(e.to_string()))?;

        if booking.status.holds_space() && Self::has_conflict(&mut tx, booking).await? {
            return Err(BookingError::SlotUnavailable(booking.space_id.to_string()));
        }

        let result = sqlx::query(write)
            .bind(booking.id.0)
            .bind(booking.user_id.0)
            .bind(booking.space_id.0)
            .bind(booking.slot.starts_at())
            .bind(booking.slot.ends_at())
            .bind(booking.status.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| Self::map_write_error(e, booking))?;

        tx.commit()
            .await
            .map_err(|e| Self::map_write_error(e, booking))?;

        Ok(result.rows_affected())
    }

    async fn has_conflict(conn: &mut PgConnection, booking: &Booking) -> Result<bool, BookingError> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM bookings
                WHERE space_id = $1
                  AND id <> $2
                  AND status <> 'cancelled'
                  AND starts_at < $4
                  AND ends_at > $3
            )
            "#,
        )
        .bind(booking.space_id.0)
        .bind(booking.id.0)
        .bind(booking.slot.starts_at())
        .bind(booking.slot.ends_at())
        .fetch_one(conn)
        .await
        .map_err(|e| Self::map_write_error(e, booking))
    }
}

#[derive(FromRow)]
struct BookingRow {
    id: Uuid,
    user_id: Uuid,
    space_id: Uuid,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
    status: String,
}

impl TryFrom<BookingRow> for Booking {
    type Error = BookingError;

    fn try_from(r: BookingRow) -> Result<Self, Self::Error> {
        Ok(Booking {
            id: BookingId(r.id),
            user_id: UserId(r.user_id),
            space_id: SpaceId(r.space_id),
            slot: TimeSlot::new(r.starts_at, r.ends_at)?,
            status: r.status.parse()?,
        })
    }
}

#[async_trait]
impl BookingRepository for PostgresBookingRepository {
    async fn create(&self, booking: Booking) -> Result<Booking, BookingError> {
        self.write_if_slot_free(
            &booking,
            r#"
            INSERT INTO bookings (id, user_id, space_id, starts_at, ends_at, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .await?;

        Ok(booking)
    }

    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, BookingError> {
        let row = sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT id, user_id, space_id, starts_at, ends_at, status
            FROM bookings
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| BookingError::DatabaseError(e.to_string()))?;

        row.map(Booking::try_from).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Booking>, BookingError> {
        let rows = sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT id, user_id, space_id, starts_at, ends_at, status
            FROM bookings
            ORDER BY starts_at
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| BookingError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Booking::try_from).collect()
    }

    async fn update(&self, booking: Booking) -> Result<Booking, BookingError> {
        let rows_affected = self
            .write_if_slot_free(
                &booking,
                r#"
                UPDATE bookings
                SET user_id = $2, space_id = $3, starts_at = $4, ends_at = $5, status = $6
                WHERE id = $1
                "#,
            )
            .await?;

        if rows_affected == 0 {
            return Err(BookingError::NotFound(booking.id.to_string()));
        }

        Ok(booking)
    }

    async fn delete(&self, id: &BookingId) -> Result<(), BookingError> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| BookingError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(BookingError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
