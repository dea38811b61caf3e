use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::activity::errors::ActivityLogError;
use crate::domain::activity::models::ActivityAction;
use crate::domain::activity::models::ActivityLog;
use crate::domain::activity::models::ActivityLogId;
use crate::domain::activity::ports::ActivityLogRepository;
use crate::domain::user::models::UserId;

pub struct PostgresActivityLogRepository {
    pool: PgPool,
}

impl PostgresActivityLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct ActivityLogRow {
    id: Uuid,
    user_id: Option<Uuid>,
    action: String,
    details: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<ActivityLogRow> for ActivityLog {
    type Error = ActivityLogError;

    fn try_from(r: ActivityLogRow) -> Result<Self, Self::Error> {
        Ok(ActivityLog {
            id: ActivityLogId(r.id),
            user_id: r.user_id.map(UserId),
            action: ActivityAction::new(r.action)?,
            details: r.details,
            created_at: r.created_at,
        })
    }
}

#[async_trait]
impl ActivityLogRepository for PostgresActivityLogRepository {
    async fn append(&self, entry: ActivityLog) -> Result<ActivityLog, ActivityLogError> {
        sqlx::query(
            r#"
            INSERT INTO activity_logs (id, user_id, action, details, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(entry.id.0)
        .bind(entry.user_id.map(|id| id.0))
        .bind(entry.action.as_str())
        .bind(&entry.details)
        .bind(entry.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match e.as_database_error() {
            Some(db_err)
                if db_err.is_foreign_key_violation()
                    && db_err.constraint() == Some("activity_logs_user_id_fkey") =>
            {
                ActivityLogError::UnknownUser(
                    entry.user_id.map(|id| id.to_string()).unwrap_or_default(),
                )
            }
            _ => ActivityLogError::DatabaseError(e.to_string()),
        })?;

        Ok(entry)
    }

    async fn list_all(&self) -> Result<Vec<ActivityLog>, ActivityLogError> {
        let rows = sqlx::query_as::<_, ActivityLogRow>(
            r#"
            SELECT id, user_id, action, details, created_at
            FROM activity_logs
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ActivityLogError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(ActivityLog::try_from).collect()
    }
}
