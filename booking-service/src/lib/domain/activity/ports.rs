use async_trait::async_trait;

use crate::domain::activity::errors::ActivityLogError;
use crate::domain::activity::models::ActivityLog;
use crate::domain::activity::models::CreateActivityLogCommand;
use crate::domain::user::models::UserId;

/// Port for the activity log API.
#[async_trait]
pub trait ActivityLogServicePort: Send + Sync + 'static {
    /// All entries, newest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_logs(&self) -> Result<Vec<ActivityLog>, ActivityLogError>;

    /// Append a manual entry.
    ///
    /// # Errors
    /// * `UnknownUser` - Referenced user does not exist
    /// * `DatabaseError` - Database operation failed
    async fn create_log(
        &self,
        command: CreateActivityLogCommand,
    ) -> Result<ActivityLog, ActivityLogError>;
}

/// Best-effort audit side effect used by other services.
///
/// Implementations must never surface a failure to the caller: a lost entry
/// is logged and dropped.
#[async_trait]
pub trait ActivityRecorder: Send + Sync + 'static {
    async fn record(&self, user_id: &UserId, action: &str, details: String);
}

/// Append-only persistence for activity logs.
#[async_trait]
pub trait ActivityLogRepository: Send + Sync + 'static {
    /// Persist a new entry.
    ///
    /// # Errors
    /// * `UnknownUser` - Referenced user does not exist
    /// * `DatabaseError` - Database operation failed
    async fn append(&self, entry: ActivityLog) -> Result<ActivityLog, ActivityLogError>;

    /// Retrieve all entries, newest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_all(&self) -> Result<Vec<ActivityLog>, ActivityLogError>;
}
