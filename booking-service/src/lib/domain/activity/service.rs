use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::activity::errors::ActivityLogError;
use crate::domain::activity::models::ActivityAction;
use crate::domain::activity::models::ActivityLog;
use crate::domain::activity::models::CreateActivityLogCommand;
use crate::domain::activity::ports::ActivityLogRepository;
use crate::domain::activity::ports::ActivityLogServicePort;
use crate::domain::activity::ports::ActivityRecorder;
use crate::domain::user::models::UserId;

/// Activity log service.
///
/// Serves the log API and acts as the [`ActivityRecorder`] other services
/// emit audit entries through.
pub struct ActivityLogService<AR>
where
    AR: ActivityLogRepository,
{
    repository: Arc<AR>,
}

impl<AR> ActivityLogService<AR>
where
    AR: ActivityLogRepository,
{
    pub fn new(repository: Arc<AR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<AR> ActivityLogServicePort for ActivityLogService<AR>
where
    AR: ActivityLogRepository,
{
    async fn list_logs(&self) -> Result<Vec<ActivityLog>, ActivityLogError> {
        self.repository.list_all().await
    }

    async fn create_log(
        &self,
        command: CreateActivityLogCommand,
    ) -> Result<ActivityLog, ActivityLogError> {
        let entry = ActivityLog::new(command.user_id, command.action, command.details);
        self.repository.append(entry).await
    }
}

#[async_trait]
impl<AR> ActivityRecorder for ActivityLogService<AR>
where
    AR: ActivityLogRepository,
{
    async fn record(&self, user_id: &UserId, action: &str, details: String) {
        let action = match ActivityAction::new(action) {
            Ok(action) => action,
            Err(e) => {
                tracing::error!(user_id = %user_id, error = %e, "Dropping activity entry");
                return;
            }
        };

        let entry = ActivityLog::new(*user_id, action, details);
        if let Err(e) = self.repository.append(entry).await {
            tracing::error!(
                "Failed to record activity for user {}: {}",
                user_id,
                e
            );
        }
    }
}
