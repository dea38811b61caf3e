use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::JsonBody;
use crate::domain::activity::errors::ActivityLogError;
use crate::domain::activity::models::ActivityAction;
use crate::domain::activity::models::ActivityLog;
use crate::domain::activity::models::CreateActivityLogCommand;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityLogResponse {
    pub id: String,
    pub user_id: Option<String>,
    pub action: String,
    pub details: String,
    pub created_at: DateTime<Utc>,
}

impl From<&ActivityLog> for ActivityLogResponse {
    fn from(entry: &ActivityLog) -> Self {
        Self {
            id: entry.id.to_string(),
            user_id: entry.user_id.map(|id| id.to_string()),
            action: entry.action.as_str().to_string(),
            details: entry.details.clone(),
            created_at: entry.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateActivityLogRequest {
    user_id: String,
    action: String,
    #[serde(default)]
    details: String,
}

impl CreateActivityLogRequest {
    fn try_into_command(self) -> Result<CreateActivityLogCommand, ActivityLogError> {
        Ok(CreateActivityLogCommand {
            user_id: UserId::from_string(&self.user_id)?,
            action: ActivityAction::new(self.action)?,
            details: self.details,
        })
    }
}

pub async fn list_logs(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<ActivityLogResponse>>, ApiError> {
    let logs = state.activity_service.list_logs().await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        logs.iter().map(ActivityLogResponse::from).collect(),
    ))
}

pub async fn create_log(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreateActivityLogRequest>,
) -> Result<ApiSuccess<ActivityLogResponse>, ApiError> {
    state
        .activity_service
        .create_log(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref entry| ApiSuccess::new(StatusCode::CREATED, entry.into()))
}
