use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::users::UserResponse;
use super::ApiError;
use super::ApiSuccess;
use super::JsonBody;
use super::MessageResponse;
use crate::domain::role::models::RoleId;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::PersonName;
use crate::domain::user::models::UpdateProfileCommand;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    name: String,
    email: String,
    password: String,
    role_id: Option<String>,
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<CreateUserCommand, UserError> {
        Ok(CreateUserCommand::new(
            PersonName::new(self.name)?,
            EmailAddress::new(self.email)?,
            Password::new(self.password)?,
            self.role_id.as_deref().map(RoleId::from_string).transpose()?,
        ))
    }
}

pub async fn register(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<RegisterRequest>,
) -> Result<ApiSuccess<MessageResponse>, ApiError> {
    let user = state.user_service.register(body.try_into_command()?).await?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok(ApiSuccess::new(
        StatusCode::OK,
        MessageResponse::new("User registered successfully"),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

pub async fn login(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<LoginRequest>,
) -> Result<ApiSuccess<LoginResponse>, ApiError> {
    let session = state
        .user_service
        .login(&body.email, &body.password)
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginResponse {
            token: session.access_token,
            expires_at: session.expires_at,
        },
    ))
}

pub async fn me(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<UserResponse>, ApiError> {
    state
        .user_service
        .get_user(&current.user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateProfileRequest {
    name: Option<String>,
    current_password: Option<String>,
    new_password: Option<String>,
}

impl UpdateProfileRequest {
    fn try_into_command(self) -> Result<UpdateProfileCommand, UserError> {
        Ok(UpdateProfileCommand {
            name: self.name.map(PersonName::new).transpose()?,
            current_password: self.current_password,
            new_password: self.new_password.map(Password::new).transpose()?,
        })
    }
}

pub async fn update_profile(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    JsonBody(body): JsonBody<UpdateProfileRequest>,
) -> Result<ApiSuccess<MessageResponse>, ApiError> {
    state
        .user_service
        .update_profile(&current.user_id, body.try_into_command()?)
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        MessageResponse::new("Profile updated successfully"),
    ))
}
