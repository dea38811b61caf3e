use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::JsonBody;
use crate::domain::space::errors::SpaceError;
use crate::domain::space::models::Capacity;
use crate::domain::space::models::CreateSpaceCommand;
use crate::domain::space::models::Location;
use crate::domain::space::models::Space;
use crate::domain::space::models::SpaceId;
use crate::domain::space::models::SpaceName;
use crate::domain::space::models::UpdateSpaceCommand;
use crate::inbound::http::router::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpaceResponse {
    pub id: String,
    pub name: String,
    pub capacity: i32,
    pub location: String,
}

impl From<&Space> for SpaceResponse {
    fn from(space: &Space) -> Self {
        Self {
            id: space.id.to_string(),
            name: space.name.as_str().to_string(),
            capacity: space.capacity.get(),
            location: space.location.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateSpaceRequest {
    name: String,
    capacity: i64,
    #[serde(default)]
    location: String,
}

impl CreateSpaceRequest {
    fn try_into_command(self) -> Result<CreateSpaceCommand, SpaceError> {
        Ok(CreateSpaceCommand {
            name: SpaceName::new(self.name)?,
            capacity: Capacity::new(self.capacity)?,
            location: Location::new(self.location)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateSpaceRequest {
    name: Option<String>,
    capacity: Option<i64>,
    location: Option<String>,
}

impl UpdateSpaceRequest {
    fn try_into_command(self) -> Result<UpdateSpaceCommand, SpaceError> {
        Ok(UpdateSpaceCommand {
            name: self.name.map(SpaceName::new).transpose()?,
            capacity: self.capacity.map(Capacity::new).transpose()?,
            location: self.location.map(Location::new).transpose()?,
        })
    }
}

pub async fn list_spaces(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<SpaceResponse>>, ApiError> {
    let spaces = state.space_service.list_spaces().await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        spaces.iter().map(SpaceResponse::from).collect(),
    ))
}

pub async fn create_space(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreateSpaceRequest>,
) -> Result<ApiSuccess<SpaceResponse>, ApiError> {
    state
        .space_service
        .create_space(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref space| ApiSuccess::new(StatusCode::CREATED, space.into()))
}

pub async fn get_space(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<SpaceResponse>, ApiError> {
    let space_id = SpaceId::from_string(&id).map_err(SpaceError::from)?;

    state
        .space_service
        .get_space(&space_id)
        .await
        .map_err(ApiError::from)
        .map(|ref space| ApiSuccess::new(StatusCode::OK, space.into()))
}

pub async fn update_space(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<UpdateSpaceRequest>,
) -> Result<ApiSuccess<SpaceResponse>, ApiError> {
    let space_id = SpaceId::from_string(&id).map_err(SpaceError::from)?;
    let command = body.try_into_command()?;

    state
        .space_service
        .update_space(&space_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref space| ApiSuccess::new(StatusCode::OK, space.into()))
}

pub async fn delete_space(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let space_id = SpaceId::from_string(&id).map_err(SpaceError::from)?;

    state.space_service.delete_space(&space_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
