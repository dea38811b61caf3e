use async_trait::async_trait;

use crate::domain::space::errors::SpaceError;
use crate::domain::space::models::CreateSpaceCommand;
use crate::domain::space::models::Space;
use crate::domain::space::models::SpaceId;
use crate::domain::space::models::UpdateSpaceCommand;

/// Port for space domain service operations.
#[async_trait]
pub trait SpaceServicePort: Send + Sync + 'static {
    async fn create_space(&self, command: CreateSpaceCommand) -> Result<Space, SpaceError>;

    /// # Errors
    /// * `NotFound` - Space does not exist
    async fn get_space(&self, id: &SpaceId) -> Result<Space, SpaceError>;

    async fn list_spaces(&self) -> Result<Vec<Space>, SpaceError>;

    /// # Errors
    /// * `NotFound` - Space does not exist
    async fn update_space(
        &self,
        id: &SpaceId,
        command: UpdateSpaceCommand,
    ) -> Result<Space, SpaceError>;

    /// Delete a space together with its bookings.
    ///
    /// # Errors
    /// * `NotFound` - Space does not exist
    async fn delete_space(&self, id: &SpaceId) -> Result<(), SpaceError>;
}

/// Persistence operations for spaces.
#[async_trait]
pub trait SpaceRepository: Send + Sync + 'static {
    async fn create(&self, space: Space) -> Result<Space, SpaceError>;

    async fn find_by_id(&self, id: &SpaceId) -> Result<Option<Space>, SpaceError>;

    /// All spaces ordered by name.
    async fn list_all(&self) -> Result<Vec<Space>, SpaceError>;

    /// # Errors
    /// * `NotFound` - Space does not exist
    async fn update(&self, space: Space) -> Result<Space, SpaceError>;

    /// # Errors
    /// * `NotFound` - Space does not exist
    async fn delete(&self, id: &SpaceId) -> Result<(), SpaceError>;
}
