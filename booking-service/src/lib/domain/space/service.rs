use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::space::errors::SpaceError;
use crate::domain::space::models::CreateSpaceCommand;
use crate::domain::space::models::Space;
use crate::domain::space::models::SpaceId;
use crate::domain::space::models::UpdateSpaceCommand;
use crate::domain::space::ports::SpaceRepository;
use crate::domain::space::ports::SpaceServicePort;

pub struct SpaceService<SR>
where
    SR: SpaceRepository,
{
    repository: Arc<SR>,
}

impl<SR> SpaceService<SR>
where
    SR: SpaceRepository,
{
    pub fn new(repository: Arc<SR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<SR> SpaceServicePort for SpaceService<SR>
where
    SR: SpaceRepository,
{
    async fn create_space(&self, command: CreateSpaceCommand) -> Result<Space, SpaceError> {
        let space = Space {
            id: SpaceId::new(),
            name: command.name,
            capacity: command.capacity,
            location: command.location,
        };

        self.repository.create(space).await
    }

    async fn get_space(&self, id: &SpaceId) -> Result<Space, SpaceError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(SpaceError::NotFound(id.to_string()))
    }

    async fn list_spaces(&self) -> Result<Vec<Space>, SpaceError> {
        self.repository.list_all().await
    }

    async fn update_space(
        &self,
        id: &SpaceId,
        command: UpdateSpaceCommand,
    ) -> Result<Space, SpaceError> {
        let mut space = self.get_space(id).await?;

        if let Some(name) = command.name {
            space.name = name;
        }

        if let Some(capacity) = command.capacity {
            space.capacity = capacity;
        }

        if let Some(location) = command.location {
            space.location = location;
        }

        self.repository.update(space).await
    }

    async fn delete_space(&self, id: &SpaceId) -> Result<(), SpaceError> {
        self.repository.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;
    use crate::domain::space::models::Capacity;
    use crate::domain::space::models::Location;
    use crate::domain::space::models::SpaceName;

    mock! {
        pub TestSpaceRepository {}

        #[async_trait]
        impl SpaceRepository for TestSpaceRepository {
            async fn create(&self, space: Space) -> Result<Space, SpaceError>;
            async fn find_by_id(&self, id: &SpaceId) -> Result<Option<Space>, SpaceError>;
            async fn list_all(&self) -> Result<Vec<Space>, SpaceError>;
            async fn update(&self, space: Space) -> Result<Space, SpaceError>;
            async fn delete(&self, id: &SpaceId) -> Result<(), SpaceError>;
        }
    }

    fn room_a() -> Space {
        Space {
            id: SpaceId::new(),
            name: SpaceName::new("Meeting Room A").unwrap(),
            capacity: Capacity::new(10).unwrap(),
            location: Location::new("Floor 1").unwrap(),
        }
    }

    #[tokio::test]
    async fn test_create_space() {
        let mut repository = MockTestSpaceRepository::new();
        repository
            .expect_create()
            .withf(|space| space.capacity.get() == 10 && space.name.as_str() == "Meeting Room A")
            .times(1)
            .returning(Ok);

        let service = SpaceService::new(Arc::new(repository));
        let space = service
            .create_space(CreateSpaceCommand {
                name: SpaceName::new("Meeting Room A").unwrap(),
                capacity: Capacity::new(10).unwrap(),
                location: Location::new("Floor 1").unwrap(),
            })
            .await
            .unwrap();

        assert_eq!(space.location.as_str(), "Floor 1");
    }

    #[tokio::test]
    async fn test_update_space_keeps_unset_fields() {
        let mut repository = MockTestSpaceRepository::new();
        let existing = room_a();
        let id = existing.id;

        repository
            .expect_find_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        repository
            .expect_update()
            .withf(|space| space.capacity.get() == 12 && space.name.as_str() == "Meeting Room A")
            .times(1)
            .returning(Ok);

        let service = SpaceService::new(Arc::new(repository));
        let command = UpdateSpaceCommand {
            capacity: Some(Capacity::new(12).unwrap()),
            ..Default::default()
        };

        let updated = service.update_space(&id, command).await.unwrap();
        assert_eq!(updated.capacity.get(), 12);
    }

    #[tokio::test]
    async fn test_update_missing_space() {
        let mut repository = MockTestSpaceRepository::new();
        repository.expect_find_by_id().returning(|_| Ok(None));
        repository.expect_update().times(0);

        let service = SpaceService::new(Arc::new(repository));
        let result = service
            .update_space(&SpaceId::new(), UpdateSpaceCommand::default())
            .await;

        assert!(matches!(result, Err(SpaceError::NotFound(_))));
    }
}
