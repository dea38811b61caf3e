use async_trait::async_trait;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::space::errors::SpaceError;
use crate::domain::space::models::Capacity;
use crate::domain::space::models::Location;
use crate::domain::space::models::Space;
use crate::domain::space::models::SpaceId;
use crate::domain::space::models::SpaceName;
use crate::domain::space::ports::SpaceRepository;

pub struct PostgresSpaceRepository {
    pool: PgPool,
}

impl PostgresSpaceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct SpaceRow {
    id: Uuid,
    name: String,
    capacity: i32,
    location: String,
}

impl TryFrom<SpaceRow> for Space {
    type Error = SpaceError;

    fn try_from(r: SpaceRow) -> Result<Self, Self::Error> {
        Ok(Space {
            id: SpaceId(r.id),
            name: SpaceName::new(r.name)?,
            capacity: Capacity::new(i64::from(r.capacity))?,
            location: Location::new(r.location)?,
        })
    }
}

#[async_trait]
impl SpaceRepository for PostgresSpaceRepository {
    async fn create(&self, space: Space) -> Result<Space, SpaceError> {
        sqlx::query(
            r#"
            INSERT INTO spaces (id, name, capacity, location)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(space.id.0)
        .bind(space.name.as_str())
        .bind(space.capacity.get())
        .bind(space.location.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| SpaceError::DatabaseError(e.to_string()))?;

        Ok(space)
    }

    async fn find_by_id(&self, id: &SpaceId) -> Result<Option<Space>, SpaceError> {
        let row = sqlx::query_as::<_, SpaceRow>(
            r#"
            SELECT id, name, capacity, location
            FROM spaces
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| SpaceError::DatabaseError(e.to_string()))?;

        row.map(Space::try_from).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Space>, SpaceError> {
        let rows = sqlx::query_as::<_, SpaceRow>(
            r#"
            SELECT id, name, capacity, location
            FROM spaces
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| SpaceError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Space::try_from).collect()
    }

    async fn update(&self, space: Space) -> Result<Space, SpaceError> {
        let result = sqlx::query(
            r#"
            UPDATE spaces
            SET name = $2, capacity = $3, location = $4
            WHERE id = $1
            "#,
        )
        .bind(space.id.0)
        .bind(space.name.as_str())
        .bind(space.capacity.get())
        .bind(space.location.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| SpaceError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(SpaceError::NotFound(space.id.to_string()));
        }

        Ok(space)
    }

    async fn delete(&self, id: &SpaceId) -> Result<(), SpaceError> {
        let result = sqlx::query("DELETE FROM spaces WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| SpaceError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(SpaceError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
