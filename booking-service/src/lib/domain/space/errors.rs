use thiserror::Error;

/// Error for SpaceId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SpaceIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for SpaceName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SpaceNameError {
    #[error("Space name must not be empty")]
    Empty,

    #[error("Space name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CapacityError {
    #[error("Capacity must be greater than zero, got {0}")]
    NotPositive(i64),

    #[error("Capacity too large: maximum {max}, got {actual}")]
    TooLarge { max: i64, actual: i64 },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LocationError {
    #[error("Location too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error for all space-related operations
#[derive(Debug, Clone, Error)]
pub enum SpaceError {
    #[error("Invalid space ID: {0}")]
    InvalidSpaceId(#[from] SpaceIdError),

    #[error("Invalid space name: {0}")]
    InvalidName(#[from] SpaceNameError),

    #[error("Invalid capacity: {0}")]
    InvalidCapacity(#[from] CapacityError),

    #[error("Invalid location: {0}")]
    InvalidLocation(#[from] LocationError),

    #[error("Space not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
