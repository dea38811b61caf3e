use thiserror::Error;

use crate::user::errors::UserIdError;

/// Error for ActivityAction validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ActivityActionError {
    #[error("Action must not be empty")]
    Empty,

    #[error("Action too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error for activity log operations
#[derive(Debug, Clone, Error)]
pub enum ActivityLogError {
    #[error("Invalid action: {0}")]
    InvalidAction(#[from] ActivityActionError),

    #[error("Invalid user ID: {0}")]
    InvalidUserId(#[from] UserIdError),

    #[error("User does not exist: {0}")]
    UnknownUser(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
