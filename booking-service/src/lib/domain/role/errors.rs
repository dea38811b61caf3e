use thiserror::Error;

/// Error for RoleId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoleIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for RoleName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoleNameError {
    #[error("Role name must not be empty")]
    Empty,

    #[error("Role name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}
