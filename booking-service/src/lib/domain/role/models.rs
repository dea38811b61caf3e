use std::fmt;

use uuid::Uuid;

use crate::domain::role::errors::RoleIdError;
use crate::domain::role::errors::RoleNameError;

/// Role a user holds. Roles are reference data created by the seeder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: RoleId,
    pub name: RoleName,
}

impl Role {
    pub fn new(name: RoleName) -> Self {
        Self {
            id: RoleId::new(),
            name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoleId(pub Uuid);

impl RoleId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, RoleIdError> {
        Uuid::parse_str(s)
            .map(RoleId)
            .map_err(|e| RoleIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for RoleId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleName(String);

impl RoleName {
    const MAX_LENGTH: usize = 64;

    pub fn new(name: impl Into<String>) -> Result<Self, RoleNameError> {
        let name = name.into().trim().to_string();
        let length = name.chars().count();
        if length == 0 {
            Err(RoleNameError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(RoleNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
