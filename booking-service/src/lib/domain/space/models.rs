use std::fmt;

use uuid::Uuid;

use crate::domain::space::errors::CapacityError;
use crate::domain::space::errors::LocationError;
use crate::domain::space::errors::SpaceIdError;
use crate::domain::space::errors::SpaceNameError;

/// A bookable room or desk area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Space {
    pub id: SpaceId,
    pub name: SpaceName,
    pub capacity: Capacity,
    pub location: Location,
}

/// Space unique identifier value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpaceId(pub Uuid);

impl SpaceId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a space ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, SpaceIdError> {
        Uuid::parse_str(s)
            .map(SpaceId)
            .map_err(|e| SpaceIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for SpaceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SpaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpaceName(String);

impl SpaceName {
    const MAX_LENGTH: usize = 100;

    pub fn new(name: impl Into<String>) -> Result<Self, SpaceNameError> {
        let name = name.into().trim().to_string();
        let length = name.chars().count();
        if length == 0 {
            Err(SpaceNameError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(SpaceNameError::TooLong {
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

/// Number of people a space holds. Always strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacity(i32);

impl Capacity {
    pub fn new(capacity: i64) -> Result<Self, CapacityError> {
        if capacity <= 0 {
            return Err(CapacityError::NotPositive(capacity));
        }

        i32::try_from(capacity)
            .map(Self)
            .map_err(|_| CapacityError::TooLarge {
                max: i64::from(i32::MAX),
                actual: capacity,
            })
    }

    pub fn get(&self) -> i32 {
        self.0
    }
}

/// Free-form location description, e.g. "Floor 2".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location(String);

impl Location {
    const MAX_LENGTH: usize = 255;

    pub fn new(location: impl Into<String>) -> Result<Self, LocationError> {
        let location = location.into().trim().to_string();
        let length = location.chars().count();
        if length > Self::MAX_LENGTH {
            Err(LocationError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(location))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug)]
pub struct CreateSpaceCommand {
    pub name: SpaceName,
    pub capacity: Capacity,
    pub location: Location,
}

/// Partial update; only provided fields change.
#[derive(Debug, Default)]
pub struct UpdateSpaceCommand {
    pub name: Option<SpaceName>,
    pub capacity: Option<Capacity>,
    pub location: Option<Location>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_must_be_positive() {
        assert_eq!(Capacity::new(0), Err(CapacityError::NotPositive(0)));
        assert_eq!(Capacity::new(-3), Err(CapacityError::NotPositive(-3)));
        assert_eq!(Capacity::new(10).map(|c| c.get()), Ok(10));
    }

    #[test]
    fn test_capacity_must_fit_column() {
        assert!(matches!(
            Capacity::new(i64::from(i32::MAX) + 1),
            Err(CapacityError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_space_name_rejects_blank() {
        assert_eq!(SpaceName::new(""), Err(SpaceNameError::Empty));
    }
}
