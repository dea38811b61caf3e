use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::role::models::RoleId;
use crate::user::errors::EmailError;
use crate::user::errors::PasswordPolicyError;
use crate::user::errors::PersonNameError;
use crate::user::errors::UserIdError;

/// User aggregate entity.
///
/// Represents a registered account. The password is only ever held as a hash.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub name: PersonName,
    pub email: EmailAddress,
    pub password_hash: String,
    pub role_id: Option<RoleId>,
    pub registered_at: DateTime<Utc>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    ///
    /// # Returns
    /// UserId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name of a person.
///
/// Surrounding whitespace is trimmed; 1-100 characters remain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    const MAX_LENGTH: usize = 100;

    /// Create a validated name.
    ///
    /// # Errors
    /// * `Empty` - Name is blank
    /// * `TooLong` - Name longer than 100 characters
    pub fn new(name: impl Into<String>) -> Result<Self, PersonNameError> {
        let name = name.into().trim().to_string();
        let length = name.chars().count();
        if length == 0 {
            Err(PersonNameError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(PersonNameError::TooLong {
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

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser. Stored lowercased
/// so uniqueness and login lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: impl Into<String>) -> Result<Self, EmailError> {
        let email = email.into().trim().to_lowercase();
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password as submitted by a client, before hashing.
///
/// Debug output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    const MAX_LENGTH: usize = 128;

    pub fn new(password: impl Into<String>) -> Result<Self, PasswordPolicyError> {
        let password = password.into();
        let length = password.chars().count();
        if length == 0 {
            Err(PasswordPolicyError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(PasswordPolicyError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(password))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Command to create a new user, either by self-registration or by an
/// authenticated operator.
#[derive(Debug)]
pub struct CreateUserCommand {
    pub name: PersonName,
    pub email: EmailAddress,
    pub password: Password,
    pub role_id: Option<RoleId>,
}

impl CreateUserCommand {
    /// Construct a new create user command.
    ///
    /// # Arguments
    /// * `name` - Validated display name
    /// * `email` - Validated email address
    /// * `password` - Plain text password (will be hashed by service)
    /// * `role_id` - Optional role reference
    pub fn new(
        name: PersonName,
        email: EmailAddress,
        password: Password,
        role_id: Option<RoleId>,
    ) -> Self {
        Self {
            name,
            email,
            password,
            role_id,
        }
    }
}

/// Command to update an existing user with optional validated fields.
///
/// Only provided fields will be updated.
#[derive(Debug, Default)]
pub struct UpdateUserCommand {
    pub name: Option<PersonName>,
    pub email: Option<EmailAddress>,
    pub password: Option<Password>,
    pub role_id: Option<RoleId>,
}

/// Self-service profile change of the logged-in user.
///
/// Changing the password requires the current one.
#[derive(Debug, Default)]
pub struct UpdateProfileCommand {
    pub name: Option<PersonName>,
    pub current_password: Option<String>,
    pub new_password: Option<Password>,
}

/// Successful login: the user and a freshly issued session token.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}
