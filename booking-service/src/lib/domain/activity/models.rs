use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain;
use crate::domain::activity::errors::ActivityActionError;
use crate::domain::user::models::UserId;

/// Action labels recorded by the service itself.
pub mod actions {
    pub const REGISTRATION: &str = "registration";
    pub const LOGIN: &str = "login";
    pub const PROFILE_UPDATE: &str = "profile_update";
    pub const BOOKING_CREATED: &str = "booking_created";
    pub const BOOKING_UPDATED: &str = "booking_updated";
    pub const BOOKING_DELETED: &str = "booking_deleted";
    pub const PAYMENT_CREATED: &str = "payment_created";
    pub const PAYMENT_UPDATED: &str = "payment_updated";
    pub const PAYMENT_DELETED: &str = "payment_deleted";
}

/// Append-only audit record of a user action.
///
/// `user_id` becomes `None` once the user is deleted; the entry itself stays.
#[derive(Debug, Clone)]
pub struct ActivityLog {
    pub id: ActivityLogId,
    pub user_id: Option<UserId>,
    pub action: ActivityAction,
    pub details: String,
    pub created_at: DateTime<Utc>,
}

impl ActivityLog {
    pub fn new(user_id: UserId, action: ActivityAction, details: impl Into<String>) -> Self {
        Self {
            id: ActivityLogId::new(),
            user_id: Some(user_id),
            action,
            details: details.into(),
            created_at: domain::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivityLogId(pub Uuid);

impl ActivityLogId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ActivityLogId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ActivityLogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Short label naming what happened, 1-100 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityAction(String);

impl ActivityAction {
    const MAX_LENGTH: usize = 100;

    pub fn new(action: impl Into<String>) -> Result<Self, ActivityActionError> {
        let action = action.into().trim().to_string();
        let length = action.chars().count();
        if length == 0 {
            Err(ActivityActionError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(ActivityActionError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(action))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Manual log entry submitted through the API.
#[derive(Debug)]
pub struct CreateActivityLogCommand {
    pub user_id: UserId,
    pub action: ActivityAction,
    pub details: String,
}
