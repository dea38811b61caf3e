use chrono::DateTime;
use chrono::Duration;
use chrono::TimeZone;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claims carried by a session token.
///
/// The subject is the user identifier; the email is carried alongside so the
/// request handlers never need a lookup just to know who is calling.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    /// Subject (user identifier)
    pub sub: String,

    /// Email of the user at issuance time
    pub email: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl SessionClaims {
    /// Create claims for a user, valid for `ttl` starting now.
    pub fn new(user_id: impl ToString, email: impl Into<String>, ttl: Duration) -> Self {
        Self::issued_at(user_id, email, Utc::now(), ttl)
    }

    /// Create claims issued at an explicit instant.
    ///
    /// # Arguments
    /// * `user_id` - Unique user identifier
    /// * `email` - Email of the user
    /// * `issued_at` - Issuance instant
    /// * `ttl` - Lifetime of the token
    pub fn issued_at(
        user_id: impl ToString,
        email: impl Into<String>,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            sub: user_id.to_string(),
            email: email.into(),
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
        }
    }

    /// Expiration as a UTC instant.
    pub fn expires_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.exp, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Check if the token is expired at the given Unix timestamp.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}
