use chrono::DateTime;
use chrono::SubsecRound;
use chrono::Utc;

pub mod activity;
pub mod booking;
pub mod payment;
pub mod role;
pub mod space;
pub mod user;

/// Digits of sub-second precision kept by a PostgreSQL `TIMESTAMPTZ`.
const STORED_SUBSEC_DIGITS: u16 = 6;

/// Drop precision a `TIMESTAMPTZ` column cannot hold, so a value read back
/// equals the one returned on write.
pub fn stored_precision(at: DateTime<Utc>) -> DateTime<Utc> {
    at.trunc_subsecs(STORED_SUBSEC_DIGITS)
}

/// Current time at stored precision.
pub fn now() -> DateTime<Utc> {
    stored_precision(Utc::now())
}
