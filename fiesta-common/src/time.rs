//! Timestamp utilities

use chrono::{DateTime, SecondsFormat, Utc};

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Current time as Unix epoch milliseconds
///
/// Used as the base for synthetic roster order keys.
pub fn now_millis() -> i64 {
    now().timestamp_millis()
}

/// Current time formatted for the paid/picked-up date fields
pub fn now_rfc3339() -> String {
    now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
