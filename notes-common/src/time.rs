//! Timestamp utilities

use chrono::{DateTime, Utc};
use std::time::SystemTime;

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Convert epoch milliseconds to epoch seconds, rounding toward negative infinity
pub fn millis_to_unix_seconds(millis: i64) -> i64 {
    millis.div_euclid(1000)
}

/// Convert a filesystem timestamp to epoch milliseconds
///
/// Times before the epoch come out negative.
pub fn system_time_to_millis(time: SystemTime) -> i64 {
    DateTime::<Utc>::from(time).timestamp_millis()
}
