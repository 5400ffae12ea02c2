//! Timestamp helpers
//!
//! Timestamps are Unix nanoseconds (`i64`), the same representation the
//! exchange services use end to end. Display follows the exchange console
//! format `HH:MM:SS:mmm`.

use chrono::{DateTime, Utc};

/// Current wall-clock time in Unix nanoseconds
pub fn now_nanos() -> i64 {
    Utc::now().timestamp_nanos_opt().unwrap_or(i64::MAX)
}

/// Format a Unix-nanosecond timestamp as `HH:MM:SS:mmm` (UTC)
pub fn format_timestamp(nanos: i64) -> String {
    let dt: DateTime<Utc> = DateTime::from_timestamp_nanos(nanos);
    dt.format("%H:%M:%S:%3f").to_string()
}
