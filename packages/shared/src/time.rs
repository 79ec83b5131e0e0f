//! Time-related utilities with clock abstraction for testability.
//!
//! Timestamps are Unix milliseconds and are always rendered in UTC so that
//! every connected client sees the same wall-clock text.

use chrono::{DateTime, SecondsFormat, Utc};

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Get current Unix timestamp (milliseconds)
    fn now_millis(&self) -> i64;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        get_timestamp()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: i64,
}

impl FixedClock {
    /// Create a new fixed clock with the given timestamp
    pub fn new(fixed_time_millis: i64) -> Self {
        Self {
            fixed_time: fixed_time_millis,
        }
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.fixed_time
    }
}

/// Get current Unix timestamp (milliseconds)
pub fn get_timestamp() -> i64 {
    Utc::now().timestamp_millis()
}

fn to_datetime(timestamp_millis: i64) -> DateTime<Utc> {
    // Out-of-range values collapse to the Unix epoch
    DateTime::<Utc>::from_timestamp_millis(timestamp_millis).unwrap_or_default()
}

/// Convert Unix timestamp (milliseconds) to RFC 3339 format in UTC
/// with second precision, e.g. `2023-01-01T00:00:00Z`.
pub fn timestamp_to_rfc3339(timestamp_millis: i64) -> String {
    to_datetime(timestamp_millis).to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Convert Unix timestamp (milliseconds) to a `HH:MM:SS` clock time in UTC.
pub fn timestamp_to_clock_time(timestamp_millis: i64) -> String {
    to_datetime(timestamp_millis).format("%H:%M:%S").to_string()
}
