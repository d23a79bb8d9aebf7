//! Unix timestamp normalization

use chrono::DateTime;
use serde_json::Value;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Convert a raw `createAt` / `lastLoginAt` value into a readable UTC
/// date-time.
///
/// The service sends seconds since the epoch, sometimes as a JSON number and
/// sometimes as a numeric string. Missing, zero, empty or unparseable values
/// yield `None`.
pub fn format_timestamp(raw: Option<&Value>) -> Option<String> {
    let secs = match raw? {
        Value::Number(n) => n.as_i64()?,
        Value::String(s) => s.trim().parse::<i64>().ok()?,
        _ => return None,
    };
    if secs == 0 {
        return None;
    }
    DateTime::from_timestamp(secs, 0).map(|dt| dt.format(DATE_FORMAT).to_string())
}
