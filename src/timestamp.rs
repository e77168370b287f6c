//! Epoch-millisecond timestamp codec
//!
//! The API sends every timestamp as an integer count of milliseconds since
//! the Unix epoch. Resources keep them as `DateTime<Utc>` at whole-second
//! precision: the sub-second remainder is dropped, never rounded.

use chrono::{DateTime, Utc};
use serde_json::Number;

use crate::error::DecodeError;

const MILLIS_PER_SECOND: i64 = 1000;

/// Convert epoch milliseconds to a date-time truncated to whole seconds.
///
/// Negative inputs and values beyond chrono's representable range fail with
/// [`DecodeError::InvalidTimestamp`].
pub fn decode(raw: i64) -> Result<DateTime<Utc>, DecodeError> {
    if raw < 0 {
        return Err(DecodeError::InvalidTimestamp(raw.to_string()));
    }

    DateTime::from_timestamp(raw / MILLIS_PER_SECOND, 0)
        .ok_or_else(|| DecodeError::InvalidTimestamp(raw.to_string()))
}

/// Convert a date-time back to epoch milliseconds (whole seconds × 1000).
pub fn encode(value: DateTime<Utc>) -> i64 {
    value.timestamp() * MILLIS_PER_SECOND
}

/// Decode a JSON number holding epoch milliseconds.
///
/// Integral floats (`1454634415000.0`) are accepted; fractional, negative,
/// or out-of-range numbers are not.
pub fn decode_number(number: &Number) -> Result<DateTime<Utc>, DecodeError> {
    if let Some(raw) = number.as_i64() {
        return decode(raw);
    }

    if let Some(raw) = number.as_f64() {
        if raw.is_finite() && raw.fract() == 0.0 && raw >= 0.0 && raw <= i64::MAX as f64 {
            return decode(raw as i64);
        }
    }

    // u64 above i64::MAX, or a float that failed the checks above
    Err(DecodeError::InvalidTimestamp(number.to_string()))
}

/// Serde helpers for optional timestamp fields in wire format.
pub(crate) mod millis_option {
    use chrono::{DateTime, Utc};
    use serde::Serializer;

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_i64(super::encode(*dt)),
            None => serializer.serialize_none(),
        }
    }
}
