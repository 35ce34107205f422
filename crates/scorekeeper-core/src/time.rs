//! Time-bound parsing for query filters.
//!
//! Filter endpoints accept either an epoch-millisecond integer or an
//! ISO-8601 string. Everything is normalized to UTC before comparison;
//! naive date-time strings (no offset) are interpreted as UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Error parsing a time bound from a query parameter.
#[derive(Debug, thiserror::Error)]
pub enum TimeBoundError {
    /// The epoch-millisecond value is outside the representable range.
    #[error("epoch milliseconds out of range: {0}")]
    EpochOutOfRange(i64),

    /// The string is neither epoch milliseconds nor a recognized ISO-8601
    /// date-time.
    #[error("unrecognized time format: {0:?}")]
    Unrecognized(String),
}

/// Parse a time bound from its query-string representation.
///
/// Accepted forms, tried in order:
///
/// 1. An integer — epoch **milliseconds**
/// 2. RFC 3339 with offset, e.g. `2025-01-20T05:28:08Z`
/// 3. Naive date-time, `2025-01-20T05:28:08[.frac]` or with a space
///    separator — interpreted as UTC
/// 4. A bare date `2025-01-20` — midnight UTC
///
/// # Errors
///
/// Returns [`TimeBoundError`] if no form matches or the epoch value is out
/// of range.
pub fn parse_time_bound(raw: &str) -> Result<DateTime<Utc>, TimeBoundError> {
    let raw = raw.trim();

    if !raw.is_empty() && raw.chars().all(|c| c.is_ascii_digit()) {
        let millis: i64 = raw
            .parse()
            .map_err(|_| TimeBoundError::Unrecognized(raw.to_string()))?;
        return DateTime::from_timestamp_millis(millis)
            .ok_or(TimeBoundError::EpochOutOfRange(millis));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }

    Err(TimeBoundError::Unrecognized(raw.to_string()))
}
