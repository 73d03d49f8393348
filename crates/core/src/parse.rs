//! Lenient ISO-8601 parsing for request fields.
//!
//! Clients send dates and times as plain strings. Dates may arrive as a bare
//! `YYYY-MM-DD` or as a full datetime whose date part is used; times accept
//! both `HH:MM` and `HH:MM:SS[.fff]`; datetimes accept RFC 3339 or a naive
//! `YYYY-MM-DDTHH:MM[:SS]`, which is taken as UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::errors::{CalError, CalResult};

const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

pub fn parse_date(field: &str, value: &str) -> CalResult<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    parse_datetime(field, value)
        .map(|datetime| datetime.date_naive())
        .map_err(|_| invalid(field, value, "an ISO date"))
}

pub fn parse_time(field: &str, value: &str) -> CalResult<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M:%S%.f")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| invalid(field, value, "an ISO time"))
}

pub fn parse_datetime(field: &str, value: &str) -> CalResult<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Ok(datetime.with_timezone(&Utc));
    }
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
        .ok_or_else(|| invalid(field, value, "an ISO datetime"))
}

fn invalid(field: &str, value: &str, expected: &str) -> CalError {
    CalError::Validation(format!("{field} must be {expected}, got '{value}'"))
}
