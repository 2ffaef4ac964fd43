//! Date and time utility functions
//!
//! Dates are persisted as strings: due dates in `%Y-%m-%d` form,
//! timestamps (creation times, OTP expiry) as RFC 3339.

use chrono::{DateTime, Duration, Local, NaiveDate, Utc};

/// Standard date format used for due dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a date string in YYYY-MM-DD format to NaiveDate
pub fn parse_date(date_str: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(date_str, DATE_FORMAT)
}

/// Format a NaiveDate to YYYY-MM-DD string
pub fn format_ymd(d: NaiveDate) -> String {
    d.format(DATE_FORMAT).to_string()
}

/// Format current local date to YYYY-MM-DD string
pub fn format_today() -> String {
    format_ymd(Local::now().date_naive())
}

/// Current UTC time as an RFC 3339 string
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}

/// RFC 3339 timestamp `minutes` from now
pub fn rfc3339_in_minutes(minutes: i64) -> String {
    (Utc::now() + Duration::minutes(minutes)).to_rfc3339()
}

/// Whether an RFC 3339 timestamp lies in the past.
///
/// Unparseable timestamps are treated as expired so that corrupt expiry
/// data can never keep a code valid.
pub fn is_expired(timestamp: &str) -> bool {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(t) => t.with_timezone(&Utc) < Utc::now(),
        Err(_) => true,
    }
}
