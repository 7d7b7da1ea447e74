//! User-input parsers for dates, date-times and snooze durations.
//!
//! Malformed input is rejected here, before anything reaches the planner
//! service, with a message naming the accepted formats.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

const DATE_FORMATS: &[(&str, &str)] = &[
    ("%Y-%m-%d", "YYYY-MM-DD"),
    ("%d/%m/%Y", "DD/MM/YYYY"),
    ("%d-%m-%Y", "DD-MM-YYYY"),
];

const DATETIME_FORMATS: &[(&str, &str)] = &[
    ("%Y-%m-%d %H:%M", "YYYY-MM-DD HH:MM"),
    ("%Y-%m-%dT%H:%M", "YYYY-MM-DDTHH:MM"),
    ("%d/%m/%Y %H:%M", "DD/MM/YYYY HH:MM"),
    ("%d-%m-%Y %H:%M", "DD-MM-YYYY HH:MM"),
];

static DURATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,5}):(\d{1,4})$").expect("valid duration regex"));

/// Parses a calendar date in any of the accepted formats.
pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    let trimmed = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|(format, _)| NaiveDate::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| {
            format!(
                "could not parse date `{value}`; expected one of {}",
                expected(DATE_FORMATS)
            )
        })
}

/// Parses a date-time (minute precision) in any of the accepted formats.
pub fn parse_datetime(value: &str) -> Result<NaiveDateTime, String> {
    let trimmed = value.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|(format, _)| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| {
            format!(
                "could not parse date/time `{value}`; expected one of {}",
                expected(DATETIME_FORMATS)
            )
        })
}

/// Parses an `HH:MM` snooze duration. Minutes above 59 are carried over.
pub fn parse_duration(value: &str) -> Result<Duration, String> {
    let invalid = || format!("invalid duration `{value}`; expected HH:MM");
    let captures = DURATION_RE.captures(value.trim()).ok_or_else(invalid)?;
    let hours: i64 = captures[1].parse().map_err(|_| invalid())?;
    let minutes: i64 = captures[2].parse().map_err(|_| invalid())?;
    Ok(Duration::hours(hours) + Duration::minutes(minutes))
}

fn expected(formats: &[(&str, &str)]) -> String {
    formats
        .iter()
        .map(|(_, label)| *label)
        .collect::<Vec<_>>()
        .join(", ")
}
