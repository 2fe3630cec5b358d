//! Datetime handling for the schedule feed.
//!
//! The feed encodes instants as `{utcdatetime:U2022-07-14T19:00:00.000}`, and
//! occasionally as plain ISO-8601 text. Both are read as UTC wall-clock values:
//! the text is never shifted from another zone.
//!
//! This module also provides the [`Clock`] capability used by the document
//! assembler for DTSTAMP and UID fallbacks.

use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use regex::Regex;

use crate::error::{ConvertError, ConvertResult};

/// Regex for the feed's `{utcdatetime:U...}` wrapper.
static UTC_WRAPPER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{utcdatetime:U([0-9\-:T\.]+)\}").expect("Invalid utcdatetime regex")
});

/// ISO-8601 local date-time shapes accepted by the feed.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// The same shapes with a UTC offset (`+05:00` or `+0500`).
const OFFSET_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%dT%H:%M%z",
];

/// Basic iCalendar UTC format (`YYYYMMDDTHHMMSSZ`).
const ICS_UTC_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Basic iCalendar date format (`YYYYMMDD`).
const ICS_DATE_FORMAT: &str = "%Y%m%d";

/// Parses a feed datetime into a UTC instant.
///
/// Returns `Ok(None)` when the value is absent or empty. Whitespace-only text
/// is not empty and fails to parse.
///
/// # Errors
///
/// Returns [`ConvertError::DatetimeFormat`] naming the original string when it
/// matches neither the wrapper pattern nor plain ISO-8601.
pub fn parse_feed_datetime(raw: Option<&str>) -> ConvertResult<Option<DateTime<Utc>>> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    if raw.is_empty() {
        return Ok(None);
    }

    let candidate = match UTC_WRAPPER_REGEX.captures(raw) {
        Some(caps) => {
            let iso = caps.get(1).map_or("", |m| m.as_str());
            iso.strip_suffix(".000").unwrap_or(iso)
        }
        None => {
            let trimmed = raw.trim();
            trimmed.strip_suffix('Z').unwrap_or(trimmed)
        }
    };

    parse_iso_local(candidate)
        .map(|naive| Some(naive.and_utc()))
        .ok_or_else(|| ConvertError::datetime(raw))
}

/// Parses an ISO-8601 date-time as a wall-clock value.
///
/// An offset, if present, is dropped without shifting the time. A bare date is
/// read as midnight.
fn parse_iso_local(s: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            OFFSET_DATETIME_FORMATS.iter().find_map(|fmt| {
                DateTime::<FixedOffset>::parse_from_str(s, fmt)
                    .ok()
                    .map(|dt| dt.naive_local())
            })
        })
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}

/// Formats an instant as a basic iCalendar UTC value (`20220714T190000Z`).
pub fn format_utc_basic(dt: DateTime<Utc>) -> String {
    dt.format(ICS_UTC_FORMAT).to_string()
}

/// Formats the date part of an instant as a basic iCalendar date (`20220714`).
pub fn format_date_basic(dt: DateTime<Utc>) -> String {
    dt.format(ICS_DATE_FORMAT).to_string()
}

/// Source of the current time.
///
/// Passed into the assembler so tests can pin DTSTAMP and UID fallbacks.
pub trait Clock {
    /// Returns the current instant in UTC.
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that always returns the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
