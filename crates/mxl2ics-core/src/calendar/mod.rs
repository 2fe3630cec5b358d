//! iCalendar document assembly.
//!
//! Walks decoded [`EventRecord`]s in feed order and emits one VCALENDAR with a
//! VEVENT per record. Lines are folded at 75 characters and joined with CRLF.
//!
//! # Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use mxl2ics_core::{FixedClock, convert_with_clock};
//!
//! let clock = FixedClock(Utc.with_ymd_and_hms(2025, 2, 5, 10, 0, 0).unwrap());
//! let ics = convert_with_clock("<schedule/>", &clock).unwrap();
//! assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"));
//! assert!(ics.ends_with("END:VCALENDAR\r\n"));
//! ```

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::ConvertResult;
use crate::event::EventRecord;
use crate::feed::decode_feed;
use crate::recurrence::translate;
use crate::text::{escape_text, fold_line};
use crate::time::{Clock, SystemClock, format_date_basic, format_utc_basic};

/// Product identifier written to every document.
pub const PRODUCT_ID: &str = "-//mxl-to-ics//saskpolytech//EN";

/// Domain suffix of generated UIDs.
const UID_DOMAIN: &str = "mxl2ics";

/// Line terminator required by RFC 5545.
const CRLF: &str = "\r\n";

/// An assembled calendar, held as unfolded content lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDocument {
    lines: Vec<String>,
    event_count: usize,
}

impl CalendarDocument {
    /// Assembles a document from decoded events.
    ///
    /// `now` is used for every DTSTAMP and as the UID fallback for events
    /// without a start.
    ///
    /// # Errors
    ///
    /// Returns an error if a recurrence UNTIL value cannot be parsed.
    pub fn from_events(events: &[EventRecord], now: DateTime<Utc>) -> ConvertResult<Self> {
        let mut lines = vec![
            "BEGIN:VCALENDAR".to_string(),
            format!("PRODID:{PRODUCT_ID}"),
            "VERSION:2.0".to_string(),
            "CALSCALE:GREGORIAN".to_string(),
            "METHOD:PUBLISH".to_string(),
        ];

        for event in events {
            push_event(&mut lines, event, now)?;
        }

        lines.push("END:VCALENDAR".to_string());

        Ok(Self {
            lines,
            event_count: events.len(),
        })
    }

    /// Returns the unfolded content lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Returns the number of VEVENT blocks.
    pub fn event_count(&self) -> usize {
        self.event_count
    }

    /// Renders the document: every line folded, CRLF-joined, trailing CRLF.
    pub fn to_ics(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(&fold_line(line));
            out.push_str(CRLF);
        }
        out
    }
}

/// Appends the VEVENT block for one event.
fn push_event(
    lines: &mut Vec<String>,
    event: &EventRecord,
    now: DateTime<Utc>,
) -> ConvertResult<()> {
    let rrule = translate(event.recurrence.as_ref())?;
    let stamp = format_utc_basic(now);

    lines.push("BEGIN:VEVENT".to_string());

    if let Some(start) = event.start {
        lines.push(date_property("DTSTART", start, event.is_all_day));
    }
    if let Some(end) = event.end {
        lines.push(date_property("DTEND", end, event.is_all_day));
    }

    lines.push(format!(
        "UID:{}-{}@{UID_DOMAIN}",
        event.id,
        format_utc_basic(event.start.unwrap_or(now))
    ));
    lines.push(format!("SUMMARY:{}", escape_text(&event.title)));

    if let Some(ref description) = event.description {
        lines.push(format!("DESCRIPTION:{}", escape_text(description)));
    }
    if let Some(ref location) = event.location {
        lines.push(format!("LOCATION:{}", escape_text(location)));
    }
    if let Some(rrule) = rrule {
        lines.push(format!("RRULE:{rrule}"));
    }

    lines.push(format!("DTSTAMP:{stamp}"));
    lines.push("END:VEVENT".to_string());

    Ok(())
}

/// Formats a DTSTART/DTEND line as a date or a UTC date-time.
fn date_property(name: &str, value: DateTime<Utc>, all_day: bool) -> String {
    if all_day {
        format!("{name};VALUE=DATE:{}", format_date_basic(value))
    } else {
        format!("{name}:{}", format_utc_basic(value))
    }
}

/// Decodes a feed and assembles its document, reading `clock` once.
///
/// # Errors
///
/// Returns the first structural or datetime error; nothing is produced in
/// that case.
pub fn build_document(xml: &str, clock: &dyn Clock) -> ConvertResult<CalendarDocument> {
    let events = decode_feed(xml)?;
    let document = CalendarDocument::from_events(&events, clock.now())?;
    debug!(events = document.event_count(), "Assembled calendar document");
    Ok(document)
}

/// Converts a feed to iCalendar text using `clock` for DTSTAMP.
///
/// # Errors
///
/// See [`build_document`].
pub fn convert_with_clock(xml: &str, clock: &dyn Clock) -> ConvertResult<String> {
    build_document(xml, clock).map(|doc| doc.to_ics())
}

/// Converts a feed to iCalendar text using the system clock.
///
/// # Errors
///
/// See [`build_document`].
pub fn convert(xml: &str) -> ConvertResult<String> {
    convert_with_clock(xml, &SystemClock)
}


#[cfg(test)]
mod golden_tests;
