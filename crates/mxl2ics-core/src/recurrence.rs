//! Translation of feed recurrence attributes into an RRULE value.
//!
//! Only weekly recurrence is supported. Any other frequency yields no rule,
//! which is a normal outcome rather than an error.

use crate::error::ConvertResult;
use crate::time::{format_utc_basic, parse_feed_datetime};

/// Day codes indexed by the feed's `repeat_on` mask (index 0 is Sunday).
const DAY_CODES: [&str; 7] = ["SU", "MO", "TU", "WE", "TH", "FR", "SA"];

/// Raw attributes of a feed `recurrence` element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecurrenceSpec {
    /// The `type` attribute, e.g. `Weekly`.
    pub frequency: Option<String>,
    /// The `repeat_every` attribute (weeks between occurrences).
    pub interval: Option<String>,
    /// The `until_date` attribute.
    pub until: Option<String>,
    /// The `unitil_date` attribute; some feeds spell it this way.
    pub until_misspelled: Option<String>,
    /// The `repeat_on` attribute, a 7-character `0`/`1` mask.
    pub active_days: Option<String>,
}

impl RecurrenceSpec {
    /// Creates recurrence attributes with the given frequency type.
    pub fn new(frequency: impl Into<String>) -> Self {
        Self {
            frequency: Some(frequency.into()),
            ..Default::default()
        }
    }

    /// Builder: set the interval text.
    pub fn with_interval(mut self, interval: impl Into<String>) -> Self {
        self.interval = Some(interval.into());
        self
    }

    /// Builder: set the `until_date` text.
    pub fn with_until(mut self, until: impl Into<String>) -> Self {
        self.until = Some(until.into());
        self
    }

    /// Builder: set the misspelled `unitil_date` text.
    pub fn with_until_misspelled(mut self, until: impl Into<String>) -> Self {
        self.until_misspelled = Some(until.into());
        self
    }

    /// Builder: set the active-days mask.
    pub fn with_active_days(mut self, mask: impl Into<String>) -> Self {
        self.active_days = Some(mask.into());
        self
    }

    /// Returns true if these attributes describe a weekly rule.
    pub fn is_weekly(&self) -> bool {
        self.frequency
            .as_deref()
            .is_some_and(|f| f.eq_ignore_ascii_case("weekly"))
    }

    /// Returns the UNTIL source text, preferring `until_date`.
    fn until_raw(&self) -> Option<&str> {
        [self.until.as_deref(), self.until_misspelled.as_deref()]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
    }

    /// Returns the interval text, defaulting to `1`.
    fn interval_text(&self) -> &str {
        match self.interval.as_deref().map(str::trim) {
            Some(interval) if !interval.is_empty() => interval,
            _ => "1",
        }
    }

    /// Builds the RRULE value, or `None` for unsupported frequencies.
    ///
    /// # Errors
    ///
    /// Returns an error if the UNTIL value of a weekly rule cannot be parsed.
    pub fn to_rrule(&self) -> ConvertResult<Option<String>> {
        if !self.is_weekly() {
            return Ok(None);
        }

        let mut parts = vec![
            "FREQ=WEEKLY".to_string(),
            format!("INTERVAL={}", self.interval_text()),
        ];

        if let Some(until) = parse_feed_datetime(self.until_raw())? {
            parts.push(format!("UNTIL={}", format_utc_basic(until)));
        }

        if let Some(days) = self.active_days.as_deref().and_then(byday) {
            parts.push(format!("BYDAY={days}"));
        }

        Ok(Some(parts.join(";")))
    }
}

/// Builds the BYDAY list from a 7-character mask.
///
/// Returns `None` if the mask has the wrong length or no active day.
fn byday(mask: &str) -> Option<String> {
    if mask.chars().count() != DAY_CODES.len() {
        return None;
    }

    let days: Vec<&str> = mask
        .chars()
        .zip(DAY_CODES)
        .filter(|(c, _)| *c == '1')
        .map(|(_, code)| code)
        .collect();

    (!days.is_empty()).then(|| days.join(","))
}

/// Translates optional recurrence attributes into an RRULE value.
///
/// # Errors
///
/// Propagates UNTIL parse failures from [`RecurrenceSpec::to_rrule`].
pub fn translate(spec: Option<&RecurrenceSpec>) -> ConvertResult<Option<String>> {
    match spec {
        Some(spec) => spec.to_rrule(),
        None => Ok(None),
    }
}
