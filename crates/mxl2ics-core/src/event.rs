//! Event records decoded from the schedule feed.

use chrono::{DateTime, Utc};

use crate::recurrence::RecurrenceSpec;

/// Placeholder used when an event carries no `id` attribute.
pub const PLACEHOLDER_ID: &str = "x";

/// One `event` element of the feed.
///
/// Every field is optional in the feed; absence of one never blocks the
/// others from being emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    /// Feed-assigned identifier.
    pub id: String,
    /// Title, trimmed.
    pub title: String,
    /// Description, only set when non-empty.
    pub description: Option<String>,
    /// Location, trimmed, only set when non-empty.
    pub location: Option<String>,
    /// Start instant.
    pub start: Option<DateTime<Utc>>,
    /// End instant.
    pub end: Option<DateTime<Utc>>,
    /// Whether start/end are rendered as dates.
    pub is_all_day: bool,
    /// Recurrence attributes, if the event has a `recurrence` child.
    pub recurrence: Option<RecurrenceSpec>,
}

impl Default for EventRecord {
    fn default() -> Self {
        Self::new(PLACEHOLDER_ID, "")
    }
}

impl EventRecord {
    /// Creates a new record with the given id and title.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            location: None,
            start: None,
            end: None,
            is_all_day: false,
            recurrence: None,
        }
    }

    /// Builder: set the description (ignored when empty).
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        self.description = (!description.is_empty()).then_some(description);
        self
    }

    /// Builder: set the location (trimmed, ignored when empty).
    pub fn with_location(mut self, location: impl AsRef<str>) -> Self {
        let location = location.as_ref().trim();
        self.location = (!location.is_empty()).then(|| location.to_string());
        self
    }

    /// Builder: set the start instant.
    pub fn with_start(mut self, start: DateTime<Utc>) -> Self {
        self.start = Some(start);
        self
    }

    /// Builder: set the end instant.
    pub fn with_end(mut self, end: DateTime<Utc>) -> Self {
        self.end = Some(end);
        self
    }

    /// Builder: mark as an all-day event.
    pub fn with_all_day(mut self, is_all_day: bool) -> Self {
        self.is_all_day = is_all_day;
        self
    }

    /// Builder: attach recurrence attributes.
    pub fn with_recurrence(mut self, recurrence: RecurrenceSpec) -> Self {
        self.recurrence = Some(recurrence);
        self
    }
}
