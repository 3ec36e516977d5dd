//! Calendar events and the validated input used to create them.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::category;
use crate::types::{EventId, Hours, TimeRange, ValidationError, WallTime};

/// Maximum title length, in characters.
pub const MAX_TITLE_LEN: usize = 100;

/// Maximum description length, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// How long an event lasts.
///
/// A time range is the primary representation; a bare duration is only used
/// when no time of day is known. An event never carries both.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Duration {
    /// Start and end times on the event's date.
    Span(TimeRange),
    /// A directly entered number of hours.
    Hours(Hours),
}

impl Duration {
    /// The duration in hours.
    #[must_use]
    pub fn hours(&self) -> f64 {
        match self {
            Self::Span(range) => range.hours(),
            Self::Hours(hours) => hours.value(),
        }
    }
}

/// A validated event, ready to be added to the store.
///
/// This is the form layer's output: every field has been checked, and the
/// store accepts it without further validation.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEventInput {
    title: String,
    emoji: String,
    date: NaiveDate,
    duration: Duration,
    description: Option<String>,
}

impl CalendarEventInput {
    /// Validates the form fields.
    ///
    /// The title is trimmed and must be 1-100 characters, the emoji must be a
    /// catalog code, and the description may be at most 500 characters.
    /// A blank description is treated as absent.
    pub fn new(
        title: &str,
        emoji: &str,
        date: NaiveDate,
        duration: Duration,
        description: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::Empty { field: "title" });
        }
        check_len("title", title, MAX_TITLE_LEN)?;

        if !category::is_known(emoji) {
            return Err(ValidationError::UnknownCategory {
                code: emoji.to_string(),
            });
        }

        let description = description.map(str::trim).filter(|d| !d.is_empty());
        if let Some(description) = description {
            check_len("description", description, MAX_DESCRIPTION_LEN)?;
        }

        Ok(Self {
            title: title.to_string(),
            emoji: emoji.to_string(),
            date,
            duration,
            description: description.map(String::from),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn emoji(&self) -> &str {
        &self.emoji
    }

    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    pub const fn duration(&self) -> Duration {
        self.duration
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len > max {
        return Err(ValidationError::TooLong { field, len, max });
    }
    Ok(())
}

/// A stored calendar event.
///
/// Events are immutable once created. When a time range is present,
/// `hours` is always derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredEvent", into = "StoredEvent")]
pub struct CalendarEvent {
    id: EventId,
    date: NaiveDate,
    title: String,
    emoji: String,
    hours: f64,
    time_range: Option<TimeRange>,
    description: Option<String>,
}

impl CalendarEvent {
    /// Creates an event from validated input under the given ID.
    pub fn from_input(id: EventId, input: CalendarEventInput) -> Self {
        let (hours, time_range) = match input.duration {
            Duration::Span(range) => (range.hours(), Some(range)),
            Duration::Hours(hours) => (hours.value(), None),
        };
        Self {
            id,
            date: input.date,
            title: input.title,
            emoji: input.emoji,
            hours,
            time_range,
            description: input.description,
        }
    }

    pub const fn id(&self) -> &EventId {
        &self.id
    }

    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// The category code.
    pub fn emoji(&self) -> &str {
        &self.emoji
    }

    pub const fn hours(&self) -> f64 {
        self.hours
    }

    pub const fn time_range(&self) -> Option<TimeRange> {
        self.time_range
    }

    pub fn start_time(&self) -> Option<WallTime> {
        self.time_range.map(|r| r.start())
    }

    pub fn end_time(&self) -> Option<WallTime> {
        self.time_range.map(|r| r.end())
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Key the store sorts by: date, then start time with untimed events first.
    pub fn sort_key(&self) -> (NaiveDate, Option<WallTime>) {
        (self.date, self.start_time())
    }
}

impl fmt::Display for CalendarEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.emoji, self.title)?;
        if let Some(range) = self.time_range {
            write!(f, " ({range})")?;
        }
        Ok(())
    }
}

/// Errors turning a stored record back into an event.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// Only one of `startTime`/`endTime` was present.
    #[error("startTime and endTime must be given together")]
    HalfOpenRange,
    /// A field held an invalid value.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    /// `hours` was negative or not a number.
    #[error("hours must be a non-negative number, got {0}")]
    NegativeHours(f64),
}

/// The persisted JSON shape of an event.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredEvent {
    id: EventId,
    #[serde(with = "iso_date")]
    date: NaiveDate,
    title: String,
    emoji: String,
    #[serde(default)]
    hours: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    start_time: Option<WallTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end_time: Option<WallTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl TryFrom<StoredEvent> for CalendarEvent {
    type Error = RecordError;

    fn try_from(stored: StoredEvent) -> Result<Self, Self::Error> {
        let time_range = match (stored.start_time, stored.end_time) {
            (Some(start), Some(end)) => Some(TimeRange::new(start, end)?),
            (None, None) => None,
            _ => return Err(RecordError::HalfOpenRange),
        };

        let hours = match time_range {
            Some(range) => {
                let derived = range.hours();
                if (derived - stored.hours).abs() > 1e-9 {
                    tracing::debug!(
                        event_id = %stored.id,
                        stored = stored.hours,
                        derived,
                        "replacing stored hours with time range duration"
                    );
                }
                derived
            }
            None if stored.hours.is_nan() || stored.hours < 0.0 => {
                return Err(RecordError::NegativeHours(stored.hours));
            }
            None => stored.hours,
        };

        Ok(Self {
            id: stored.id,
            date: stored.date,
            title: stored.title,
            emoji: stored.emoji,
            hours,
            time_range,
            description: stored.description,
        })
    }
}

impl From<CalendarEvent> for StoredEvent {
    fn from(event: CalendarEvent) -> Self {
        Self {
            id: event.id,
            date: event.date,
            title: event.title,
            emoji: event.emoji,
            hours: event.hours,
            start_time: event.time_range.map(|r| r.start()),
            end_time: event.time_range.map(|r| r.end()),
            description: event.description,
        }
    }
}

/// ISO-8601 date (de)serialization.
///
/// Dates are written as `YYYY-MM-DD`. Full timestamps such as
/// `2024-03-04T08:00:00.000Z` are also accepted and converted to the local
/// calendar date they fall on.
mod iso_date {
    use chrono::{DateTime, Local, NaiveDate};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if let Ok(date) = NaiveDate::parse_from_str(&raw, FORMAT) {
            return Ok(date);
        }
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Local).date_naive())
            .map_err(|_| serde::de::Error::custom(format!("invalid ISO-8601 date: {raw}")))
    }
}
