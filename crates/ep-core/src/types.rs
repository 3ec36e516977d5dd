//! Core type definitions with validation.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Matches a 24-hour `HH:MM` wall-clock time.
static WALL_TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([01]\d|2[0-3]):([0-5]\d)$").unwrap());

/// Validation errors raised by the event form layer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} is required")]
    Empty { field: &'static str },

    /// The provided value exceeded its maximum length.
    #[error("{field} is too long ({len} characters, max {max})")]
    TooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    /// A wall-clock time was not in `HH:MM` form.
    #[error("invalid time format (HH:MM): {value}")]
    InvalidTime { value: String },

    /// The end of a time range did not follow its start.
    #[error("end time must be after start time ({start} - {end})")]
    EndNotAfterStart { start: WallTime, end: WallTime },

    /// A directly entered duration was outside the allowed bounds.
    #[error("hours must be between {min} and {max}, got {value}")]
    HoursOutOfRange { value: f64, min: f64, max: f64 },

    /// The category code is not part of the catalog.
    #[error("unknown category: {code}")]
    UnknownCategory { code: String },
}

/// A calendar event identifier.
///
/// IDs are opaque non-empty strings. The event store assigns UUIDs, but
/// imported data may carry any identifier; uniqueness within a collection
/// is the store's concern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EventId(String);

impl EventId {
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::Empty { field: "event ID" });
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for EventId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EventId> for String {
    fn from(id: EventId) -> Self {
        id.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A wall-clock time of day with minute precision, written as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WallTime(u16);

impl WallTime {
    /// Parses a strict 24-hour `HH:MM` string.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidTime {
            value: value.to_string(),
        };
        let caps = WALL_TIME_RE.captures(value).ok_or_else(invalid)?;
        let hours: u16 = caps[1].parse().map_err(|_| invalid())?;
        let minutes: u16 = caps[2].parse().map_err(|_| invalid())?;
        Ok(Self(hours * 60 + minutes))
    }

    /// Builds a time from hour and minute components.
    pub fn from_hm(hours: u16, minutes: u16) -> Result<Self, ValidationError> {
        if hours > 23 || minutes > 59 {
            return Err(ValidationError::InvalidTime {
                value: format!("{hours:02}:{minutes:02}"),
            });
        }
        Ok(Self(hours * 60 + minutes))
    }

    /// Minutes elapsed since midnight.
    #[must_use]
    pub const fn minutes_from_midnight(self) -> u16 {
        self.0
    }

    #[must_use]
    pub const fn hour(self) -> u16 {
        self.0 / 60
    }

    #[must_use]
    pub const fn minute(self) -> u16 {
        self.0 % 60
    }
}

impl fmt::Display for WallTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for WallTime {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for WallTime {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<WallTime> for String {
    fn from(time: WallTime) -> Self {
        time.to_string()
    }
}

/// A start/end pair on a single date, with the end strictly after the start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeRange {
    start: WallTime,
    end: WallTime,
}

impl TimeRange {
    /// Creates a range, rejecting ranges that are empty or run backwards.
    pub fn new(start: WallTime, end: WallTime) -> Result<Self, ValidationError> {
        if end <= start {
            return Err(ValidationError::EndNotAfterStart { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parses both ends from `HH:MM` strings.
    pub fn parse(start: &str, end: &str) -> Result<Self, ValidationError> {
        Self::new(WallTime::parse(start)?, WallTime::parse(end)?)
    }

    #[must_use]
    pub const fn start(&self) -> WallTime {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> WallTime {
        self.end
    }

    /// Length of the range in whole minutes.
    #[must_use]
    pub const fn duration_minutes(&self) -> u16 {
        self.end.0 - self.start.0
    }

    /// Length of the range in hours.
    #[must_use]
    pub fn hours(&self) -> f64 {
        f64::from(self.duration_minutes()) / 60.0
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// A directly entered duration in hours, bounded to \[0.1, 24\].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Hours(f64);

impl Hours {
    /// Smallest duration the form accepts.
    pub const MIN: f64 = 0.1;

    /// Largest duration the form accepts.
    pub const MAX: f64 = 24.0;

    /// Creates a duration after validation.
    ///
    /// Returns an error if the value is outside \[0.1, 24\] or is NaN.
    pub fn new(value: f64) -> Result<Self, ValidationError> {
        if value.is_nan() || !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ValidationError::HoursOutOfRange {
                value,
                min: Self::MIN,
                max: Self::MAX,
            });
        }
        Ok(Self(value))
    }

    /// Returns the inner value.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Hours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}
