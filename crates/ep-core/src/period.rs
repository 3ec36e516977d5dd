//! Period bucketing: day, week and month windows around a reference date.
//!
//! Weeks start on Monday. All bounds are inclusive calendar dates, so a week
//! covers Monday 00:00 through the end of Sunday.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Length of an aggregation window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    #[default]
    Week,
    Month,
}

impl Granularity {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = UnknownGranularity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            _ => Err(UnknownGranularity(s.to_string())),
        }
    }
}

/// Error type for unknown granularity strings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown period: {0} (expected day, week or month)")]
pub struct UnknownGranularity(String);

/// Direction to move a period window in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    const fn sign(self) -> i64 {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }
}

/// An inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Period {
    pub granularity: Granularity,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Period {
    /// The period of the given granularity that contains `reference`.
    pub fn containing(reference: NaiveDate, granularity: Granularity) -> Self {
        let (start, end) = match granularity {
            Granularity::Day => (reference, reference),
            Granularity::Week => week_bounds(reference),
            Granularity::Month => month_bounds(reference),
        };
        Self {
            granularity,
            start,
            end,
        }
    }

    /// Whether `date` falls inside the period, inclusive of both ends.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Iterates every date in the period, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}

/// Calculates week bounds (Monday through Sunday) around `date`.
///
/// Weeks at the edge of the representable range are clipped to it.
fn week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let days_since_monday = u64::from(date.weekday().num_days_from_monday());
    let monday = date
        .checked_sub_days(Days::new(days_since_monday))
        .unwrap_or(NaiveDate::MIN);
    let sunday = monday
        .checked_add_days(Days::new(6))
        .unwrap_or(NaiveDate::MAX);
    (monday, sunday)
}

/// Calculates month bounds (first through last day) around `date`.
fn month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = date - Days::new(u64::from(date.day0()));
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX);
    (first, last)
}

/// Steps `reference` one day, week or month in `direction`.
///
/// Month steps keep the day of month, clamped to the target month's length.
/// Returns `None` past the representable date range.
pub fn advance(
    reference: NaiveDate,
    granularity: Granularity,
    direction: Direction,
) -> Option<NaiveDate> {
    advance_by(reference, granularity, direction.sign())
}

/// Steps `reference` by `steps` periods; negative values move backwards.
///
/// Returns `None` if the result falls outside the representable date range.
pub fn advance_by(reference: NaiveDate, granularity: Granularity, steps: i64) -> Option<NaiveDate> {
    let days_per_step = match granularity {
        Granularity::Day => 1,
        Granularity::Week => 7,
        Granularity::Month => {
            let months = Months::new(u32::try_from(steps.unsigned_abs()).ok()?);
            return if steps >= 0 {
                reference.checked_add_months(months)
            } else {
                reference.checked_sub_months(months)
            };
        }
    };

    let days = Days::new(steps.unsigned_abs().checked_mul(days_per_step)?);
    if steps >= 0 {
        reference.checked_add_days(days)
    } else {
        reference.checked_sub_days(days)
    }
}
