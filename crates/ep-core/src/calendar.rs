//! Month and week calendar layouts.
//!
//! These are plain data; rendering is left to the caller.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::event::CalendarEvent;
use crate::period::{Granularity, Period};
use crate::types::EventId;

/// Number of week rows in a month grid. Fixed so that every month renders
/// at the same height.
pub const MONTH_GRID_WEEKS: usize = 6;

/// One day in a month grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    /// False for leading/trailing days borrowed from adjacent months.
    pub in_month: bool,
    /// Category codes of the day's events, in collection order.
    pub emojis: Vec<String>,
}

/// A six-week grid of days covering a month, weeks starting on Monday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthGrid {
    /// First day of the month.
    pub month: NaiveDate,
    pub weeks: Vec<[DayCell; 7]>,
}

/// Builds the month grid for the month containing `reference`.
pub fn month_grid(events: &[CalendarEvent], reference: NaiveDate) -> MonthGrid {
    let month = Period::containing(reference, Granularity::Month);
    let first_monday = Period::containing(month.start, Granularity::Week).start;

    let mut days = first_monday.iter_days();
    let weeks = (0..MONTH_GRID_WEEKS)
        .map(|_| {
            std::array::from_fn(|_| {
                let date = days.next().unwrap_or(NaiveDate::MAX);
                DayCell {
                    date,
                    in_month: month.contains(date),
                    emojis: events_on(events, date)
                        .map(|e| e.emoji().to_string())
                        .collect(),
                }
            })
        })
        .collect();

    MonthGrid {
        month: month.start,
        weeks,
    }
}

/// A timed event positioned within its day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeBlock {
    pub event_id: EventId,
    pub title: String,
    pub emoji: String,
    /// Minutes from midnight to the event start.
    pub start_minute: u16,
    pub duration_minutes: u16,
}

/// One column of a week grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekDay {
    pub date: NaiveDate,
    /// Timed events ordered by start.
    pub blocks: Vec<TimeBlock>,
    /// Events without a time range.
    pub untimed: Vec<EventId>,
}

/// Seven day columns, Monday through Sunday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekGrid {
    pub period: Period,
    pub days: Vec<WeekDay>,
}

/// Builds the week grid for the week containing `reference`.
pub fn week_grid(events: &[CalendarEvent], reference: NaiveDate) -> WeekGrid {
    let period = Period::containing(reference, Granularity::Week);
    let days = period
        .days()
        .map(|date| {
            let mut blocks = Vec::new();
            let mut untimed = Vec::new();
            for event in events_on(events, date) {
                match event.time_range() {
                    Some(range) => blocks.push(TimeBlock {
                        event_id: event.id().clone(),
                        title: event.title().to_string(),
                        emoji: event.emoji().to_string(),
                        start_minute: range.start().minutes_from_midnight(),
                        duration_minutes: range.duration_minutes(),
                    }),
                    None => untimed.push(event.id().clone()),
                }
            }
            blocks.sort_by_key(|b| b.start_minute);
            WeekDay {
                date,
                blocks,
                untimed,
            }
        })
        .collect();

    WeekGrid { period, days }
}

/// Events dated on `date`.
pub fn events_on(events: &[CalendarEvent], date: NaiveDate) -> impl Iterator<Item = &CalendarEvent> {
    events.iter().filter(move |e| e.date() == date)
}

/// Whether the grid cell falls on a weekend.
pub fn is_weekend(date: NaiveDate) -> bool {
    date.weekday().num_days_from_monday() >= 5
}
