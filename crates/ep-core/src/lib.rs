//! Core domain logic for the emoji planner.
//!
//! This crate contains the fundamental types and logic for:
//! - Events: validated form input and the stored event record
//! - Categories: the fixed emoji catalog and label lookup
//! - Periods: day/week/month windows and navigation between them
//! - Summaries: hours per category over a period
//! - Calendar: month and week grid layouts

pub mod calendar;
pub mod category;
mod event;
pub mod period;
mod summary;
mod types;

pub use category::{Category, category_label};
pub use event::{
    CalendarEvent, CalendarEventInput, Duration, MAX_DESCRIPTION_LEN, MAX_TITLE_LEN, RecordError,
};
pub use period::{Direction, Granularity, Period, advance, advance_by};
pub use summary::{CategoryTotal, Summary, summarize};
pub use types::{EventId, Hours, TimeRange, ValidationError, WallTime};
