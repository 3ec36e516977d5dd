//! CLI subcommand implementations.

pub mod add;
pub mod calendar;
pub mod categories;
pub mod list;
pub mod remove;
pub mod summary;
pub mod util;
