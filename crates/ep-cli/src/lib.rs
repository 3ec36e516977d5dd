//! Emoji planner CLI library.
//!
//! This crate provides the `ep` command-line interface over the event store.

mod cli;
pub mod commands;
mod config;
pub mod notify;

pub use cli::{Cli, Commands};
pub use config::Config;
pub use notify::WarningNotifier;
