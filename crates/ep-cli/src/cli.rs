//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::add::AddArgs;
use crate::commands::calendar::CalendarArgs;
use crate::commands::list::ListArgs;
use crate::commands::remove::RemoveArgs;
use crate::commands::summary::SummaryArgs;

/// Emoji planner.
///
/// Schedule events tagged with an emoji category and see where your hours
/// go, per day, week or month.
#[derive(Debug, Parser)]
#[command(name = "ep", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Add an event.
    Add(AddArgs),

    /// Delete an event by ID.
    #[command(alias = "rm")]
    Remove(RemoveArgs),

    /// List events for a day.
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show hours per category for a day, week or month.
    Summary(SummaryArgs),

    /// Show a month or week calendar.
    #[command(alias = "cal")]
    Calendar(CalendarArgs),

    /// List the available emoji categories.
    Categories {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_add_with_time_range() {
        let cli = Cli::try_parse_from([
            "ep", "add", "Standup", "--emoji", "meeting", "--start", "09:00", "--end", "09:15",
        ])
        .unwrap();
        let Some(Commands::Add(args)) = cli.command else {
            panic!("expected add command");
        };
        assert_eq!(args.title, "Standup");
        assert_eq!(args.start.as_deref(), Some("09:00"));
        assert_eq!(args.end.as_deref(), Some("09:15"));
    }

    #[test]
    fn add_rejects_hours_with_time_range() {
        let result = Cli::try_parse_from([
            "ep", "add", "Standup", "--emoji", "📞", "--start", "09:00", "--end", "09:15",
            "--hours", "1",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn summary_accepts_negative_offset() {
        let cli = Cli::try_parse_from(["ep", "summary", "--period", "month", "--offset", "-2"])
            .unwrap();
        let Some(Commands::Summary(args)) = cli.command else {
            panic!("expected summary command");
        };
        assert_eq!(args.offset, -2);
        assert_eq!(args.period, Some(ep_core::Granularity::Month));
    }
}
