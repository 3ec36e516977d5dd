//! Calendar command: month grid or week agenda.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use clap::Args;
use ep_core::calendar::{DayCell, MonthGrid, WeekGrid, is_weekend, month_grid, week_grid};
use ep_core::{CalendarEvent, Granularity, advance_by};
use ep_store::{EventStore, KeyValueStore, Notifier};

use super::summary::format_period_description;
use super::util::{format_hours, resolve_date};

/// Columns per month grid cell.
const CELL_WIDTH: usize = 9;
/// Emojis shown per cell before collapsing into "+N".
const MAX_CELL_EMOJIS: usize = 2;
const WEEKDAY_HEADER: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

#[derive(Debug, Args)]
pub struct CalendarArgs {
    /// Show the week agenda instead of the month grid.
    #[arg(short, long)]
    pub week: bool,

    /// Date inside the month or week to show (default: today).
    #[arg(short, long)]
    pub date: Option<String>,

    /// Number of months (or weeks) to move (negative = earlier).
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    pub offset: i64,
}

/// Terminal columns taken by `s`.
///
/// Assumes every non-ASCII character is a double-width emoji, which holds for
/// the category catalog. Accented letters or other narrow non-ASCII text are
/// over-counted.
fn display_width(s: &str) -> usize {
    s.chars().map(|c| if c.is_ascii() { 1 } else { 2 }).sum()
}

fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_width(s));
    format!("{s}{}", " ".repeat(fill))
}

/// Renders one grid cell: day number plus up to two emojis.
fn format_cell(cell: &DayCell) -> String {
    if !cell.in_month {
        return String::new();
    }
    let mut text = format!("{:>2}", cell.date.day());
    if !cell.emojis.is_empty() {
        text.push(' ');
        for emoji in cell.emojis.iter().take(MAX_CELL_EMOJIS) {
            text.push_str(emoji);
        }
        let hidden = cell.emojis.len().saturating_sub(MAX_CELL_EMOJIS);
        if hidden > 0 {
            write!(text, "+{hidden}").unwrap();
        }
    }
    text
}

/// Formats a month grid, six rows of seven days.
pub fn format_month(grid: &MonthGrid) -> String {
    let mut output = String::new();
    writeln!(output, "{}", grid.month.format("%B %Y")).unwrap();

    let header: String = WEEKDAY_HEADER.iter().map(|d| pad(d, CELL_WIDTH)).collect();
    writeln!(output, "{}", header.trim_end()).unwrap();

    for week in &grid.weeks {
        let row: String = week.iter().map(|c| pad(&format_cell(c), CELL_WIDTH)).collect();
        writeln!(output, "{}", row.trim_end()).unwrap();
    }
    output
}

fn format_minute(minute: u16) -> String {
    format!("{:02}:{:02}", minute / 60, minute % 60)
}

/// Formats a week agenda, one section per day.
pub fn format_week(grid: &WeekGrid, events: &[CalendarEvent]) -> String {
    let mut output = String::new();
    writeln!(output, "{}", format_period_description(&grid.period)).unwrap();

    for day in &grid.days {
        writeln!(output).unwrap();
        writeln!(output, "{}", day.date.format("%a, %b %-d")).unwrap();

        for block in &day.blocks {
            writeln!(
                output,
                "  {}-{}  {} {}",
                format_minute(block.start_minute),
                format_minute(block.start_minute + block.duration_minutes),
                block.emoji,
                block.title
            )
            .unwrap();
        }
        for id in &day.untimed {
            if let Some(event) = events.iter().find(|e| e.id() == id) {
                writeln!(
                    output,
                    "  {:<11}  {} {} ({})",
                    "untimed",
                    event.emoji(),
                    event.title(),
                    format_hours(event.hours())
                )
                .unwrap();
            }
        }

        if day.blocks.is_empty() && day.untimed.is_empty() {
            let note = if is_weekend(day.date) { "free" } else { "nothing scheduled" };
            writeln!(output, "  {note}").unwrap();
        }
    }
    output
}

pub fn run<W, S, N>(
    writer: &mut W,
    store: &EventStore<S, N>,
    args: &CalendarArgs,
    today: NaiveDate,
) -> Result<()>
where
    W: Write,
    S: KeyValueStore,
    N: Notifier,
{
    let reference = resolve_date(args.date.as_deref(), today)?;

    if args.week {
        let reference = advance_by(reference, Granularity::Week, args.offset)
            .context("offset out of range")?;
        let grid = week_grid(store.events(), reference);
        write!(writer, "{}", format_week(&grid, store.events()))?;
    } else {
        let reference = advance_by(reference, Granularity::Month, args.offset)
            .context("offset out of range")?;
        let grid = month_grid(store.events(), reference);
        write!(writer, "{}", format_month(&grid))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn events() -> Vec<CalendarEvent> {
        serde_json::from_str(
            r#"[
            {"id":"a","date":"2024-03-04","title":"Focus","emoji":"💻","startTime":"09:00","endTime":"10:30"},
            {"id":"b","date":"2024-03-04","title":"Lunch","emoji":"🍔","startTime":"12:00","endTime":"13:00"},
            {"id":"c","date":"2024-03-04","title":"Run","emoji":"🏃","startTime":"18:00","endTime":"19:00"},
            {"id":"d","date":"2024-03-06","title":"Reading","emoji":"📚","hours":2},
            {"id":"e","date":"2024-03-20","title":"Party","emoji":"🎉","hours":3}
        ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_display_width_counts_emoji_twice() {
        assert_eq!(display_width("12"), 2);
        assert_eq!(display_width("4 💻"), 4);
        assert_eq!(pad("4 💻", 6), "4 💻  ");
        // Non-ASCII is always counted as wide
        assert_eq!(display_width("é"), 2);
    }

    #[test]
    fn test_format_cell() {
        let cell = DayCell {
            date: date(2024, 3, 4),
            in_month: true,
            emojis: vec!["💻".into(), "🍔".into(), "🏃".into()],
        };
        assert_eq!(format_cell(&cell), " 4 💻🍔+1");

        let outside = DayCell {
            date: date(2024, 2, 26),
            in_month: false,
            emojis: vec!["💻".into()],
        };
        assert_eq!(format_cell(&outside), "");
    }

    #[test]
    fn test_format_month() {
        let grid = month_grid(&events(), date(2024, 3, 15));
        let output = format_month(&grid);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "March 2024");
        assert_eq!(lines[1], "Mon      Tue      Wed      Thu      Fri      Sat      Sun");
        assert_eq!(lines.len(), 8);
        // Mar 1 is a Friday; the first four columns belong to February
        assert!(lines[2].starts_with(&" ".repeat(CELL_WIDTH * 4)));
        assert!(lines[2].ends_with(" 3"));
        assert!(lines[3].starts_with(" 4 💻🍔+1"));
        assert!(lines[3].contains(" 6 📚"));
        assert!(lines[5].contains("20 🎉"));
    }

    #[test]
    fn test_format_week() {
        let grid = week_grid(&events(), date(2024, 3, 6));
        let output = format_week(&grid, &events());
        assert_snapshot!(output, @r"
        Week of Mar 4, 2024 (through Mar 10)

        Mon, Mar 4
          09:00-10:30  💻 Focus
          12:00-13:00  🍔 Lunch
          18:00-19:00  🏃 Run

        Tue, Mar 5
          nothing scheduled

        Wed, Mar 6
          untimed      📚 Reading (2.0 hrs)

        Thu, Mar 7
          nothing scheduled

        Fri, Mar 8
          nothing scheduled

        Sat, Mar 9
          free

        Sun, Mar 10
          free
        ");
    }

    #[test]
    fn test_run_with_offset_shows_next_month() {
        use ep_store::{EVENTS_KEY, LogNotifier, MemoryStore};

        let raw = serde_json::to_string(&events()).unwrap();
        let store = EventStore::load(MemoryStore::with_value(EVENTS_KEY, &raw), LogNotifier);
        let args = CalendarArgs {
            week: false,
            date: Some("2024-01-31".to_string()),
            offset: 2,
        };

        let mut output = Vec::new();
        run(&mut output, &store, &args, date(2024, 1, 1)).unwrap();
        let output = String::from_utf8(output).unwrap();
        assert!(output.starts_with("March 2024\n"));
        assert!(output.contains("20 🎉"));
    }

    #[test]
    fn test_run_rejects_offset_past_date_range() {
        use ep_store::{LogNotifier, MemoryStore};

        let store = EventStore::load(MemoryStore::new(), LogNotifier);
        for week in [false, true] {
            let args = CalendarArgs {
                week,
                date: Some("2024-03-06".to_string()),
                offset: i64::MAX,
            };
            let mut output = Vec::new();
            let err = run(&mut output, &store, &args, date(2024, 3, 6)).unwrap_err();
            assert_eq!(err.to_string(), "offset out of range");
        }
    }
}
