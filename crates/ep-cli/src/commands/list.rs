//! List command: events for a day, or every event grouped by date.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use ep_core::CalendarEvent;
use ep_store::{EventStore, KeyValueStore, Notifier};

use super::util::{format_hours, resolve_date};

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Day to list (default: today).
    #[arg(short, long)]
    pub date: Option<String>,

    /// List every event, grouped by date.
    #[arg(long, conflicts_with = "date")]
    pub all: bool,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Formats a single event entry.
fn format_event(output: &mut String, event: &CalendarEvent) {
    let when = event
        .time_range()
        .map_or_else(String::new, |range| format!("{range}, "));
    writeln!(
        output,
        "  {} {} ({when}{})",
        event.emoji(),
        event.title(),
        format_hours(event.hours())
    )
    .unwrap();
    if let Some(description) = event.description() {
        writeln!(output, "     {description}").unwrap();
    }
    writeln!(output, "     id: {}", event.id()).unwrap();
}

/// Formats the events of one day.
pub fn format_day(date: NaiveDate, events: &[&CalendarEvent]) -> String {
    let mut output = String::new();
    writeln!(output, "Events for {}", date.format("%A, %b %-d, %Y")).unwrap();
    writeln!(output).unwrap();

    if events.is_empty() {
        writeln!(output, "No events for this day. Run 'ep add' to schedule one!").unwrap();
        return output;
    }

    for event in events {
        format_event(&mut output, event);
    }
    output
}

/// Formats the whole collection, one section per date.
pub fn format_all(events: &[CalendarEvent]) -> String {
    let mut output = String::new();
    if events.is_empty() {
        writeln!(output, "No events scheduled.").unwrap();
        return output;
    }

    let mut current: Option<NaiveDate> = None;
    for event in events {
        if current != Some(event.date()) {
            if current.is_some() {
                writeln!(output).unwrap();
            }
            writeln!(output, "{}", event.date().format("%a, %b %-d, %Y")).unwrap();
            current = Some(event.date());
        }
        format_event(&mut output, event);
    }
    output
}

pub fn run<W, S, N>(
    writer: &mut W,
    store: &EventStore<S, N>,
    args: &ListArgs,
    today: NaiveDate,
) -> Result<()>
where
    W: Write,
    S: KeyValueStore,
    N: Notifier,
{
    if args.all {
        if args.json {
            writeln!(writer, "{}", serde_json::to_string_pretty(store.events())?)?;
        } else {
            write!(writer, "{}", format_all(store.events()))?;
        }
        return Ok(());
    }

    let date = resolve_date(args.date.as_deref(), today)?;
    let events: Vec<&CalendarEvent> = store.on_date(date).collect();
    if args.json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&events)?)?;
    } else {
        write!(writer, "{}", format_day(date, &events))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;

    fn event(json: &str) -> CalendarEvent {
        serde_json::from_str(json).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format_day_empty() {
        let output = format_day(date(2024, 3, 4), &[]);
        assert_snapshot!(output, @r"
        Events for Monday, Mar 4, 2024

        No events for this day. Run 'ep add' to schedule one!
        ");
    }

    #[test]
    fn test_format_day_with_events() {
        let timed = event(
            r#"{"id":"e1","date":"2024-03-04","title":"Standup","emoji":"📞",
               "startTime":"09:00","endTime":"09:30","description":"daily sync"}"#,
        );
        let untimed = event(r#"{"id":"e2","date":"2024-03-04","title":"Reading","emoji":"📚","hours":2}"#);

        let output = format_day(date(2024, 3, 4), &[&untimed, &timed]);
        assert_snapshot!(output, @r"
        Events for Monday, Mar 4, 2024

          📚 Reading (2.0 hrs)
             id: e2
          📞 Standup (09:00-09:30, 0.5 hrs)
             daily sync
             id: e1
        ");
    }

    #[test]
    fn test_format_all_groups_by_date() {
        let events = vec![
            event(r#"{"id":"a","date":"2024-03-04","title":"One","emoji":"💻","hours":1}"#),
            event(r#"{"id":"b","date":"2024-03-04","title":"Two","emoji":"💻","hours":1}"#),
            event(r#"{"id":"c","date":"2024-03-05","title":"Three","emoji":"🎮","hours":3}"#),
        ];
        let output = format_all(&events);
        assert_eq!(output.matches("Mon, Mar 4, 2024").count(), 1);
        assert_eq!(output.matches("Tue, Mar 5, 2024").count(), 1);
        assert!(output.contains("  🎮 Three (3.0 hrs)"));
    }

    #[test]
    fn test_format_all_empty() {
        assert_eq!(format_all(&[]), "No events scheduled.\n");
    }
}
