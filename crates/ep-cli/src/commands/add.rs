//! Add command: the event form.
//!
//! Validates the form fields and hands a [`CalendarEventInput`] to the store.

use std::io::Write;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::Args;
use ep_core::{CalendarEvent, CalendarEventInput, Duration, Hours, TimeRange, category};
use ep_store::{EventStore, KeyValueStore, Notifier};

use super::util::{format_hours, resolve_date};

/// Start time used when neither a time range nor hours are given.
const DEFAULT_START: &str = "09:00";
/// End time used when neither a time range nor hours are given.
const DEFAULT_END: &str = "10:00";

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Event title (1-100 characters).
    pub title: String,

    /// Category emoji or its label (see `ep categories`).
    #[arg(short, long)]
    pub emoji: Option<String>,

    /// Date of the event (default: today).
    #[arg(short, long)]
    pub date: Option<String>,

    /// Start time, HH:MM (24-hour).
    #[arg(long, requires = "end", conflicts_with = "hours")]
    pub start: Option<String>,

    /// End time, HH:MM (24-hour). Must be after the start time.
    #[arg(long, requires = "start")]
    pub end: Option<String>,

    /// Duration in hours (0.1-24) when no time range is known.
    #[arg(long)]
    pub hours: Option<f64>,

    /// Optional description (up to 500 characters).
    #[arg(long)]
    pub description: Option<String>,
}

/// Validates the arguments into an event input.
pub fn build_input(args: &AddArgs, today: NaiveDate) -> Result<CalendarEventInput> {
    let emoji = match args.emoji.as_deref() {
        Some(query) => match category::resolve(query) {
            Some(found) => found.code,
            None => bail!("unknown category: {query}. Run 'ep categories' to see the options"),
        },
        None => category::categories()
            .first()
            .map(|c| c.code)
            .context("category catalog is empty")?,
    };

    let date = resolve_date(args.date.as_deref(), today)?;

    let duration = match (&args.start, &args.end, args.hours) {
        (Some(start), Some(end), _) => Duration::Span(TimeRange::parse(start, end)?),
        (None, None, Some(hours)) => Duration::Hours(Hours::new(hours)?),
        (None, None, None) => Duration::Span(TimeRange::parse(DEFAULT_START, DEFAULT_END)?),
        _ => bail!("--start and --end must be given together"),
    };

    let input = CalendarEventInput::new(
        &args.title,
        emoji,
        date,
        duration,
        args.description.as_deref(),
    )?;
    Ok(input)
}

/// Runs the add command.
pub fn run<W, S, N>(
    writer: &mut W,
    store: &mut EventStore<S, N>,
    args: &AddArgs,
    today: NaiveDate,
) -> Result<CalendarEvent>
where
    W: Write,
    S: KeyValueStore,
    N: Notifier,
{
    let input = build_input(args, today).context("invalid event")?;
    let event = store.add(input);

    writeln!(
        writer,
        "Added \"{}\" on {}",
        event.title(),
        event.date().format("%a, %b %-d, %Y")
    )?;
    let when = event
        .time_range()
        .map_or_else(String::new, |range| format!("{range}, "));
    writeln!(
        writer,
        "  {} {}, {when}{}",
        event.emoji(),
        ep_core::category_label(event.emoji()),
        format_hours(event.hours())
    )?;
    writeln!(writer, "  ID: {}", event.id())?;
    Ok(event)
}

#[cfg(test)]
mod tests {
    use super::*;

    use ep_core::ValidationError;
    use ep_store::{LogNotifier, MemoryStore};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 6).unwrap()
    }

    fn args(title: &str) -> AddArgs {
        AddArgs {
            title: title.to_string(),
            emoji: None,
            date: None,
            start: None,
            end: None,
            hours: None,
            description: None,
        }
    }

    #[test]
    fn defaults_to_first_category_today_nine_to_ten() {
        let input = build_input(&args("Plan"), today()).unwrap();
        assert_eq!(input.emoji(), "💻");
        assert_eq!(input.date(), today());
        assert_eq!(
            input.duration(),
            Duration::Span(TimeRange::parse("09:00", "10:00").unwrap())
        );
    }

    #[test]
    fn resolves_category_by_label() {
        let mut a = args("Run");
        a.emoji = Some("exercise".to_string());
        let input = build_input(&a, today()).unwrap();
        assert_eq!(input.emoji(), "🏃");
    }

    #[test]
    fn rejects_unknown_category() {
        let mut a = args("Nap");
        a.emoji = Some("napping".to_string());
        let err = build_input(&a, today()).unwrap_err();
        assert!(err.to_string().contains("unknown category"));
    }

    #[test]
    fn rejects_end_before_start() {
        let mut a = args("Backwards");
        a.start = Some("11:00".to_string());
        a.end = Some("10:00".to_string());
        let err = build_input(&a, today()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ValidationError>(),
            Some(ValidationError::EndNotAfterStart { .. })
        ));
    }

    #[test]
    fn rejects_out_of_range_hours() {
        let mut a = args("Marathon");
        a.hours = Some(25.0);
        let err = build_input(&a, today()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ValidationError>(),
            Some(ValidationError::HoursOutOfRange { .. })
        ));
    }

    #[test]
    fn run_adds_event_and_reports_it() {
        let mut store = EventStore::load(MemoryStore::new(), LogNotifier);
        let mut a = args("Focus");
        a.date = Some("2024-03-04".to_string());
        a.start = Some("09:00".to_string());
        a.end = Some("10:30".to_string());

        let mut output = Vec::new();
        let event = run(&mut output, &mut store, &a, today()).unwrap();

        assert_eq!(store.events(), std::slice::from_ref(&event));
        let output = String::from_utf8(output).unwrap();
        let output = output.replace(event.id().as_str(), "[ID]");
        insta::assert_snapshot!(output, @r#"
        Added "Focus" on Mon, Mar 4, 2024
          💻 Work, 09:00-10:30, 1.5 hrs
          ID: [ID]
        "#);
    }
}
