//! Summary command: hours per category over a day, week or month.
//!
//! `--offset` moves the window backwards or forwards by whole periods from
//! the reference date.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;
use ep_core::{Granularity, Period, Summary, advance_by, summarize};
use ep_store::{EventStore, KeyValueStore, Notifier};
use serde::Serialize;

use super::util::{format_hours, progress_bar, resolve_date};

#[derive(Debug, Args)]
pub struct SummaryArgs {
    /// Period to summarize: day, week or month (default from config).
    #[arg(short, long)]
    pub period: Option<Granularity>,

    /// Reference date inside the period (default: today).
    #[arg(short, long)]
    pub date: Option<String>,

    /// Number of periods to move from the reference date (negative = earlier).
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    pub offset: i64,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Formats the period heading, e.g. "Week of Mar 4, 2024".
pub fn format_period_description(period: &Period) -> String {
    match period.granularity {
        Granularity::Day => period.start.format("%A, %b %-d, %Y").to_string(),
        Granularity::Week => format!(
            "Week of {} (through {})",
            period.start.format("%b %-d, %Y"),
            period.end.format("%b %-d")
        ),
        Granularity::Month => period.start.format("%B %Y").to_string(),
    }
}

/// Formats the human-readable summary.
pub fn format_summary(summary: &Summary) -> String {
    let mut output = String::new();
    let granularity = summary.period.granularity;

    writeln!(
        output,
        "SUMMARY: {}",
        format_period_description(&summary.period)
    )
    .unwrap();
    writeln!(
        output,
        "Total scheduled hours for this {granularity}: {}",
        format_hours(summary.grand_total)
    )
    .unwrap();

    if summary.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "No events scheduled for this {granularity}.").unwrap();
        return output;
    }

    writeln!(output).unwrap();
    writeln!(output, "BY CATEGORY").unwrap();
    writeln!(output, "───────────").unwrap();

    let max = summary.totals.first().map_or(0.0, |t| t.hours);
    for total in &summary.totals {
        writeln!(
            output,
            "{} {:<12}{:>10}  {}",
            total.code,
            total.label,
            format_hours(total.hours),
            progress_bar(total.hours, max)
        )
        .unwrap();
    }

    writeln!(output).unwrap();
    let count = summary.filtered.len();
    let noun = if count == 1 { "event" } else { "events" };
    writeln!(output, "{count} {noun} in this {granularity}").unwrap();

    output
}

// ========== JSON Output ==========

#[derive(Debug, Serialize)]
pub struct JsonSummary {
    pub period: JsonPeriod,
    pub totals: Vec<JsonCategory>,
    pub grand_total: f64,
    pub events: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct JsonPeriod {
    #[serde(rename = "type")]
    pub granularity: Granularity,
    pub start: String,
    pub end: String,
}

#[derive(Debug, Serialize)]
pub struct JsonCategory {
    pub emoji: String,
    pub label: String,
    pub hours: f64,
}

/// Formats the summary as JSON.
pub fn format_summary_json(summary: &Summary) -> Result<String> {
    let report = JsonSummary {
        period: JsonPeriod {
            granularity: summary.period.granularity,
            start: summary.period.start.format("%Y-%m-%d").to_string(),
            end: summary.period.end.format("%Y-%m-%d").to_string(),
        },
        totals: summary
            .totals
            .iter()
            .map(|t| JsonCategory {
                emoji: t.code.clone(),
                label: t.label.clone(),
                hours: t.hours,
            })
            .collect(),
        grand_total: summary.grand_total,
        events: summary
            .filtered
            .iter()
            .map(|e| e.id().to_string())
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

// ========== Public Interface ==========

/// Runs the summary command.
pub fn run<W, S, N>(
    writer: &mut W,
    store: &EventStore<S, N>,
    args: &SummaryArgs,
    default_period: Granularity,
    today: NaiveDate,
) -> Result<Summary>
where
    W: Write,
    S: KeyValueStore,
    N: Notifier,
{
    let granularity = args.period.unwrap_or(default_period);
    let reference = resolve_date(args.date.as_deref(), today)?;
    let reference =
        advance_by(reference, granularity, args.offset).context("offset out of range")?;

    let summary = summarize(store.events(), reference, granularity);

    if args.json {
        writeln!(writer, "{}", format_summary_json(&summary)?)?;
    } else {
        write!(writer, "{}", format_summary(&summary))?;
    }
    Ok(summary)
}
