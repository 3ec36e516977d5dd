//! Shared utilities for CLI commands.

use std::sync::LazyLock;

use anyhow::Context;
use chrono::{Duration, NaiveDate};
use regex::Regex;

/// Pre-compiled regex for relative date parsing.
static RELATIVE_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(\d+)\s+(day|week)s?\s+ago|in\s+(\d+)\s+(day|week)s?)$").unwrap()
});

/// Conservative bound for relative dates (~1000 years in days).
const MAX_RELATIVE_DAYS: i64 = 1000 * 365;

/// Parse a date string as an ISO 8601 date, a keyword, or a relative date.
///
/// Supports:
/// - ISO 8601: "2024-03-04"
/// - Keywords: "today", "yesterday", "tomorrow"
/// - Relative: "3 days ago", "1 week ago", "in 2 days", "in 1 week"
pub fn parse_date(s: &str, today: NaiveDate) -> anyhow::Result<NaiveDate> {
    let s = s.trim().to_ascii_lowercase();

    if let Ok(date) = NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
        return Ok(date);
    }

    match s.as_str() {
        "today" => return Ok(today),
        "yesterday" => return Ok(today - Duration::days(1)),
        "tomorrow" => return Ok(today + Duration::days(1)),
        _ => {}
    }

    let Some(caps) = RELATIVE_DATE_RE.captures(&s) else {
        anyhow::bail!(
            "Invalid date: {s}. Use YYYY-MM-DD (e.g., 2024-03-04), today/yesterday/tomorrow, or relative (e.g., '2 days ago', 'in 1 week')"
        );
    };

    let (number, unit, sign) = match (caps.get(1), caps.get(2), caps.get(3), caps.get(4)) {
        (Some(n), Some(u), _, _) => (n.as_str(), u.as_str(), -1),
        (_, _, Some(n), Some(u)) => (n.as_str(), u.as_str(), 1),
        _ => anyhow::bail!("Invalid date: {s}"),
    };

    let n: i64 = number
        .parse()
        .context("failed to parse number in relative date")?;
    let days_per_unit = if unit == "week" { 7 } else { 1 };

    if n > MAX_RELATIVE_DAYS / days_per_unit {
        anyhow::bail!("Relative date too far away: {n} {unit}s");
    }

    Ok(today + Duration::days(sign * n * days_per_unit))
}

/// Resolves an optional date argument, defaulting to today.
pub fn resolve_date(s: Option<&str>, today: NaiveDate) -> anyhow::Result<NaiveDate> {
    s.map_or(Ok(today), |s| parse_date(s, today))
}

/// Formats hours with one decimal place, e.g. "1.5 hrs".
pub fn format_hours(hours: f64) -> String {
    format!("{hours:.1} hrs")
}

/// Generates a 10-character progress bar.
/// Non-zero values below 5% of max get a single block for visibility.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn progress_bar(value: f64, max: f64) -> String {
    if max <= 0.0 {
        return "░░░░░░░░░░".to_string();
    }

    let ratio = value / max;
    let filled = if ratio < 0.05 && value > 0.0 {
        1
    } else {
        (ratio * 10.0).round().clamp(0.0, 10.0) as usize
    };

    let empty = 10 - filled;
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}
