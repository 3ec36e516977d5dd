//! Hours-per-category aggregation over a period.

use chrono::NaiveDate;
use serde::Serialize;

use crate::category::category_label;
use crate::event::CalendarEvent;
use crate::period::{Granularity, Period};

/// Total hours for one category within a period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    /// The category code (emoji).
    pub code: String,
    /// Label from the catalog, or the code itself when unknown.
    pub label: String,
    pub hours: f64,
}

/// Events and totals for one period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub period: Period,
    /// Events dated inside the period, in input order.
    pub filtered: Vec<CalendarEvent>,
    /// Per-category totals, largest first.
    pub totals: Vec<CategoryTotal>,
    pub grand_total: f64,
}

impl Summary {
    /// Total hours recorded for a category, if it appears in the period.
    pub fn total_for(&self, code: &str) -> Option<f64> {
        self.totals.iter().find(|t| t.code == code).map(|t| t.hours)
    }

    /// Whether no events fall inside the period.
    pub fn is_empty(&self) -> bool {
        self.filtered.is_empty()
    }
}

/// Summarizes the events falling in the period around `reference`.
///
/// Categories are ordered by descending hours; ties keep the order in which
/// each category was first seen.
pub fn summarize(
    events: &[CalendarEvent],
    reference: NaiveDate,
    granularity: Granularity,
) -> Summary {
    let period = Period::containing(reference, granularity);

    let filtered: Vec<CalendarEvent> = events
        .iter()
        .filter(|event| period.contains(event.date()))
        .cloned()
        .collect();

    let mut totals: Vec<CategoryTotal> = Vec::new();
    for event in &filtered {
        if let Some(entry) = totals.iter_mut().find(|t| t.code == event.emoji()) {
            entry.hours += event.hours();
        } else {
            totals.push(CategoryTotal {
                code: event.emoji().to_string(),
                label: category_label(event.emoji()).to_string(),
                hours: event.hours(),
            });
        }
    }
    totals.sort_by(|a, b| b.hours.total_cmp(&a.hours));

    let grand_total = filtered.iter().map(CalendarEvent::hours).sum();

    tracing::debug!(
        granularity = %granularity,
        start = %period.start,
        end = %period.end,
        events = filtered.len(),
        categories = totals.len(),
        "summarized period"
    );

    Summary {
        period,
        filtered,
        totals,
        grand_total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(id: &str, date: &str, emoji: &str, hours: f64) -> CalendarEvent {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "date": date,
            "title": format!("event {id}"),
            "emoji": emoji,
            "hours": hours,
        }))
        .unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn week_summary_scenario() {
        let events = vec![
            event("a", "2024-03-04", "work", 2.0),
            event("b", "2024-03-08", "work", 3.0),
            event("c", "2024-03-11", "rest", 1.0),
        ];

        let summary = summarize(&events, date(2024, 3, 6), Granularity::Week);

        let ids: Vec<_> = summary.filtered.iter().map(|e| e.id().as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
        assert_eq!(summary.totals.len(), 1);
        assert_eq!(summary.total_for("work"), Some(5.0));
        assert_eq!(summary.total_for("rest"), None);
        assert!((summary.grand_total - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_collection_yields_empty_totals() {
        let summary = summarize(&[], date(2024, 3, 6), Granularity::Month);
        assert!(summary.is_empty());
        assert!(summary.totals.is_empty());
        assert!(summary.grand_total.abs() < f64::EPSILON);
    }

    #[test]
    fn period_ends_are_inclusive() {
        let events = vec![
            event("mon", "2024-03-04", "💻", 1.0),
            event("sun", "2024-03-10", "💻", 1.0),
            event("prev-sun", "2024-03-03", "💻", 4.0),
        ];
        let summary = summarize(&events, date(2024, 3, 6), Granularity::Week);
        assert_eq!(summary.filtered.len(), 2);
        assert!((summary.grand_total - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn totals_sorted_by_hours_descending_with_stable_ties() {
        let events = vec![
            event("a", "2024-03-04", "📚", 1.0),
            event("b", "2024-03-04", "💻", 4.0),
            event("c", "2024-03-05", "🎮", 1.0),
            event("d", "2024-03-05", "📚", 0.5),
        ];
        let summary = summarize(&events, date(2024, 3, 4), Granularity::Week);
        let order: Vec<_> = summary.totals.iter().map(|t| t.code.as_str()).collect();
        assert_eq!(order, ["💻", "📚", "🎮"]);
        assert_eq!(summary.total_for("📚"), Some(1.5));
    }

    #[test]
    fn labels_resolved_from_catalog_with_fallback() {
        let events = vec![
            event("a", "2024-03-04", "💻", 1.0),
            event("b", "2024-03-04", "custom", 1.0),
        ];
        let summary = summarize(&events, date(2024, 3, 4), Granularity::Day);
        let labels: Vec<_> = summary.totals.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, ["Work", "custom"]);
    }

    #[test]
    fn zero_hour_event_produces_visible_entry() {
        let events = vec![event("a", "2024-03-04", "😴", 0.0)];
        let summary = summarize(&events, date(2024, 3, 4), Granularity::Day);
        assert_eq!(summary.filtered.len(), 1);
        assert_eq!(summary.total_for("😴"), Some(0.0));
        assert!(summary.grand_total.abs() < f64::EPSILON);
    }

    #[test]
    fn grand_total_matches_sum_over_in_period_events() {
        let events: Vec<_> = (1..=31)
            .map(|day| {
                event(
                    &format!("e{day}"),
                    &format!("2024-03-{day:02}"),
                    if day % 2 == 0 { "💻" } else { "📚" },
                    f64::from(day) / 4.0,
                )
            })
            .collect();

        for granularity in [Granularity::Day, Granularity::Week, Granularity::Month] {
            let reference = date(2024, 3, 13);
            let summary = summarize(&events, reference, granularity);
            let period = Period::containing(reference, granularity);
            let expected: f64 = events
                .iter()
                .filter(|e| period.contains(e.date()))
                .map(CalendarEvent::hours)
                .sum();
            assert!((summary.grand_total - expected).abs() < 1e-9);
            let category_sum: f64 = summary.totals.iter().map(|t| t.hours).sum();
            assert!((category_sum - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn summary_serializes_for_json_output() {
        let events = vec![event("a", "2024-03-04", "💻", 2.5)];
        let summary = summarize(&events, date(2024, 3, 4), Granularity::Day);
        insta::assert_json_snapshot!(summary, @r#"
        {
          "period": {
            "granularity": "day",
            "start": "2024-03-04",
            "end": "2024-03-04"
          },
          "filtered": [
            {
              "id": "a",
              "date": "2024-03-04",
              "title": "event a",
              "emoji": "💻",
              "hours": 2.5
            }
          ],
          "totals": [
            {
              "code": "💻",
              "label": "Work",
              "hours": 2.5
            }
          ],
          "grand_total": 2.5
        }
        "#);
    }
}
