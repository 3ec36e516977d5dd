//! The fixed emoji category catalog.
//!
//! Each event is tagged with one category code (an emoji). The catalog maps
//! codes to human-readable labels; lookups never fail, unknown codes are
//! displayed as themselves.

use serde::Serialize;

/// A category the planner offers when creating events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    /// The emoji stored on events.
    pub code: &'static str,
    /// Display label, without the emoji.
    pub label: &'static str,
}

const CATALOG: &[Category] = &[
    Category { code: "💻", label: "Work" },
    Category { code: "📞", label: "Meeting" },
    Category { code: "📚", label: "Study" },
    Category { code: "🏃", label: "Exercise" },
    Category { code: "🍔", label: "Meal" },
    Category { code: "😴", label: "Rest" },
    Category { code: "🎉", label: "Social" },
    Category { code: "🎮", label: "Gaming" },
    Category { code: "🎨", label: "Hobby" },
    Category { code: "🧹", label: "Chores" },
    Category { code: "🚗", label: "Travel" },
    Category { code: "🩺", label: "Health" },
];

/// All categories, in menu order. The first entry is the form default.
pub const fn categories() -> &'static [Category] {
    CATALOG
}

/// Looks up a category by its exact code.
pub fn find(code: &str) -> Option<&'static Category> {
    CATALOG.iter().find(|c| c.code == code)
}

/// Returns whether `code` is one of the catalog codes.
pub fn is_known(code: &str) -> bool {
    find(code).is_some()
}

/// Resolves the display label for a category code, falling back to the code.
pub fn category_label(code: &str) -> &str {
    find(code).map_or(code, |c| c.label)
}

/// Resolves user input to a category, by code or case-insensitive label.
pub fn resolve(query: &str) -> Option<&'static Category> {
    let query = query.trim();
    find(query).or_else(|| {
        CATALOG
            .iter()
            .find(|c| c.label.eq_ignore_ascii_case(query))
    })
}
