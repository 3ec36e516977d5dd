//! Remove command. Deleting an unknown ID is not an error.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use ep_store::{EventStore, KeyValueStore, Notifier};

#[derive(Debug, Args)]
pub struct RemoveArgs {
    /// ID of the event to delete (see `ep list`).
    pub id: String,
}

pub fn run<W, S, N>(writer: &mut W, store: &mut EventStore<S, N>, args: &RemoveArgs) -> Result<bool>
where
    W: Write,
    S: KeyValueStore,
    N: Notifier,
{
    let id = args.id.trim();
    let title = store.get(id).map(|e| e.title().to_string());
    let removed = store.remove(id);

    match title {
        Some(title) if removed => writeln!(writer, "Removed \"{title}\" ({id})")?,
        _ => writeln!(writer, "No event with ID {id}; nothing to remove")?,
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;
    use ep_core::{CalendarEventInput, Duration, Hours};
    use ep_store::{LogNotifier, MemoryStore};

    #[test]
    fn removes_existing_event() {
        let mut store = EventStore::load(MemoryStore::new(), LogNotifier);
        let event = store.add(
            CalendarEventInput::new(
                "Gym",
                "🏃",
                NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
                Duration::Hours(Hours::new(1.0).unwrap()),
                None,
            )
            .unwrap(),
        );

        let mut output = Vec::new();
        let args = RemoveArgs {
            id: event.id().to_string(),
        };
        assert!(run(&mut output, &mut store, &args).unwrap());
        assert!(store.is_empty());
        assert_eq!(
            String::from_utf8(output).unwrap(),
            format!("Removed \"Gym\" ({})\n", event.id())
        );
    }

    #[test]
    fn unknown_id_is_not_an_error() {
        let mut store = EventStore::load(MemoryStore::new(), LogNotifier);
        let mut output = Vec::new();
        let args = RemoveArgs {
            id: "missing".to_string(),
        };
        assert!(!run(&mut output, &mut store, &args).unwrap());
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "No event with ID missing; nothing to remove\n"
        );
    }
}
