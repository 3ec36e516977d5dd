//! The authoritative event collection and its persistence.

use chrono::NaiveDate;
use ep_core::{CalendarEvent, CalendarEventInput, EventId};
use uuid::Uuid;

use crate::{BackendError, EVENTS_KEY, KeyValueStore, Notifier, StorageError};

/// Reads the persisted event collection.
///
/// A missing key is an empty collection. The result is sorted by date.
pub fn load_events<S: KeyValueStore + ?Sized>(
    backend: &S,
) -> Result<Vec<CalendarEvent>, StorageError> {
    let Some(raw) = backend
        .get(EVENTS_KEY)
        .map_err(|source| StorageError::Read {
            key: EVENTS_KEY,
            source,
        })?
    else {
        return Ok(Vec::new());
    };

    let mut events: Vec<CalendarEvent> =
        serde_json::from_str(&raw).map_err(|source| StorageError::Malformed {
            key: EVENTS_KEY,
            source,
        })?;
    sort_events(&mut events);
    Ok(events)
}

fn sort_events(events: &mut [CalendarEvent]) {
    events.sort_by_key(CalendarEvent::sort_key);
}

/// In-memory event collection kept in sync with a key-value backend.
///
/// The collection is loaded once and rewritten in full after every
/// mutation. The in-memory copy is authoritative: failed writes are
/// reported through the [`Notifier`] and never roll it back.
pub struct EventStore<S, N> {
    backend: S,
    notifier: N,
    events: Vec<CalendarEvent>,
}

impl<S: KeyValueStore, N: Notifier> EventStore<S, N> {
    /// Loads the collection from `backend`.
    ///
    /// Never fails: unreadable or malformed data is reported to `notifier`
    /// and the store starts empty.
    pub fn load(backend: S, notifier: N) -> Self {
        let events = match load_events(&backend) {
            Ok(events) => {
                tracing::debug!(count = events.len(), "loaded events");
                events
            }
            Err(error) => {
                notifier.storage_failed(&error);
                Vec::new()
            }
        };
        Self {
            backend,
            notifier,
            events,
        }
    }

    /// All events, sorted by date.
    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Looks up an event by ID.
    pub fn get(&self, id: &str) -> Option<&CalendarEvent> {
        self.events.iter().find(|e| e.id().as_str() == id)
    }

    /// Events dated on `date`, in collection order.
    pub fn on_date(&self, date: NaiveDate) -> impl Iterator<Item = &CalendarEvent> {
        ep_core::calendar::events_on(&self.events, date)
    }

    /// Adds an event under a fresh ID and persists the collection.
    pub fn add(&mut self, input: CalendarEventInput) -> CalendarEvent {
        let event = CalendarEvent::from_input(self.fresh_id(), input);
        tracing::info!(event_id = %event.id(), date = %event.date(), "added event");

        self.events.push(event.clone());
        sort_events(&mut self.events);
        self.persist_or_notify();
        event
    }

    /// Removes the event with `id`, if any, and persists the collection.
    ///
    /// Returns whether an event was removed. Removing an unknown ID is not
    /// an error.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.events.len();
        self.events.retain(|e| e.id().as_str() != id);
        let removed = self.events.len() != before;
        if removed {
            tracing::info!(event_id = id, "removed event");
        } else {
            tracing::debug!(event_id = id, "no event to remove");
        }
        self.persist_or_notify();
        removed
    }

    /// Writes the full collection to the backend.
    pub fn persist(&mut self) -> Result<(), StorageError> {
        let write_error = |source: BackendError| StorageError::Write {
            key: EVENTS_KEY,
            source,
        };
        let json = serde_json::to_string(&self.events).map_err(|e| write_error(e.into()))?;
        self.backend.set(EVENTS_KEY, &json).map_err(write_error)
    }

    /// Consumes the store, returning the backend.
    pub fn into_backend(self) -> S {
        self.backend
    }

    fn persist_or_notify(&mut self) {
        if let Err(error) = self.persist() {
            self.notifier.storage_failed(&error);
        }
    }

    fn fresh_id(&self) -> EventId {
        loop {
            if let Ok(id) = EventId::new(Uuid::new_v4().to_string()) {
                if self.get(id.as_str()).is_none() {
                    return id;
                }
            }
        }
    }
}
