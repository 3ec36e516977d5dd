//! Storage layer for the emoji planner.
//!
//! Provides a durable key-value backend and the [`EventStore`] that keeps the
//! in-memory event collection synchronized with it.
//!
//! # Layout
//!
//! State lives under fixed keys, each holding a JSON document:
//!
//! - [`EVENTS_KEY`]: a JSON array of event records, rewritten in full after
//!   every mutation.
//! - [`THEME_KEY`]: reserved for the UI theme; never touched here.
//!
//! # Failure Handling
//!
//! Storage is best-effort. Reads that fail or return malformed data yield an
//! empty collection, and writes that fail leave the in-memory collection
//! intact. In both cases the [`Notifier`] is told once; nothing is retried.

mod event_store;
mod kv;

use thiserror::Error;

pub use event_store::{EventStore, load_events};
pub use kv::{KeyValueStore, MemoryStore, SqliteStore};

/// Key holding the persisted event collection.
pub const EVENTS_KEY: &str = "emoji-planner-events";

/// Key reserved for the theme preference.
pub const THEME_KEY: &str = "emoji-planner-theme";

/// Errors from a key-value backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// The backend refused the operation (disabled or read-only storage).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    /// The value could not be encoded for storage.
    #[error("failed to encode value: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Storage failures surfaced to the caller.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend could not be read.
    #[error("failed to read {key}")]
    Read {
        key: &'static str,
        #[source]
        source: BackendError,
    },
    /// The stored value could not be parsed.
    #[error("stored {key} is malformed")]
    Malformed {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
    /// The backend could not be written.
    #[error("failed to write {key}")]
    Write {
        key: &'static str,
        #[source]
        source: BackendError,
    },
}

impl StorageError {
    /// Whether this failure happened while loading.
    pub const fn is_read(&self) -> bool {
        matches!(self, Self::Read { .. } | Self::Malformed { .. })
    }
}

/// Receives storage failures so they can be shown to the user.
pub trait Notifier {
    fn storage_failed(&self, error: &StorageError);
}

impl<F: Fn(&StorageError)> Notifier for F {
    fn storage_failed(&self, error: &StorageError) {
        self(error);
    }
}

/// Notifier that only logs.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn storage_failed(&self, error: &StorageError) {
        tracing::warn!(error = %error, source = ?std::error::Error::source(error), "storage failure");
    }
}
