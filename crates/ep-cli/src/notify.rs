//! User-facing storage warnings.

use ep_store::{Notifier, StorageError};

/// Prints storage failures to stderr as warnings.
#[derive(Debug, Default, Clone, Copy)]
pub struct WarningNotifier;

impl WarningNotifier {
    /// The message shown for a storage failure.
    pub const fn message(error: &StorageError) -> &'static str {
        if error.is_read() {
            "Error loading data: could not load saved events. Your data might be corrupted."
        } else {
            "Error saving data: could not save your latest changes."
        }
    }
}

impl Notifier for WarningNotifier {
    fn storage_failed(&self, error: &StorageError) {
        tracing::warn!(error = %error_chain(error), "storage failure");
        eprintln!("warning: {}", Self::message(error));
    }
}

/// Joins an error and its sources, e.g. "failed to write x: sqlite error: ...".
fn error_chain(error: &StorageError) -> String {
    let mut chain = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        chain.push_str(": ");
        chain.push_str(&cause.to_string());
        source = cause.source();
    }
    chain
}
