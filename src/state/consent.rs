//! Cookie-consent flag gating the banner.
//!
//! The flag is read once when the banner mounts and written once when the
//! visitor accepts. It never expires.

#[cfg(test)]
#[path = "consent_test.rs"]
mod consent_test;

use crate::util::storage::{KeyValueStore, StorageError};

const ACCEPTED_VALUE: &str = "true";

/// Whether the visitor has accepted cookies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConsentState {
    pub accepted: bool,
}

impl ConsentState {
    /// Read the persisted flag. Anything other than the literal `"true"` is unaccepted.
    pub fn load(store: &impl KeyValueStore, key: &str) -> Self {
        let accepted = store.get(key).as_deref() == Some(ACCEPTED_VALUE);
        Self { accepted }
    }

    #[must_use]
    pub fn banner_visible(self) -> bool {
        !self.accepted
    }

    /// Record acceptance and persist it.
    ///
    /// The in-memory flag flips even when the write fails, so the banner hides
    /// for the rest of the page view.
    ///
    /// # Errors
    ///
    /// Returns the storage error when the flag could not be persisted.
    pub fn accept(&mut self, store: &mut impl KeyValueStore, key: &str) -> Result<(), StorageError> {
        if self.accepted {
            return Ok(());
        }
        self.accepted = true;
        log::debug!("consent accepted");
        store.set(key, ACCEPTED_VALUE)
    }
}
