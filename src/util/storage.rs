//! Client-side key/value storage behind a small trait.
//!
//! SYSTEM CONTEXT
//! ==============
//! The only thing the site ever persists is the cookie-consent flag. The
//! trait lets consent logic run against `localStorage` in the browser and an
//! in-memory map in tests.
//!
//! TRADE-OFFS
//! ==========
//! Storage is best-effort: private browsing modes can disable `localStorage`
//! entirely, so reads degrade to "absent" and writes report an error the
//! caller is expected to log rather than surface.

use std::collections::HashMap;

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("storage unavailable")]
    Unavailable,
    #[error("storage write failed for {key}: {message}")]
    Write { key: String, message: String },
}

/// Minimal string key/value store.
pub trait KeyValueStore {
    /// Read the value for `key`, `None` when absent or unreadable.
    fn get(&self, key: &str) -> Option<String>;

    /// Write `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the backing store rejects the write.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory store used by tests and as a fallback when the browser offers none.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    read_only: bool,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects every write, like `localStorage` in some private modes.
    #[must_use]
    pub fn read_only() -> Self {
        Self { entries: HashMap::new(), read_only: true }
    }

    #[must_use]
    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_owned(), value.to_owned());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.read_only {
            return Err(StorageError::Write { key: key.to_owned(), message: "read-only store".to_owned() });
        }
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// `window.localStorage`.
#[cfg(feature = "csr")]
#[derive(Clone, Copy, Debug, Default)]
pub struct WebStorage;

#[cfg(feature = "csr")]
impl WebStorage {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        let window = web_sys::window().ok_or(StorageError::Unavailable)?;
        if let Ok(Some(storage)) = window.local_storage() {
            Ok(storage)
        } else {
            Err(StorageError::Unavailable)
        }
    }
}

#[cfg(feature = "csr")]
impl KeyValueStore for WebStorage {
    fn get(&self, key: &str) -> Option<String> {
        let storage = match Self::storage() {
            Ok(storage) => storage,
            Err(e) => {
                log::debug!("cannot read {key}: {e}");
                return None;
            }
        };
        match storage.get_item(key) {
            Ok(value) => value,
            Err(e) => {
                log::debug!("storage read failed for {key}: {e:?}");
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?.set_item(key, value).map_err(|e| StorageError::Write {
            key: key.to_owned(),
            message: format!("{e:?}"),
        })
    }
}

/// The store widgets persist to: `localStorage` in the browser, memory elsewhere.
#[cfg(feature = "csr")]
pub type BrowserStore = WebStorage;
#[cfg(not(feature = "csr"))]
pub type BrowserStore = MemoryStore;

#[must_use]
pub fn browser_store() -> BrowserStore {
    BrowserStore::default()
}
