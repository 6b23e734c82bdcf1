//! Persistence substrate for the cart.
//!
//! The cart stores its whole collection as JSON text under a single string
//! key, so the substrate is a minimal key/value contract: read a value,
//! overwrite a value. No partial or delta writes exist.

mod file;

use std::collections::HashMap;

use thiserror::Error;

pub use file::FileStorage;

/// Errors raised by a storage substrate.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The underlying store could not be read or written.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Key/value persistence contract for the cart collection.
///
/// Implementations persist opaque JSON text; parsing and recovery are the
/// store's concern. Reads of absent keys return `Ok(None)` rather than an
/// error.
pub trait CartStorage {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error when the substrate itself fails (I/O fault); an
    /// absent key is `Ok(None)`.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when the substrate cannot complete the write (e.g.
    /// out of space). There is no safe local recovery from a failed write,
    /// so callers propagate this.
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory storage for tests and short-lived embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
