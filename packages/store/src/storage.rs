//! # Persistent store adapter
//!
//! [`KeyValueStore`] abstracts the string key-value facility the app persists
//! into. Implementations live in sibling modules: [`crate::LocalStorage`]
//! (browser `localStorage`), [`crate::FileStore`] (native builds) and
//! [`crate::MemoryStore`] (tests).
//!
//! [`NoteStore`] reads and writes the whole note collection as one JSON array
//! under a single key. Writes always replace the previous value; there is no
//! incremental persistence. A payload that fails to parse loads as an empty
//! collection, so a corrupted entry degrades to "no notes" rather than an error.

use tracing::{debug, warn};

use crate::errors::StorageError;
use crate::models::Note;

/// Synchronous string key-value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Full-collection persistence of notes under one key.
#[derive(Clone, Debug)]
pub struct NoteStore<S: KeyValueStore> {
    backend: S,
    key: String,
}

impl<S: KeyValueStore> NoteStore<S> {
    pub fn new(backend: S, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Read every stored note, newest first.
    ///
    /// Returns an empty collection when the key is absent or its payload does
    /// not parse. Only a failing backend is reported as an error.
    pub fn load(&self) -> Result<Vec<Note>, StorageError> {
        let Some(raw) = self.backend.get(&self.key)? else {
            debug!(key = %self.key, "no stored notes");
            return Ok(Vec::new());
        };
        match serde_json::from_str::<Vec<Note>>(&raw) {
            Ok(notes) => Ok(notes),
            Err(e) => {
                warn!(key = %self.key, error = %e, "stored notes are malformed, starting empty");
                Ok(Vec::new())
            }
        }
    }

    /// Overwrite the stored collection with `notes`.
    pub fn save(&self, notes: &[Note]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(notes).map_err(|e| StorageError::Encode(e.to_string()))?;
        self.backend.set(&self.key, &raw)
    }
}
