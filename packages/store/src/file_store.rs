//! # Filesystem-backed key-value store
//!
//! [`FileStore`] is the [`KeyValueStore`] used by native builds, where there is
//! no browser `localStorage`. Each key is one file under the base directory,
//! holding the value verbatim.
//!
//! ```text
//! <base_dir>/
//! ├── quickNotes      # notes JSON array
//! └── theme           # "light" or "dark"
//! ```

use std::io::ErrorKind;
use std::path::PathBuf;

use crate::errors::StorageError;
use crate::storage::KeyValueStore;

/// Filesystem-backed KeyValueStore for native persistence.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.base.join(name)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.key_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Read {
                key: key.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let write_error = |e: std::io::Error| StorageError::Write {
            key: key.to_string(),
            reason: e.to_string(),
        };
        std::fs::create_dir_all(&self.base).map_err(write_error)?;
        std::fs::write(self.key_path(key), value).map_err(write_error)
    }
}
