use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::errors::StorageError;
use crate::storage::KeyValueStore;

/// In-memory KeyValueStore for testing. Clones share the same map, so a
/// clone can stand in for "the same browser storage after a reload".
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().map_err(|_| StorageError::Unavailable)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Unavailable)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_entries() {
        let store = MemoryStore::new();
        let reopened = store.clone();

        assert_eq!(store.get("theme").unwrap(), None);
        store.set("theme", "dark").unwrap();

        assert_eq!(reopened.get("theme").unwrap().as_deref(), Some("dark"));
    }
}
