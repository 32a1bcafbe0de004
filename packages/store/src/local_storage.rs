//! # Browser `localStorage` store
//!
//! [`LocalStorage`] is the [`KeyValueStore`] used on the **web platform**. It
//! wraps `window.localStorage` through `web-sys`. The storage handle is looked
//! up on every call, which keeps the type zero-size and `Clone`.
//!
//! ## Error handling
//!
//! Browsers can refuse storage entirely (privacy modes, disabled storage) or
//! reject a write once the origin quota is exhausted. Both surface as
//! [`StorageError`] values; the session keeps its in-memory state and shows a
//! warning instead of failing the user action.

use wasm_bindgen::JsValue;

use crate::errors::StorageError;
use crate::storage::KeyValueStore;

/// `window.localStorage`-backed KeyValueStore.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .ok_or(StorageError::Unavailable)?
            .local_storage()
            .map_err(|_| StorageError::Unavailable)?
            .ok_or(StorageError::Unavailable)
    }
}

fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| StorageError::Read {
                key: key.to_string(),
                reason: describe(&e),
            })
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Write {
                key: key.to_string(),
                reason: describe(&e),
            })
    }
}
