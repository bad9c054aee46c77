use leptos::logging::warn;
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

pub const DOCUMENTS_KEY: &str = "documents";
pub const RECENT_DOCUMENTS_KEY: &str = "recentDocuments";

/// Upper bound of the recent-documents list.
pub const RECENT_LIMIT: usize = 5;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageErrorKind {
    /// No window, or the browser refused access to `localStorage`.
    Unavailable,
    Read,
    Write,
    Serialize,
}

#[derive(Clone, Debug)]
pub struct StorageError {
    pub kind: StorageErrorKind,
    pub message: String,
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for StorageError {}

impl StorageError {
    fn new(kind: StorageErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    fn unavailable() -> Self {
        Self::new(StorageErrorKind::Unavailable, "localStorage is not available")
    }

    fn js(kind: StorageErrorKind, e: wasm_bindgen::JsValue) -> Self {
        Self::new(kind, format!("{e:?}"))
    }
}

/// String key-value storage with `localStorage` semantics.
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// `window.localStorage`, resolved on every call.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or_else(StorageError::unavailable)
    }
}

impl KeyValueStorage for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| StorageError::js(StorageErrorKind::Read, e))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        // Quota errors surface here.
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::js(StorageErrorKind::Write, e))
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| StorageError::js(StorageErrorKind::Write, e))
    }
}

/// In-process storage. Clones share the same map, so a second store opened
/// on a clone sees what the first one wrote.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<BTreeMap<String, String>>>,
    fail_writes: Rc<Cell<bool>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail, like a full quota.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.get() {
            return Err(StorageError::new(
                StorageErrorKind::Write,
                format!("write to {key} rejected"),
            ));
        }
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        if self.fail_writes.get() {
            return Err(StorageError::new(
                StorageErrorKind::Write,
                format!("remove of {key} rejected"),
            ));
        }
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// Read and parse a JSON value. Missing, unreadable and malformed values all
/// come back as `None`; the latter two are logged.
pub fn load_json<T, S>(storage: &S, key: &str) -> Option<T>
where
    T: for<'de> Deserialize<'de>,
    S: KeyValueStorage + ?Sized,
{
    let json = match storage.get_item(key) {
        Ok(Some(json)) => json,
        Ok(None) => return None,
        Err(e) => {
            warn!("failed to read {key} from storage: {e}");
            return None;
        }
    };

    match serde_json::from_str(&json) {
        Ok(v) => Some(v),
        Err(e) => {
            warn!("ignoring malformed {key} in storage: {e}");
            None
        }
    }
}

pub fn save_json<T, S>(storage: &S, key: &str, value: &T) -> Result<(), StorageError>
where
    T: Serialize + ?Sized,
    S: KeyValueStorage + ?Sized,
{
    let json = serde_json::to_string(value)
        .map_err(|e| StorageError::new(StorageErrorKind::Serialize, e.to_string()))?;
    storage.set_item(key, &json)
}

/// Move-to-front insert: drops any equal entry, puts `item` first and caps
/// the result at `max` entries.
pub fn upsert_lru<T: Clone + PartialEq>(items: &[T], item: T, max: usize) -> Vec<T> {
    let mut next: Vec<T> = items.iter().filter(|x| **x != item).cloned().collect();
    next.insert(0, item);
    next.truncate(max);
    next
}
