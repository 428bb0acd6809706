//! Durable key/value storage behind a small trait.
//!
//! The browser implementation uses `localStorage`; everything else (SSR
//! renders, native tests) gets an in-memory map. Storage failures are
//! deliberately swallowed: a front-end that cannot persist a token
//! behaves like one with no token stored.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Raw string storage. Implementations do no parsing or validation.
/// Clones must observe the same underlying entries, so one backend can
/// serve several stores.
pub trait StorageBackend: Clone {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// `localStorage`-backed storage. Only meaningful in the browser.
#[cfg(feature = "hydrate")]
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(feature = "hydrate")]
impl BrowserStorage {
    fn local_storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }
}

#[cfg(feature = "hydrate")]
impl StorageBackend for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::local_storage().and_then(|s| s.get_item(key).ok().flatten())
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(s) = Self::local_storage() {
            let _ = s.set_item(key, value);
        }
    }

    fn remove(&self, key: &str) {
        if let Some(s) = Self::local_storage() {
            let _ = s.remove_item(key);
        }
    }
}

/// In-memory storage for SSR builds and tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl StorageBackend for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .expect("storage lock poisoned")
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .expect("storage lock poisoned")
            .insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.entries
            .lock()
            .expect("storage lock poisoned")
            .remove(key);
    }
}
