//! Token pair persistence.
//!
//! A pure storage adapter: one fixed key, serialized JSON, no network
//! calls and no local expiry checks. A persisted value that fails to
//! parse is treated as absent and the corrupted entry is cleared on the
//! way out.

#[cfg(test)]
#[path = "tokens_test.rs"]
mod tokens_test;

use crate::net::types::TokenPair;
use crate::session::storage::StorageBackend;

/// The sole durable artifact the client keeps across reloads.
const STORAGE_KEY: &str = "folio_session_tokens";

/// Persists, retrieves, and clears the access+refresh token pair.
///
/// Only this type writes or deletes the persisted entry; every other
/// component reads through it.
#[derive(Clone, Debug, Default)]
pub struct TokenStore<S: StorageBackend> {
    backend: S,
}

impl<S: StorageBackend> TokenStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    /// The stored pair, or `None` if absent or unreadable. A corrupted
    /// entry is removed before returning `None`.
    pub fn get(&self) -> Option<TokenPair> {
        let raw = self.backend.get(STORAGE_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(pair) => Some(pair),
            Err(e) => {
                log::warn!("clearing corrupted token entry: {e}");
                self.backend.remove(STORAGE_KEY);
                None
            }
        }
    }

    /// Overwrite any existing pair. No merge semantics.
    pub fn set(&self, pair: &TokenPair) {
        match serde_json::to_string(pair) {
            Ok(json) => self.backend.set(STORAGE_KEY, &json),
            Err(e) => log::warn!("failed to serialize token pair: {e}"),
        }
    }

    /// Remove the stored entry. Idempotent.
    pub fn clear(&self) {
        self.backend.remove(STORAGE_KEY);
    }
}
