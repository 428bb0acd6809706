//! One-shot notice persistence.
//!
//! The idle monitor signs out with a full document navigation, which
//! tears down the WASM instance and every in-memory signal with it. The
//! pending notice therefore goes through durable storage and is drained
//! by the login page on the next load.

#[cfg(test)]
#[path = "notices_test.rs"]
mod notices_test;

use crate::session::storage::StorageBackend;

const STORAGE_KEY: &str = "folio_session_notice";

/// One-time notices surfaced to the user on the login page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionNotice {
    IdleSignOut,
}

impl SessionNotice {
    pub fn message(self) -> &'static str {
        match self {
            Self::IdleSignOut => "You were signed out due to inactivity.",
        }
    }

    fn encoded(self) -> &'static str {
        match self {
            Self::IdleSignOut => "idle_sign_out",
        }
    }

    fn decode(raw: &str) -> Option<Self> {
        match raw {
            "idle_sign_out" => Some(Self::IdleSignOut),
            _ => None,
        }
    }
}

/// Persists the pending notice so it survives full page loads.
#[derive(Clone, Debug, Default)]
pub struct NoticeStore<S: StorageBackend> {
    backend: S,
}

impl<S: StorageBackend> NoticeStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    /// Queue a notice, replacing any pending one.
    pub fn set(&self, notice: SessionNotice) {
        self.backend.set(STORAGE_KEY, notice.encoded());
    }

    /// Take the pending notice, leaving none behind. One display only.
    /// An unrecognized stored value is dropped the same way.
    pub fn take(&self) -> Option<SessionNotice> {
        let raw = self.backend.get(STORAGE_KEY)?;
        self.backend.remove(STORAGE_KEY);
        SessionNotice::decode(&raw)
    }
}
