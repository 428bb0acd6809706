//! The single source of truth for "who is logged in".
//!
//! Holds the current user and the initialized flag behind one shared
//! handle. Mutation is crate-private; pages and guards only read.
//!
//! The initialized flag is monotonic for the lifetime of one loaded
//! application instance: false until the startup sequence resolves, true
//! forever after, regardless of outcome. Guards must treat "not yet
//! initialized" as decision pending, never as unauthenticated, so they
//! await `wait_until_initialized` before reading the user.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use std::sync::{Arc, Mutex, MutexGuard};

use futures::channel::oneshot;

use crate::net::types::{Role, SessionUser};

#[derive(Default)]
struct Inner {
    user: Option<SessionUser>,
    initialized: bool,
    waiters: Vec<oneshot::Sender<()>>,
}

/// Shared session state handle. Cheap to clone.
#[derive(Clone, Default)]
pub struct SessionState {
    inner: Arc<Mutex<Inner>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().expect("session state lock poisoned")
    }

    /// Snapshot of the current user, if any.
    pub fn current_user(&self) -> Option<SessionUser> {
        self.lock().user.clone()
    }

    /// Whether the startup sequence has resolved.
    pub fn initialized(&self) -> bool {
        self.lock().initialized
    }

    /// Synchronous role check against the current user. False when no
    /// user is present.
    pub fn has_role(&self, roles: &[Role]) -> bool {
        self.lock()
            .user
            .as_ref()
            .is_some_and(|u| roles.contains(&u.role))
    }

    /// Resolve once the initialized flag is true. Returns immediately if
    /// it already is; otherwise suspends until the startup sequence
    /// flips it.
    pub async fn wait_until_initialized(&self) {
        let rx = {
            let mut inner = self.lock();
            if inner.initialized {
                return;
            }
            let (tx, rx) = oneshot::channel();
            inner.waiters.push(tx);
            rx
        };
        // The sender is only ever dropped together with the state, so a
        // Canceled result means there is nothing left to wait for.
        let _ = rx.await;
    }

    pub(crate) fn set_user(&self, user: SessionUser) {
        self.lock().user = Some(user);
    }

    pub(crate) fn clear_user(&self) {
        self.lock().user = None;
    }

    /// Flip the initialized flag and wake every waiter. Later calls are
    /// no-ops; the flag never goes back to false.
    pub(crate) fn mark_initialized(&self) {
        let waiters = {
            let mut inner = self.lock();
            inner.initialized = true;
            std::mem::take(&mut inner.waiters)
        };
        for tx in waiters {
            let _ = tx.send(());
        }
    }
}
