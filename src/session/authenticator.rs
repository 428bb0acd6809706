//! Bearer attachment and the refresh-and-retry cycle for outgoing
//! API requests.
//!
//! Every request other than the auth endpoints themselves goes through
//! [`RequestAuthenticator::dispatch`]. The refresh endpoint never passes
//! through here (it is only reachable via `SessionClient`), which is
//! what rules out a refresh loop feeding itself.
//!
//! CONCURRENCY
//! ===========
//! The in-flight marker is a boolean, not a queue. A request that fails
//! with 401 while another request's refresh is already underway
//! propagates its own 401 instead of waiting for the shared refresh and
//! retrying. This reproduces the upstream behavior; see DESIGN.md.

#[cfg(test)]
#[path = "authenticator_test.rs"]
mod authenticator_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::session::AuthError;
use crate::session::client::SessionClient;
use crate::session::storage::StorageBackend;
use crate::session::transport::AuthTransport;

/// HTTP status for authentication failure.
const UNAUTHORIZED: u16 = 401;

/// A response before JSON decoding, as seen by the retry logic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Wraps request dispatch with bearer attachment and at most one
/// transparent refresh-and-retry per failing request.
#[derive(Clone)]
pub struct RequestAuthenticator<T: AuthTransport, S: StorageBackend> {
    session: SessionClient<T, S>,
    refresh_in_flight: Arc<AtomicBool>,
}

impl<T: AuthTransport, S: StorageBackend> RequestAuthenticator<T, S> {
    pub fn new(session: SessionClient<T, S>) -> Self {
        Self { session, refresh_in_flight: Arc::new(AtomicBool::new(false)) }
    }

    /// Send a request through `send`, which receives the current access
    /// token (if any) and performs the actual transfer.
    ///
    /// On a 401, and only when no refresh is already in flight, the
    /// session is refreshed once and the request re-issued once with the
    /// new token. If the refresh fails, local session state is cleared
    /// and the original 401 propagates. Non-401 responses and transport
    /// errors pass through unchanged.
    pub async fn dispatch<F, Fut>(&self, send: F) -> Result<RawResponse, AuthError>
    where
        F: Fn(Option<String>) -> Fut,
        Fut: Future<Output = Result<RawResponse, AuthError>>,
    {
        let token = self.access_token();
        let first = send(token).await?;
        if first.status != UNAUTHORIZED {
            return Ok(first);
        }
        if self.refresh_in_flight.swap(true, Ordering::AcqRel) {
            // Another request's refresh is underway; this one fails on
            // its own rather than triggering a second refresh.
            return Ok(first);
        }
        let refreshed = self.session.refresh_session().await;
        self.refresh_in_flight.store(false, Ordering::Release);

        match refreshed {
            Ok(_) => send(self.access_token()).await,
            Err(e) => {
                log::info!("refresh after 401 failed, clearing session: {e}");
                self.session.clear_local_session();
                Ok(first)
            }
        }
    }

    fn access_token(&self) -> Option<String> {
        self.session.tokens().get().map(|p| p.access_token)
    }
}
