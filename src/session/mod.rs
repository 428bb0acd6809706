//! Session and authentication core.
//!
//! DESIGN
//! ======
//! The session lifecycle is split into small owned pieces so each can be
//! exercised on its own:
//! - `storage`/`tokens`: the one durable credential artifact (the token
//!   pair) behind a storage trait, localStorage in the browser.
//! - `notices`: one-shot user-facing notices, persisted so they survive
//!   the full-page navigation that follows an idle sign-out.
//! - `transport`: the auth endpoints as an async trait, gloo-net in the
//!   browser, a scripted mock in tests.
//! - `state`: the single source of truth for the current user and the
//!   initialized flag. Only this module mutates either.
//! - `client`: the operations (login, refresh, profile, logout, ...) and
//!   their documented local side effects.
//! - `authenticator`: bearer attachment + at-most-one refresh-and-retry
//!   for every other outgoing request.
//! - `guard`: navigation predicates gating protected routes.
//! - `idle`: the inactivity sign-out timer.

pub mod authenticator;
pub mod client;
pub mod guard;
pub mod idle;
pub mod notices;
pub mod state;
pub mod storage;
pub mod tokens;
pub mod transport;

#[cfg(test)]
pub mod testkit;

use crate::net::http::HttpTransport;

/// Failure taxonomy for session operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Refresh was attempted with no refresh token stored. Terminal;
    /// recovery requires a fresh login.
    #[error("no refresh token stored")]
    NoRefreshToken,
    /// The backend rejected the credential (HTTP 401).
    #[error("authentication failed")]
    Unauthorized,
    /// Any non-401 HTTP failure. Passed through untouched; never mutates
    /// session state.
    #[error("request failed with status {0}")]
    Status(u16),
    /// Transport-level failure before an HTTP status was available.
    #[error("network error: {0}")]
    Network(String),
    /// The response body did not match the expected shape.
    #[error("invalid response body: {0}")]
    Decode(String),
    /// The operation needs a browser environment (SSR/native build).
    #[error("not available outside the browser")]
    Unavailable,
}

#[cfg(feature = "hydrate")]
pub type AppStorage = storage::BrowserStorage;
#[cfg(not(feature = "hydrate"))]
pub type AppStorage = storage::MemoryStorage;

pub type AppSessionClient = client::SessionClient<HttpTransport, AppStorage>;
pub type AppAuthenticator = authenticator::RequestAuthenticator<HttpTransport, AppStorage>;

/// The session bundle provided through Leptos context to every page.
#[derive(Clone)]
pub struct Session {
    pub client: AppSessionClient,
    pub authenticator: AppAuthenticator,
}

impl Session {
    pub fn new() -> Self {
        let client = client::SessionClient::new(
            HttpTransport,
            AppStorage::default(),
            state::SessionState::new(),
        );
        let authenticator = authenticator::RequestAuthenticator::new(client.clone());
        Self { client, authenticator }
    }

    pub fn state(&self) -> &state::SessionState {
        self.client.state()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
