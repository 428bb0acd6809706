//! Session operations against the auth endpoints.
//!
//! Each operation performs its documented local side effects: login and
//! registration persist the token pair and set the current user, refresh
//! persists the new pair and re-fetches the profile, logout always
//! clears local state even when the remote call fails.
//!
//! ERROR HANDLING
//! ==============
//! Network errors propagate to the caller unchanged except where the
//! contract says otherwise (`initialize_session` resolves to a logged-out
//! ready state instead of erroring; `logout` never fails from the
//! caller's perspective).

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use crate::net::types::{LicenseInfo, RegisterPayload, SessionUser};
use crate::session::AuthError;
use crate::session::notices::NoticeStore;
use crate::session::state::SessionState;
use crate::session::storage::StorageBackend;
use crate::session::tokens::TokenStore;
use crate::session::transport::AuthTransport;

/// Client for the session lifecycle. Cheap to clone; clones share the
/// token store and the session state.
#[derive(Clone)]
pub struct SessionClient<T: AuthTransport, S: StorageBackend> {
    transport: T,
    tokens: TokenStore<S>,
    notices: NoticeStore<S>,
    state: SessionState,
}

impl<T: AuthTransport, S: StorageBackend> SessionClient<T, S> {
    /// Both stores share `storage`, so a notice queued by one client
    /// instance is visible to any later one over the same backend.
    pub fn new(transport: T, storage: S, state: SessionState) -> Self {
        Self {
            transport,
            tokens: TokenStore::new(storage.clone()),
            notices: NoticeStore::new(storage),
            state,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn tokens(&self) -> &TokenStore<S> {
        &self.tokens
    }

    pub fn notices(&self) -> &NoticeStore<S> {
        &self.notices
    }

    /// The startup sequence. Runs the token check → profile fetch →
    /// refresh fallback chain exactly once per application load and
    /// marks the state initialized whatever the outcome.
    ///
    /// With no stored token this resolves without any network call.
    pub async fn initialize_session(&self) {
        if self.state.initialized() {
            return;
        }
        if self.tokens.get().is_some() {
            if self.fetch_profile().await.is_err() {
                match self.refresh_session().await {
                    Ok(_) => {}
                    Err(e) => {
                        log::info!("session restore failed, starting logged out: {e}");
                        self.tokens.clear();
                        self.state.clear_user();
                    }
                }
            }
        }
        self.state.mark_initialized();
    }

    /// Authenticate with email + password. Persists the issued token
    /// pair and sets the current user before returning.
    pub async fn login(&self, email: &str, password: &str) -> Result<SessionUser, AuthError> {
        let resp = self.transport.login(email, password).await?;
        self.tokens.set(&resp.tokens);
        self.state.set_user(resp.user.clone());
        Ok(resp.user)
    }

    /// Mint a new token pair from the stored refresh token, persist it,
    /// then re-fetch the profile so the current user is up to date when
    /// this resolves.
    ///
    /// Fails with [`AuthError::NoRefreshToken`] when nothing is stored.
    pub async fn refresh_session(&self) -> Result<SessionUser, AuthError> {
        let Some(pair) = self.tokens.get() else {
            return Err(AuthError::NoRefreshToken);
        };
        let refreshed = self.transport.refresh(&pair.refresh_token).await?;
        self.tokens.set(&refreshed);
        self.fetch_profile().await
    }

    /// Fetch the profile for the stored access token and set it as the
    /// current user on success.
    pub async fn fetch_profile(&self) -> Result<SessionUser, AuthError> {
        let Some(pair) = self.tokens.get() else {
            return Err(AuthError::Unauthorized);
        };
        let user = self.transport.fetch_profile(&pair.access_token).await?;
        self.state.set_user(user.clone());
        Ok(user)
    }

    /// Sign out. The remote call is best-effort; local tokens and the
    /// current user are always cleared, so the caller is never left
    /// logged in locally.
    pub async fn logout(&self) {
        if let Some(pair) = self.tokens.get() {
            if let Err(e) = self.transport.logout(&pair.access_token).await {
                log::warn!("remote logout failed, clearing local session anyway: {e}");
            }
        }
        self.clear_local_session();
    }

    /// Drop local credentials and the current user without touching the
    /// backend. The initialized flag is left alone.
    pub fn clear_local_session(&self) {
        self.tokens.clear();
        self.state.clear_user();
    }

    /// Register a new organization with a license key. Hydrates the
    /// session exactly like login on success.
    pub async fn register_with_license(
        &self,
        payload: &RegisterPayload,
    ) -> Result<SessionUser, AuthError> {
        let resp = self.transport.register(payload).await?;
        self.tokens.set(&resp.tokens);
        self.state.set_user(resp.user.clone());
        Ok(resp.user)
    }

    /// Stateless license check.
    pub async fn validate_license(&self, key: &str) -> Result<LicenseInfo, AuthError> {
        self.transport.validate_license(key).await
    }

    /// Stateless password-reset request.
    pub async fn forgot_password(&self, email: &str) -> Result<(), AuthError> {
        self.transport.forgot_password(email).await
    }

    /// Stateless password reset with an emailed token.
    pub async fn reset_password(&self, token: &str, password: &str) -> Result<(), AuthError> {
        self.transport.reset_password(token, password).await
    }
}
