//! The auth endpoints as an async trait.
//!
//! The browser implementation lives in `net::http`; tests script a mock.
//! Every method is a plain network call: no local side effects, no error
//! swallowing. The documented side effects (persisting tokens, updating
//! the current user) belong to `SessionClient`.

use crate::net::types::{LicenseInfo, LoginResponse, RegisterPayload, SessionUser, TokenPair};
use crate::session::AuthError;

// Futures here are awaited on the browser's single-threaded executor;
// no Send bound is wanted.
#[allow(async_fn_in_trait)]
pub trait AuthTransport {
    /// `POST /api/auth/login`
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AuthError>;

    /// `POST /api/auth/refresh` with the given refresh token.
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError>;

    /// `GET /api/users/me` with the given bearer token.
    async fn fetch_profile(&self, access_token: &str) -> Result<SessionUser, AuthError>;

    /// `POST /api/auth/logout` with the given bearer token.
    async fn logout(&self, access_token: &str) -> Result<(), AuthError>;

    /// `POST /api/auth/register`
    async fn register(&self, payload: &RegisterPayload) -> Result<LoginResponse, AuthError>;

    /// `POST /api/auth/license/validate`
    async fn validate_license(&self, key: &str) -> Result<LicenseInfo, AuthError>;

    /// `POST /api/auth/forgot-password`
    async fn forgot_password(&self, email: &str) -> Result<(), AuthError>;

    /// `POST /api/auth/reset-password`
    async fn reset_password(&self, token: &str, password: &str) -> Result<(), AuthError>;
}
