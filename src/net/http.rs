//! REST calls to the Folio backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning [`AuthError::Unavailable`] since
//! these endpoints are only meaningful in the browser.
//!
//! Auth endpoints are implemented directly on [`HttpTransport`]; every
//! other API call goes through the request authenticator via
//! [`authed_get_json`] / [`authed_post_json`] so it picks up bearer
//! attachment and the 401 refresh-and-retry cycle.

#![allow(clippy::unused_async)]

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::net::types::{LicenseInfo, LoginResponse, RegisterPayload, SessionUser, TokenPair};
use crate::session::AuthError;
use crate::session::authenticator::{RawResponse, RequestAuthenticator};
use crate::session::storage::StorageBackend;
use crate::session::transport::AuthTransport;

/// Auth transport backed by the backend's REST API.
#[derive(Clone, Copy, Debug, Default)]
pub struct HttpTransport;

impl AuthTransport for HttpTransport {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AuthError> {
        post_json(
            "/api/auth/login",
            &serde_json::json!({ "email": email, "password": password }),
            None,
        )
        .await
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        post_json(
            "/api/auth/refresh",
            &serde_json::json!({ "refreshToken": refresh_token }),
            None,
        )
        .await
    }

    async fn fetch_profile(&self, access_token: &str) -> Result<SessionUser, AuthError> {
        get_json("/api/users/me", Some(access_token)).await
    }

    async fn logout(&self, access_token: &str) -> Result<(), AuthError> {
        let _: serde_json::Value =
            post_json("/api/auth/logout", &serde_json::json!({}), Some(access_token)).await?;
        Ok(())
    }

    async fn register(&self, payload: &RegisterPayload) -> Result<LoginResponse, AuthError> {
        post_json("/api/auth/register", payload, None).await
    }

    async fn validate_license(&self, key: &str) -> Result<LicenseInfo, AuthError> {
        post_json(
            "/api/auth/license/validate",
            &serde_json::json!({ "licenseKey": key }),
            None,
        )
        .await
    }

    async fn forgot_password(&self, email: &str) -> Result<(), AuthError> {
        let _: serde_json::Value = post_json(
            "/api/auth/forgot-password",
            &serde_json::json!({ "email": email }),
            None,
        )
        .await?;
        Ok(())
    }

    async fn reset_password(&self, token: &str, password: &str) -> Result<(), AuthError> {
        let _: serde_json::Value = post_json(
            "/api/auth/reset-password",
            &serde_json::json!({ "token": token, "password": password }),
            None,
        )
        .await?;
        Ok(())
    }
}

/// GET through the authenticator: bearer attached, one refresh-and-retry
/// on 401.
pub async fn authed_get_json<R, T, S>(
    authenticator: &RequestAuthenticator<T, S>,
    path: &str,
) -> Result<R, AuthError>
where
    R: DeserializeOwned,
    T: AuthTransport,
    S: StorageBackend,
{
    let resp = authenticator.dispatch(|token| raw_get(path, token)).await?;
    decode_response(resp)
}

/// POST through the authenticator.
pub async fn authed_post_json<B, R, T, S>(
    authenticator: &RequestAuthenticator<T, S>,
    path: &str,
    body: &B,
) -> Result<R, AuthError>
where
    B: Serialize,
    R: DeserializeOwned,
    T: AuthTransport,
    S: StorageBackend,
{
    let resp = authenticator
        .dispatch(|token| raw_post(path, body, token))
        .await?;
    decode_response(resp)
}

fn decode_response<R: DeserializeOwned>(resp: RawResponse) -> Result<R, AuthError> {
    if resp.status == 401 {
        return Err(AuthError::Unauthorized);
    }
    if !resp.ok() {
        return Err(AuthError::Status(resp.status));
    }
    serde_json::from_str(&resp.body).map_err(|e| AuthError::Decode(e.to_string()))
}

async fn raw_get(path: &str, bearer: Option<String>) -> Result<RawResponse, AuthError> {
    #[cfg(feature = "hydrate")]
    {
        let mut req = gloo_net::http::Request::get(path);
        if let Some(token) = &bearer {
            req = req.header("Authorization", &format!("Bearer {token}"));
        }
        let resp = req
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;
        let body = resp
            .text()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;
        Ok(RawResponse { status: resp.status(), body })
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (path, bearer);
        Err(AuthError::Unavailable)
    }
}

async fn raw_post<B: Serialize>(
    path: &str,
    body: &B,
    bearer: Option<String>,
) -> Result<RawResponse, AuthError> {
    #[cfg(feature = "hydrate")]
    {
        let mut req = gloo_net::http::Request::post(path);
        if let Some(token) = &bearer {
            req = req.header("Authorization", &format!("Bearer {token}"));
        }
        let resp = req
            .json(body)
            .map_err(|e| AuthError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;
        let text = resp
            .text()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;
        Ok(RawResponse { status: resp.status(), body: text })
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (path, body, bearer);
        Err(AuthError::Unavailable)
    }
}

/// Plain JSON helpers used by the auth endpoints themselves (no
/// authenticator in the loop: a 401 here must never trigger a refresh).
async fn get_json<R: DeserializeOwned>(path: &str, bearer: Option<&str>) -> Result<R, AuthError> {
    let resp = raw_get(path, bearer.map(ToOwned::to_owned)).await?;
    decode_response(resp)
}

async fn post_json<B: Serialize, R: DeserializeOwned>(
    path: &str,
    body: &B,
    bearer: Option<&str>,
) -> Result<R, AuthError> {
    let resp = raw_post(path, body, bearer.map(ToOwned::to_owned)).await?;
    decode_response(resp)
}
