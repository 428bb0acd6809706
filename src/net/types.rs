//! Wire types shared with the Folio REST backend.
//!
//! All payloads use camelCase field names on the wire, matching the
//! backend's JSON contract.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Access + refresh token pair issued by the backend.
///
/// `expires_in` is carried but never checked locally; token validity is
/// discovered reactively via a failed request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds, as reported by the backend.
    pub expires_in: u64,
}

/// The closed set of roles known to the platform.
///
/// Roles arrive as lowercase strings on the wire; an unknown role is a
/// deserialization error, not a runtime fallthrough.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Superadmin,
    Admin,
    Accountant,
    Approver,
    Auditor,
    Employee,
}

/// Organization summary attached to a user profile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: String,
    pub name: String,
}

/// The authenticated user's profile, as returned by `GET /api/users/me`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub organization: Option<Organization>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub last_login: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Response of `POST /api/auth/login` and `POST /api/auth/register`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub tokens: TokenPair,
    pub user: SessionUser,
}

/// Payload for `POST /api/auth/register`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPayload {
    pub license_key: String,
    pub organization_name: String,
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Response of `POST /api/auth/license/validate`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseInfo {
    pub valid: bool,
    #[serde(default)]
    pub plan: Option<String>,
}

/// Dashboard headline figures from `GET /api/dashboard/summary`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub open_invoices: u32,
    pub pending_expenses: u32,
    pub draft_journal_entries: u32,
}
