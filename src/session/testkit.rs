//! Scripted transport and fixtures shared by the session tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use futures::channel::oneshot;

use crate::net::types::{
    LicenseInfo, LoginResponse, Organization, RegisterPayload, Role, SessionUser, TokenPair,
};
use crate::session::AuthError;
use crate::session::client::SessionClient;
use crate::session::state::SessionState;
use crate::session::storage::MemoryStorage;
use crate::session::transport::AuthTransport;

pub fn user(role: Role) -> SessionUser {
    SessionUser {
        id: "u-1".to_owned(),
        name: "Asha".to_owned(),
        email: "asha@example.com".to_owned(),
        role,
        organization: Some(Organization { id: "o-1".to_owned(), name: "Acme Ltd".to_owned() }),
        status: Some("active".to_owned()),
        last_login: None,
        phone: None,
    }
}

pub fn pair(tag: &str) -> TokenPair {
    TokenPair {
        access_token: format!("access-{tag}"),
        refresh_token: format!("refresh-{tag}"),
        expires_in: 900,
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Calls {
    pub login: u32,
    pub refresh: u32,
    pub profile: u32,
    pub logout: u32,
}

#[derive(Default)]
struct Inner {
    login_results: VecDeque<Result<LoginResponse, AuthError>>,
    refresh_results: VecDeque<Result<TokenPair, AuthError>>,
    profile_results: VecDeque<Result<SessionUser, AuthError>>,
    logout_results: VecDeque<Result<(), AuthError>>,
    license_results: VecDeque<Result<LicenseInfo, AuthError>>,
    register_results: VecDeque<Result<LoginResponse, AuthError>>,
    /// When set, the next refresh call parks on this receiver before
    /// returning, so tests can hold a refresh in flight.
    refresh_gate: Option<oneshot::Receiver<()>>,
    calls: Calls,
}

/// Transport with scripted per-endpoint result queues and call counters.
/// An endpoint with no scripted result reports a network error.
#[derive(Clone, Default)]
pub struct MockTransport {
    inner: Arc<Mutex<Inner>>,
}

impl MockTransport {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().expect("mock transport lock poisoned")
    }

    pub fn calls(&self) -> Calls {
        self.lock().calls
    }

    pub fn push_login(&self, result: Result<LoginResponse, AuthError>) {
        self.lock().login_results.push_back(result);
    }

    pub fn push_refresh(&self, result: Result<TokenPair, AuthError>) {
        self.lock().refresh_results.push_back(result);
    }

    pub fn push_profile(&self, result: Result<SessionUser, AuthError>) {
        self.lock().profile_results.push_back(result);
    }

    pub fn push_logout(&self, result: Result<(), AuthError>) {
        self.lock().logout_results.push_back(result);
    }

    pub fn push_license(&self, result: Result<LicenseInfo, AuthError>) {
        self.lock().license_results.push_back(result);
    }

    pub fn push_register(&self, result: Result<LoginResponse, AuthError>) {
        self.lock().register_results.push_back(result);
    }

    /// Park the next refresh call until the returned sender fires.
    pub fn gate_next_refresh(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.lock().refresh_gate = Some(rx);
        tx
    }

    fn unscripted(endpoint: &str) -> AuthError {
        AuthError::Network(format!("unscripted call: {endpoint}"))
    }
}

impl AuthTransport for MockTransport {
    async fn login(&self, _email: &str, _password: &str) -> Result<LoginResponse, AuthError> {
        let mut inner = self.lock();
        inner.calls.login += 1;
        inner
            .login_results
            .pop_front()
            .unwrap_or_else(|| Err(Self::unscripted("login")))
    }

    async fn refresh(&self, _refresh_token: &str) -> Result<TokenPair, AuthError> {
        let (gate, result) = {
            let mut inner = self.lock();
            inner.calls.refresh += 1;
            let result = inner
                .refresh_results
                .pop_front()
                .unwrap_or_else(|| Err(Self::unscripted("refresh")));
            (inner.refresh_gate.take(), result)
        };
        if let Some(rx) = gate {
            let _ = rx.await;
        }
        result
    }

    async fn fetch_profile(&self, _access_token: &str) -> Result<SessionUser, AuthError> {
        let mut inner = self.lock();
        inner.calls.profile += 1;
        inner
            .profile_results
            .pop_front()
            .unwrap_or_else(|| Err(Self::unscripted("fetch_profile")))
    }

    async fn logout(&self, _access_token: &str) -> Result<(), AuthError> {
        let mut inner = self.lock();
        inner.calls.logout += 1;
        inner
            .logout_results
            .pop_front()
            .unwrap_or_else(|| Err(Self::unscripted("logout")))
    }

    async fn register(&self, _payload: &RegisterPayload) -> Result<LoginResponse, AuthError> {
        self.lock()
            .register_results
            .pop_front()
            .unwrap_or_else(|| Err(Self::unscripted("register")))
    }

    async fn validate_license(&self, _key: &str) -> Result<LicenseInfo, AuthError> {
        self.lock()
            .license_results
            .pop_front()
            .unwrap_or_else(|| Err(Self::unscripted("validate_license")))
    }

    async fn forgot_password(&self, _email: &str) -> Result<(), AuthError> {
        Ok(())
    }

    async fn reset_password(&self, _token: &str, _password: &str) -> Result<(), AuthError> {
        Ok(())
    }
}

/// A client wired to a mock transport and in-memory storage.
pub fn test_client(transport: MockTransport) -> SessionClient<MockTransport, MemoryStorage> {
    test_client_with_storage(transport, MemoryStorage::default())
}

/// Like [`test_client`], but over caller-provided storage so tests can
/// share one backend between client instances.
pub fn test_client_with_storage(
    transport: MockTransport,
    storage: MemoryStorage,
) -> SessionClient<MockTransport, MemoryStorage> {
    SessionClient::new(transport, storage, SessionState::new())
}
