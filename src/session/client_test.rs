use futures::executor::block_on;

use super::*;
use crate::net::types::{LoginResponse, Role};
use crate::session::testkit::{MockTransport, pair, test_client, user};

// =============================================================
// Startup sequence
// =============================================================

#[test]
fn startup_without_tokens_initializes_logged_out_with_no_network() {
    let mock = MockTransport::default();
    let client = test_client(mock.clone());

    block_on(client.initialize_session());

    assert!(client.state().initialized());
    assert!(client.state().current_user().is_none());
    assert_eq!(mock.calls().profile, 0);
    assert_eq!(mock.calls().refresh, 0);
}

#[test]
fn startup_with_valid_token_restores_user_without_refresh() {
    let mock = MockTransport::default();
    mock.push_profile(Ok(user(Role::Accountant)));
    let client = test_client(mock.clone());
    client.tokens().set(&pair("stored"));

    block_on(client.initialize_session());

    assert!(client.state().initialized());
    assert_eq!(client.state().current_user().map(|u| u.role), Some(Role::Accountant));
    assert_eq!(mock.calls().refresh, 0);
}

#[test]
fn startup_with_stale_token_refreshes_then_restores_user() {
    let mock = MockTransport::default();
    mock.push_profile(Err(AuthError::Unauthorized));
    mock.push_refresh(Ok(pair("minted")));
    mock.push_profile(Ok(user(Role::Employee)));
    let client = test_client(mock.clone());
    client.tokens().set(&pair("stored"));

    block_on(client.initialize_session());

    assert!(client.state().initialized());
    assert_eq!(client.state().current_user().map(|u| u.id), Some("u-1".to_owned()));
    // The persisted pair must be the refreshed one.
    assert_eq!(
        client.tokens().get().map(|p| p.access_token),
        Some("access-minted".to_owned())
    );
}

#[test]
fn startup_with_dead_session_clears_tokens_and_initializes_logged_out() {
    let mock = MockTransport::default();
    mock.push_profile(Err(AuthError::Unauthorized));
    mock.push_refresh(Err(AuthError::Unauthorized));
    let client = test_client(mock.clone());
    client.tokens().set(&pair("stored"));

    block_on(client.initialize_session());

    assert!(client.state().initialized());
    assert!(client.state().current_user().is_none());
    assert!(client.tokens().get().is_none());
}

#[test]
fn startup_runs_only_once() {
    let mock = MockTransport::default();
    mock.push_profile(Ok(user(Role::Employee)));
    let client = test_client(mock.clone());
    client.tokens().set(&pair("stored"));

    block_on(client.initialize_session());
    block_on(client.initialize_session());

    assert_eq!(mock.calls().profile, 1);
}

// =============================================================
// Login / refresh / profile
// =============================================================

#[test]
fn login_persists_tokens_and_sets_user() {
    let mock = MockTransport::default();
    mock.push_login(Ok(LoginResponse { tokens: pair("issued"), user: user(Role::Admin) }));
    let client = test_client(mock);

    let logged_in = block_on(client.login("asha@example.com", "hunter22")).expect("login");

    assert_eq!(logged_in.role, Role::Admin);
    assert_eq!(
        client.tokens().get().map(|p| p.refresh_token),
        Some("refresh-issued".to_owned())
    );
    assert!(client.state().current_user().is_some());
}

#[test]
fn refresh_without_stored_tokens_fails_with_no_refresh_token() {
    let mock = MockTransport::default();
    let client = test_client(mock.clone());

    let err = block_on(client.refresh_session()).expect_err("must fail");

    assert_eq!(err, AuthError::NoRefreshToken);
    assert_eq!(mock.calls().refresh, 0);
}

#[test]
fn refresh_persists_new_pair_and_refetches_profile() {
    let mock = MockTransport::default();
    mock.push_refresh(Ok(pair("minted")));
    mock.push_profile(Ok(user(Role::Approver)));
    let client = test_client(mock.clone());
    client.tokens().set(&pair("stored"));

    let refreshed = block_on(client.refresh_session()).expect("refresh");

    assert_eq!(refreshed.role, Role::Approver);
    assert_eq!(
        client.tokens().get().map(|p| p.access_token),
        Some("access-minted".to_owned())
    );
    assert_eq!(mock.calls().profile, 1);
}

#[test]
fn fetch_profile_without_tokens_skips_network() {
    let mock = MockTransport::default();
    let client = test_client(mock.clone());

    let err = block_on(client.fetch_profile()).expect_err("must fail");

    assert_eq!(err, AuthError::Unauthorized);
    assert_eq!(mock.calls().profile, 0);
}

// =============================================================
// Logout
// =============================================================

#[test]
fn logout_clears_local_state_even_when_remote_call_fails() {
    let mock = MockTransport::default();
    mock.push_logout(Err(AuthError::Status(500)));
    let client = test_client(mock.clone());
    client.tokens().set(&pair("stored"));
    client.state().set_user(user(Role::Employee));

    block_on(client.logout());

    assert!(client.tokens().get().is_none());
    assert!(client.state().current_user().is_none());
    assert_eq!(mock.calls().logout, 1);
}

#[test]
fn logout_without_tokens_skips_remote_call() {
    let mock = MockTransport::default();
    let client = test_client(mock.clone());

    block_on(client.logout());

    assert_eq!(mock.calls().logout, 0);
}

// =============================================================
// Registration
// =============================================================

#[test]
fn register_hydrates_session_like_login() {
    let mock = MockTransport::default();
    mock.push_register(Ok(LoginResponse { tokens: pair("issued"), user: user(Role::Superadmin) }));
    let client = test_client(mock);

    let payload = crate::net::types::RegisterPayload {
        license_key: "LIC-123".to_owned(),
        organization_name: "Acme Ltd".to_owned(),
        name: "Asha".to_owned(),
        email: "asha@example.com".to_owned(),
        password: "hunter22".to_owned(),
    };
    let registered = block_on(client.register_with_license(&payload)).expect("register");

    assert_eq!(registered.role, Role::Superadmin);
    assert!(client.tokens().get().is_some());
    assert!(client.state().current_user().is_some());
}
