use futures::executor::block_on;

use super::*;
use crate::session::AuthError;
use crate::session::testkit::{MockTransport, pair, test_client, user};

// =============================================================
// RouteAccessGuard
// =============================================================

#[test]
fn allows_when_a_user_is_present() {
    let client = test_client(MockTransport::default());
    client.state().set_user(user(Role::Employee));
    client.state().mark_initialized();

    let decision = block_on(check_route_access(&client, "/invoices"));
    assert_eq!(decision, RouteDecision::Allow);
}

#[test]
fn redirects_to_login_with_return_url_when_unauthenticated() {
    let client = test_client(MockTransport::default());
    client.state().mark_initialized();

    let decision = block_on(check_route_access(&client, "/invoices?page=2"));
    assert_eq!(
        decision,
        RouteDecision::RedirectToLogin { return_url: "/invoices?page=2".to_owned() }
    );
}

#[test]
fn restores_session_from_stored_token_before_allowing() {
    // Hard-refresh case: tokens persisted but no user in memory yet.
    let mock = MockTransport::default();
    mock.push_profile(Ok(user(Role::Auditor)));
    let client = test_client(mock);
    client.tokens().set(&pair("stored"));
    client.state().mark_initialized();

    let decision = block_on(check_route_access(&client, "/reports"));

    assert_eq!(decision, RouteDecision::Allow);
    assert_eq!(client.state().current_user().map(|u| u.role), Some(Role::Auditor));
}

#[test]
fn falls_back_to_refresh_before_denying() {
    let mock = MockTransport::default();
    mock.push_profile(Err(AuthError::Unauthorized));
    mock.push_refresh(Ok(pair("minted")));
    mock.push_profile(Ok(user(Role::Employee)));
    let client = test_client(mock);
    client.tokens().set(&pair("stored"));
    client.state().mark_initialized();

    let decision = block_on(check_route_access(&client, "/expenses"));
    assert_eq!(decision, RouteDecision::Allow);
}

#[test]
fn denies_and_clears_session_when_restore_fails_completely() {
    let mock = MockTransport::default();
    mock.push_profile(Err(AuthError::Unauthorized));
    mock.push_refresh(Err(AuthError::Unauthorized));
    let client = test_client(mock);
    client.tokens().set(&pair("stored"));
    client.state().mark_initialized();

    let decision = block_on(check_route_access(&client, "/expenses"));

    assert_eq!(
        decision,
        RouteDecision::RedirectToLogin { return_url: "/expenses".to_owned() }
    );
    assert!(client.tokens().get().is_none());
}

#[test]
fn waits_for_initialization_before_deciding() {
    let client = test_client(MockTransport::default());
    client.state().set_user(user(Role::Employee));
    let state = client.state().clone();

    let decision = block_on(async {
        let check = check_route_access(&client, "/invoices");
        let (decision, ()) = futures::join!(check, async { state.mark_initialized() });
        decision
    });
    assert_eq!(decision, RouteDecision::Allow);
}

// =============================================================
// RoleAccessGuard
// =============================================================

#[test]
fn role_guard_redirects_to_login_when_unauthenticated() {
    let client = test_client(MockTransport::default());
    client.state().mark_initialized();

    let decision = block_on(check_role_access(&client, &[Role::Admin], "/admin"));
    assert_eq!(
        decision,
        RouteDecision::RedirectToLogin { return_url: "/admin".to_owned() }
    );
}

#[test]
fn role_guard_allows_any_user_when_no_roles_declared() {
    let client = test_client(MockTransport::default());
    client.state().set_user(user(Role::Employee));
    client.state().mark_initialized();

    let decision = block_on(check_role_access(&client, &[], "/dashboard"));
    assert_eq!(decision, RouteDecision::Allow);
}

#[test]
fn role_guard_allows_matching_role() {
    let client = test_client(MockTransport::default());
    client.state().set_user(user(Role::Accountant));
    client.state().mark_initialized();

    let decision = block_on(check_role_access(
        &client,
        &[Role::Admin, Role::Accountant],
        "/ledger",
    ));
    assert_eq!(decision, RouteDecision::Allow);
}

#[test]
fn role_guard_sends_mismatched_user_to_unauthorized_not_login() {
    let client = test_client(MockTransport::default());
    client.state().set_user(user(Role::Employee));
    client.state().mark_initialized();

    let decision = block_on(check_role_access(
        &client,
        &[Role::Admin, Role::Accountant],
        "/ledger",
    ));

    assert_eq!(decision, RouteDecision::RedirectToUnauthorized);
    // The user stays logged in; insufficient privilege is not an error.
    assert!(client.state().current_user().is_some());
}

// =============================================================
// URL helpers
// =============================================================

#[test]
fn login_redirect_url_encodes_the_return_url() {
    assert_eq!(
        login_redirect_url("/invoices?page=2"),
        "/auth/login?returnUrl=%2Finvoices%3Fpage%3D2"
    );
}

#[test]
fn login_redirect_url_omits_trivial_targets() {
    assert_eq!(login_redirect_url("/"), "/auth/login");
    assert_eq!(login_redirect_url(""), "/auth/login");
}

#[test]
fn attempted_url_joins_path_and_query() {
    assert_eq!(attempted_url("/invoices", ""), "/invoices");
    assert_eq!(attempted_url("/invoices", "page=2"), "/invoices?page=2");
    assert_eq!(attempted_url("/invoices", "?page=2"), "/invoices?page=2");
}
