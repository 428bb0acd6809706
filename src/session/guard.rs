//! Navigation predicates for protected routes.
//!
//! Both guards suspend until the startup sequence has resolved, so a
//! hard refresh never flashes a redirect to login while the session is
//! still being restored. Guard failures are navigation outcomes, never
//! surfaced errors: an unauthenticated visitor is sent to the login
//! route with the attempted URL preserved, and an authenticated but
//! under-privileged user is sent to the unauthorized route.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::net::types::Role;
use crate::session::client::SessionClient;
use crate::session::storage::StorageBackend;
use crate::session::transport::AuthTransport;

pub const LOGIN_ROUTE: &str = "/auth/login";
pub const UNAUTHORIZED_ROUTE: &str = "/auth/unauthorized";

/// Outcome of a guard check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    /// Send to the login page, preserving the attempted URL so a
    /// successful login can return there.
    RedirectToLogin { return_url: String },
    /// Authenticated but lacking the required role.
    RedirectToUnauthorized,
}

/// Require an authenticated session for `attempted`.
///
/// When no user is in memory but a token pair is still stored (a hard
/// refresh during the startup window), the profile is fetched here, with
/// one refresh fallback, before denying.
pub async fn check_route_access<T: AuthTransport, S: StorageBackend>(
    client: &SessionClient<T, S>,
    attempted: &str,
) -> RouteDecision {
    client.state().wait_until_initialized().await;

    if client.state().current_user().is_some() {
        return RouteDecision::Allow;
    }
    if client.tokens().get().is_none() {
        return RouteDecision::RedirectToLogin { return_url: attempted.to_owned() };
    }
    if client.fetch_profile().await.is_ok() {
        return RouteDecision::Allow;
    }
    // refresh_session re-fetches the profile on success.
    if client.refresh_session().await.is_ok() {
        return RouteDecision::Allow;
    }
    client.clear_local_session();
    RouteDecision::RedirectToLogin { return_url: attempted.to_owned() }
}

/// Require one of `required` roles for `attempted`. An empty set means
/// any authenticated user.
pub async fn check_role_access<T: AuthTransport, S: StorageBackend>(
    client: &SessionClient<T, S>,
    required: &[Role],
    attempted: &str,
) -> RouteDecision {
    client.state().wait_until_initialized().await;

    if client.state().current_user().is_none() {
        return RouteDecision::RedirectToLogin { return_url: attempted.to_owned() };
    }
    if required.is_empty() || client.state().has_role(required) {
        RouteDecision::Allow
    } else {
        RouteDecision::RedirectToUnauthorized
    }
}

/// Combined route + role check, in that order.
pub async fn check_access<T: AuthTransport, S: StorageBackend>(
    client: &SessionClient<T, S>,
    required: &[Role],
    attempted: &str,
) -> RouteDecision {
    match check_route_access(client, attempted).await {
        RouteDecision::Allow => check_role_access(client, required, attempted).await,
        denied => denied,
    }
}

/// The login URL for a denied navigation, with the attempted URL encoded
/// into the `returnUrl` query parameter.
pub fn login_redirect_url(return_url: &str) -> String {
    if return_url.is_empty() || return_url == "/" {
        return LOGIN_ROUTE.to_owned();
    }
    format!("{LOGIN_ROUTE}?returnUrl={}", urlencoding::encode(return_url))
}

/// Join a pathname and query string into the attempted URL preserved
/// across the login redirect.
pub fn attempted_url(pathname: &str, search: &str) -> String {
    let search = search.trim_start_matches('?');
    if search.is_empty() {
        pathname.to_owned()
    } else {
        format!("{pathname}?{search}")
    }
}

/// Run the access check for the current location and redirect when it
/// denies. Returns a signal that flips to true once access is allowed;
/// pages gate their authenticated content on it.
pub fn use_access_guard(required: &'static [Role]) -> leptos::prelude::RwSignal<bool> {
    use leptos::prelude::RwSignal;

    let allowed = RwSignal::new(false);

    #[cfg(feature = "hydrate")]
    {
        use leptos::prelude::{Set, expect_context};
        use leptos_router::NavigateOptions;
        use leptos_router::hooks::{use_location, use_navigate};

        use crate::session::Session;

        let session = expect_context::<Session>();
        let navigate = use_navigate();
        let location = use_location();
        let attempted = {
            use leptos::prelude::GetUntracked;
            attempted_url(
                &location.pathname.get_untracked(),
                &location.search.get_untracked(),
            )
        };

        leptos::task::spawn_local(async move {
            match check_access(&session.client, required, &attempted).await {
                RouteDecision::Allow => allowed.set(true),
                RouteDecision::RedirectToLogin { return_url } => {
                    navigate(&login_redirect_url(&return_url), NavigateOptions::default());
                }
                RouteDecision::RedirectToUnauthorized => {
                    navigate(UNAUTHORIZED_ROUTE, NavigateOptions::default());
                }
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = required;
    }

    allowed
}
