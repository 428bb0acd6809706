//! Login page with email/password form and return-url handling.

use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::components::notice_banner::NoticeBanner;
use crate::session::{AuthError, Session};

/// Map a login failure to what the form shows.
fn login_error_message(err: &AuthError) -> &'static str {
    match err {
        AuthError::Unauthorized => "Invalid email or password.",
        AuthError::Network(_) | AuthError::Unavailable => {
            "Could not reach the server. Please try again."
        }
        _ => "Sign-in failed. Please try again.",
    }
}

/// Login page. A successful sign-in navigates to the `returnUrl` query
/// parameter when present, otherwise to the dashboard. Displays the
/// one-time session notice (e.g. idle sign-out) if one is queued.
#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<Session>();
    let navigate = use_navigate();
    let query = use_query_map();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<&'static str>);
    let pending = RwSignal::new(false);

    // Persisted by the idle monitor before its sign-out navigation;
    // drained here so it shows exactly once.
    let notice = RwSignal::new(session.client.notices().take().map(|n| n.message()));

    let submit = Callback::new(move |()| {
        let email_v = email.get_untracked().trim().to_owned();
        let password_v = password.get_untracked();
        if email_v.is_empty() || password_v.is_empty() {
            error.set(Some("Email and password are required."));
            return;
        }

        #[cfg(feature = "hydrate")]
        {
            let session = session.clone();
            let navigate = navigate.clone();
            let target = query
                .with_untracked(|q| q.get("returnUrl").map(|v| v.to_string()))
                .unwrap_or_else(|| "/".to_owned());

            pending.set(true);
            error.set(None);
            leptos::task::spawn_local(async move {
                match session.client.login(&email_v, &password_v).await {
                    Ok(_) => navigate(&target, Default::default()),
                    Err(e) => {
                        error.set(Some(login_error_message(&e)));
                        pending.set(false);
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&session, &navigate, &query, &password_v);
        }
    });

    view! {
        <div class="auth-page">
            <h1>"Folio"</h1>
            <p class="auth-page__tagline">"Accounting for growing teams"</p>

            {move || notice.get().map(|message| view! { <NoticeBanner message=message/> })}

            <form
                class="auth-form"
                on:submit=move |ev: leptos::ev::SubmitEvent| {
                    ev.prevent_default();
                    submit.run(());
                }
            >
                <label class="auth-form__label">
                    "Email"
                    <input
                        class="auth-form__input"
                        type="email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                </label>
                <label class="auth-form__label">
                    "Password"
                    <input
                        class="auth-form__input"
                        type="password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                </label>

                {move || error.get().map(|msg| view! { <p class="auth-form__error">{msg}</p> })}

                <button class="btn btn--primary" type="submit" disabled=move || pending.get()>
                    {move || if pending.get() { "Signing in..." } else { "Sign in" }}
                </button>
            </form>

            <p class="auth-page__links">
                <a href="/auth/password-reset">"Forgot password?"</a>
                <a href="/auth/register">"Register with a license"</a>
            </p>
        </div>
    }
}
