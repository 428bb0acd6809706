//! Password reset: request a reset email, or set a new password when a
//! reset token arrives in the query string.

use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::session::Session;

#[component]
pub fn PasswordResetPage() -> impl IntoView {
    let query = use_query_map();
    let token = query.with_untracked(|q| q.get("token").map(|v| v.to_string()));

    match token {
        Some(token) => view! { <ResetForm token=token/> }.into_any(),
        None => view! { <RequestForm/> }.into_any(),
    }
}

/// Ask for a reset email.
#[component]
fn RequestForm() -> impl IntoView {
    let session = expect_context::<Session>();

    let email = RwSignal::new(String::new());
    let sent = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);

    let submit = Callback::new(move |()| {
        let email_v = email.get_untracked().trim().to_owned();
        if email_v.is_empty() {
            error.set(Some("Enter your email address.".to_owned()));
            return;
        }
        #[cfg(feature = "hydrate")]
        {
            let session = session.clone();
            leptos::task::spawn_local(async move {
                match session.client.forgot_password(&email_v).await {
                    Ok(()) => sent.set(true),
                    Err(e) => error.set(Some(format!("Request failed: {e}"))),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&session, &email_v);
        }
    });

    view! {
        <div class="auth-page">
            <h1>"Reset password"</h1>
            {move || {
                if sent.get() {
                    view! {
                        <p class="auth-page__info">
                            "If that address has an account, a reset link is on its way."
                        </p>
                    }
                        .into_any()
                } else {
                    view! {
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
                            {move || {
                                error.get().map(|msg| view! { <p class="auth-form__error">{msg}</p> })
                            }}
                            <button class="btn btn--primary" type="submit">
                                "Send reset link"
                            </button>
                        </form>
                    }
                        .into_any()
                }
            }}
            <p class="auth-page__links">
                <a href="/auth/login">"Back to sign in"</a>
            </p>
        </div>
    }
}

/// Set a new password using the emailed token.
#[component]
fn ResetForm(token: String) -> impl IntoView {
    let session = expect_context::<Session>();
    let navigate = use_navigate();

    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);

    let submit = Callback::new(move |()| {
        let password_v = password.get_untracked();
        if password_v.len() < 8 {
            error.set(Some("Password must be at least 8 characters.".to_owned()));
            return;
        }
        if password_v != confirm.get_untracked() {
            error.set(Some("Passwords do not match.".to_owned()));
            return;
        }
        #[cfg(feature = "hydrate")]
        {
            let session = session.clone();
            let navigate = navigate.clone();
            let token = token.clone();
            leptos::task::spawn_local(async move {
                match session.client.reset_password(&token, &password_v).await {
                    Ok(()) => navigate("/auth/login", Default::default()),
                    Err(e) => error.set(Some(format!("Reset failed: {e}"))),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&session, &navigate, &token, &password_v);
        }
    });

    view! {
        <div class="auth-page">
            <h1>"Choose a new password"</h1>
            <form
                class="auth-form"
                on:submit=move |ev: leptos::ev::SubmitEvent| {
                    ev.prevent_default();
                    submit.run(());
                }
            >
                <label class="auth-form__label">
                    "New password"
                    <input
                        class="auth-form__input"
                        type="password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                </label>
                <label class="auth-form__label">
                    "Confirm password"
                    <input
                        class="auth-form__input"
                        type="password"
                        prop:value=move || confirm.get()
                        on:input=move |ev| confirm.set(event_target_value(&ev))
                    />
                </label>
                {move || error.get().map(|msg| view! { <p class="auth-form__error">{msg}</p> })}
                <button class="btn btn--primary" type="submit">
                    "Set password"
                </button>
            </form>
        </div>
    }
}
