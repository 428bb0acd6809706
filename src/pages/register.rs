//! Registration page: license validation followed by account creation.
//!
//! Registration hydrates the session exactly like login, so a successful
//! submit lands directly on the dashboard.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::net::types::RegisterPayload;
use crate::session::Session;

#[component]
pub fn RegisterPage() -> impl IntoView {
    let session = expect_context::<Session>();
    let navigate = use_navigate();

    let license_key = RwSignal::new(String::new());
    let organization = RwSignal::new(String::new());
    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let pending = RwSignal::new(false);

    let submit = Callback::new(move |()| {
        let payload = RegisterPayload {
            license_key: license_key.get_untracked().trim().to_owned(),
            organization_name: organization.get_untracked().trim().to_owned(),
            name: name.get_untracked().trim().to_owned(),
            email: email.get_untracked().trim().to_owned(),
            password: password.get_untracked(),
        };
        if payload.license_key.is_empty()
            || payload.organization_name.is_empty()
            || payload.name.is_empty()
            || payload.email.is_empty()
            || payload.password.is_empty()
        {
            error.set(Some("All fields are required.".to_owned()));
            return;
        }

        #[cfg(feature = "hydrate")]
        {
            let session = session.clone();
            let navigate = navigate.clone();

            pending.set(true);
            error.set(None);
            leptos::task::spawn_local(async move {
                // Validate the license first so a typo'd key fails fast
                // with a specific message.
                match session.client.validate_license(&payload.license_key).await {
                    Ok(info) if !info.valid => {
                        error.set(Some("This license key is not valid.".to_owned()));
                        pending.set(false);
                        return;
                    }
                    Err(e) => {
                        error.set(Some(format!("License check failed: {e}")));
                        pending.set(false);
                        return;
                    }
                    Ok(_) => {}
                }
                match session.client.register_with_license(&payload).await {
                    Ok(_) => navigate("/", Default::default()),
                    Err(e) => {
                        error.set(Some(format!("Registration failed: {e}")));
                        pending.set(false);
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&session, &navigate, &payload);
        }
    });

    let field = |label: &'static str, kind: &'static str, value: RwSignal<String>| {
        view! {
            <label class="auth-form__label">
                {label}
                <input
                    class="auth-form__input"
                    type=kind
                    prop:value=move || value.get()
                    on:input=move |ev| value.set(event_target_value(&ev))
                />
            </label>
        }
    };

    view! {
        <div class="auth-page">
            <h1>"Create your organization"</h1>

            <form
                class="auth-form"
                on:submit=move |ev: leptos::ev::SubmitEvent| {
                    ev.prevent_default();
                    submit.run(());
                }
            >
                {field("License key", "text", license_key)}
                {field("Organization name", "text", organization)}
                {field("Your name", "text", name)}
                {field("Email", "email", email)}
                {field("Password", "password", password)}

                {move || error.get().map(|msg| view! { <p class="auth-form__error">{msg}</p> })}

                <button class="btn btn--primary" type="submit" disabled=move || pending.get()>
                    {move || if pending.get() { "Registering..." } else { "Register" }}
                </button>
            </form>

            <p class="auth-page__links">
                <a href="/auth/login">"Back to sign in"</a>
            </p>
        </div>
    }
}
