//! One-time dismissible notice banner.

use leptos::prelude::*;

/// Dismissible banner for one-shot session notices (e.g. "signed out due
/// to inactivity").
#[component]
pub fn NoticeBanner(message: &'static str) -> impl IntoView {
    let dismissed = RwSignal::new(false);

    view! {
        <Show when=move || !dismissed.get()>
            <div class="notice-banner" role="status">
                <span class="notice-banner__message">{message}</span>
                <button class="notice-banner__dismiss" on:click=move |_| dismissed.set(true)>
                    "Dismiss"
                </button>
            </div>
        </Show>
    }
}
