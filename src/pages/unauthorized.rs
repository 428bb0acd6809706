//! Landing page for authenticated users lacking the required role.

use leptos::prelude::*;

#[component]
pub fn UnauthorizedPage() -> impl IntoView {
    view! {
        <div class="auth-page">
            <h1>"Not authorized"</h1>
            <p>"Your account does not have access to that page."</p>
            <p class="auth-page__links">
                <a href="/">"Back to dashboard"</a>
            </p>
        </div>
    }
}
