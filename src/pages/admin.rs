//! Organization admin console. Restricted to superadmin/admin roles.

use leptos::prelude::*;

use crate::net::types::Role;
use crate::session::Session;
use crate::session::guard::use_access_guard;

const ADMIN_ROLES: &[Role] = &[Role::Superadmin, Role::Admin];

#[component]
pub fn AdminPage() -> impl IntoView {
    let session = expect_context::<Session>();
    let allowed = use_access_guard(ADMIN_ROLES);

    let org_name = move || {
        session
            .state()
            .current_user()
            .and_then(|u| u.organization)
            .map(|o| o.name)
            .unwrap_or_else(|| "your organization".to_owned())
    };

    view! {
        <Show when=move || allowed.get() fallback=|| view! { <p class="guard-pending">"Checking access..."</p> }>
            <div class="admin-page">
                <h1>"Administration"</h1>
                <p class="admin-page__subtitle">{org_name.clone()}</p>
                <ul class="admin-page__sections">
                    <li>"Users and roles"</li>
                    <li>"Billing and license"</li>
                    <li>"Approval workflows"</li>
                </ul>
            </div>
        </Show>
    }
}
