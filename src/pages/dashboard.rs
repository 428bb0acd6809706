//! Authenticated landing page with headline figures and sign-out.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::net::http::authed_get_json;
use crate::net::types::DashboardSummary;
use crate::session::Session;
use crate::session::guard::{LOGIN_ROUTE, use_access_guard};

/// Fetch the headline figures through the request authenticator, so the
/// call picks up bearer attachment and the 401 refresh-and-retry cycle.
async fn fetch_summary(session: Session) -> Option<DashboardSummary> {
    match authed_get_json(&session.authenticator, "/api/dashboard/summary").await {
        Ok(summary) => Some(summary),
        Err(e) => {
            log::warn!("dashboard summary fetch failed: {e}");
            None
        }
    }
}

/// Dashboard page. Access requires any authenticated user.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = expect_context::<Session>();
    let navigate = use_navigate();
    let allowed = use_access_guard(&[]);

    let summary = LocalResource::new({
        let session = session.clone();
        move || fetch_summary(session.clone())
    });

    let user_line = {
        let session = session.clone();
        move || {
            session.state().current_user().map(|u| {
                let org = u
                    .organization
                    .map(|o| format!(" · {}", o.name))
                    .unwrap_or_default();
                format!("{}{org}", u.name)
            })
        }
    };

    let sign_out = Callback::new(move |()| {
        #[cfg(feature = "hydrate")]
        {
            let session = session.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                session.client.logout().await;
                navigate(LOGIN_ROUTE, Default::default());
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&session, &navigate);
        }
    });

    view! {
        <Show when=move || allowed.get() fallback=|| view! { <p class="guard-pending">"Checking access..."</p> }>
            <div class="dashboard-page">
                <header class="dashboard-page__header">
                    <h1>"Dashboard"</h1>
                    <span class="dashboard-page__user">{user_line.clone()}</span>
                    <button class="btn" on:click=move |_| sign_out.run(())>
                        "Sign out"
                    </button>
                </header>

                <Suspense fallback=move || view! { <p>"Loading summary..."</p> }>
                    {move || {
                        summary.get().map(|loaded| match loaded {
                            Some(s) => view! {
                                <div class="dashboard-page__cards">
                                    <SummaryCard label="Open invoices" value=s.open_invoices/>
                                    <SummaryCard label="Pending expenses" value=s.pending_expenses/>
                                    <SummaryCard label="Draft journal entries" value=s.draft_journal_entries/>
                                </div>
                            }
                                .into_any(),
                            None => view! { <p class="dashboard-page__empty">"No summary available."</p> }
                                .into_any(),
                        })
                    }}
                </Suspense>
            </div>
        </Show>
    }
}

#[component]
fn SummaryCard(label: &'static str, value: u32) -> impl IntoView {
    view! {
        <div class="summary-card">
            <span class="summary-card__value">{value}</span>
            <span class="summary-card__label">{label}</span>
        </div>
    }
}
