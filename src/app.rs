//! Root application component with routing and session bootstrap.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::pages::{
    admin::AdminPage, dashboard::DashboardPage, login::LoginPage,
    password_reset::PasswordResetPage, register::RegisterPage, unauthorized::UnauthorizedPage,
};
use crate::session::Session;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the session bundle through context, runs the startup
/// sequence exactly once, starts the idle monitor, and sets up routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = Session::new();
    provide_context(session.clone());

    #[cfg(feature = "hydrate")]
    {
        // Token check -> profile fetch -> refresh fallback, once per
        // application load. Guards wait on its completion.
        let boot = session.client.clone();
        leptos::task::spawn_local(async move {
            boot.initialize_session().await;
        });
        crate::session::idle::start_idle_monitor(session.clone());
    }

    view! {
        <Stylesheet id="leptos" href="/pkg/folio-client.css"/>
        <Title text="Folio"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=DashboardPage/>
                <Route path=StaticSegment("admin") view=AdminPage/>
                <Route path=(StaticSegment("auth"), StaticSegment("login")) view=LoginPage/>
                <Route path=(StaticSegment("auth"), StaticSegment("register")) view=RegisterPage/>
                <Route
                    path=(StaticSegment("auth"), StaticSegment("password-reset"))
                    view=PasswordResetPage
                />
                <Route
                    path=(StaticSegment("auth"), StaticSegment("unauthorized"))
                    view=UnauthorizedPage
                />
            </Routes>
        </Router>
    }
}
