//! Inactivity sign-out.
//!
//! One process-wide countdown, started after bootstrap. Activity events
//! reset it; when it runs out with a user signed in, the session is
//! logged out (best-effort remotely, unconditionally locally), a
//! one-time notice is persisted for the login page, and the browser is
//! sent to the login route. The redirect is a full document navigation
//! that tears down this WASM instance, which is why the notice goes
//! through storage rather than in-memory state. With nobody signed in,
//! expiry just re-arms the countdown.
//!
//! The countdown is a background timer polled on a coarse interval, not
//! a per-event UI update, so activity tracking never forces renders.

#[cfg(test)]
#[path = "idle_test.rs"]
mod idle_test;

use crate::session::client::SessionClient;
use crate::session::notices::SessionNotice;
use crate::session::storage::StorageBackend;
use crate::session::transport::AuthTransport;

/// Sign out after this much inactivity.
pub const IDLE_TIMEOUT_MS: f64 = 60.0 * 60.0 * 1000.0;

/// How often the countdown is polled.
#[cfg(feature = "hydrate")]
const CHECK_INTERVAL_MS: u32 = 30_000;

/// Activity signals that re-arm the countdown, paired with whether the
/// listener registers in the capture phase. Scroll does not bubble, so
/// scrolls inside nested panes only reach the window during capture.
pub const ACTIVITY_EVENTS: [(&str, bool); 6] = [
    ("mousemove", false),
    ("mousedown", false),
    ("keydown", false),
    ("touchstart", false),
    ("scroll", true),
    ("click", false),
];

/// Inactivity countdown over caller-supplied clock readings
/// (milliseconds, monotone non-decreasing).
#[derive(Debug)]
pub struct IdleCountdown {
    timeout_ms: f64,
    last_activity_ms: f64,
}

impl IdleCountdown {
    pub fn new(timeout_ms: f64, now_ms: f64) -> Self {
        Self { timeout_ms, last_activity_ms: now_ms }
    }

    /// Re-arm on user activity (or after a handled expiry).
    pub fn record_activity(&mut self, now_ms: f64) {
        self.last_activity_ms = now_ms;
    }

    pub fn expired(&self, now_ms: f64) -> bool {
        now_ms - self.last_activity_ms >= self.timeout_ms
    }
}

/// Expiry handler: signs out if and only if a user is present.
///
/// Returns true when a sign-out happened. The remote logout is
/// best-effort; local tokens and the current user are cleared and the
/// inactivity notice persisted regardless of its outcome.
pub async fn expire_if_active<T: AuthTransport, S: StorageBackend>(
    client: &SessionClient<T, S>,
) -> bool {
    if client.state().current_user().is_none() {
        return false;
    }
    client.logout().await;
    client.notices().set(SessionNotice::IdleSignOut);
    true
}

/// Install the activity listeners and start the countdown loop. Called
/// once from application bootstrap.
#[cfg(feature = "hydrate")]
pub fn start_idle_monitor(session: crate::session::Session) {
    use std::cell::Cell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;

    let Some(window) = web_sys::window() else {
        return;
    };

    let last_activity = Rc::new(Cell::new(js_sys::Date::now()));

    for (event, capture) in ACTIVITY_EVENTS {
        let last_activity = Rc::clone(&last_activity);
        let on_activity = Closure::<dyn FnMut(web_sys::Event)>::new(move |_: web_sys::Event| {
            last_activity.set(js_sys::Date::now());
        });
        if let Err(e) = window.add_event_listener_with_callback_and_bool(
            event,
            on_activity.as_ref().unchecked_ref(),
            capture,
        ) {
            log::warn!("failed to install {event} listener: {e:?}");
        }
        // Listeners live for the application lifetime.
        on_activity.forget();
    }

    leptos::task::spawn_local(async move {
        let mut countdown = IdleCountdown::new(IDLE_TIMEOUT_MS, js_sys::Date::now());
        loop {
            gloo_timers::future::sleep(std::time::Duration::from_millis(u64::from(
                CHECK_INTERVAL_MS,
            )))
            .await;

            let now = js_sys::Date::now();
            countdown.record_activity(last_activity.get());
            if !countdown.expired(now) {
                continue;
            }
            if expire_if_active(&session.client).await {
                log::info!("session signed out after inactivity");
                // Full document navigation; the persisted notice
                // survives it and is drained by the login page.
                if let Some(window) = web_sys::window() {
                    let _ = window
                        .location()
                        .set_href(crate::session::guard::LOGIN_ROUTE);
                }
            }
            // Re-arm after a handled expiry.
            last_activity.set(now);
            countdown.record_activity(now);
        }
    });
}
