//! # folio-client
//!
//! Leptos + WASM front-end for the Folio accounting platform.
//!
//! This crate carries the session/authentication core — token storage,
//! the session client and its startup state machine, the request
//! authenticator, route/role guards, and the idle monitor — plus the
//! thin page shell that exercises it. The REST backend is an external
//! service.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod session;

/// Browser entry point: hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
