//! # client
//!
//! Leptos + WASM frontend for the Dugout team-roster application.
//!
//! The interesting machinery lives in `state` and `util`: a client-side
//! authentication reconciliation layer that unifies the session cookie,
//! a bearer-token fallback, and guest mode, and gates roster data
//! fetches on a confirmed identity. Pages and components are a thin UI
//! over that core.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Hydrate the server-rendered shell in the browser.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
