//! # client
//!
//! Leptos + WASM frontend shell for the Zettelwirtschaft document manager.
//!
//! Owns the browser side of the session gate: the route table is mounted
//! through `leptos_router`, every gated view renders behind
//! [`components::route_gate::RouteGate`], and requests go through the
//! `zettelwirtschaft` API client over a `gloo-net` transport. Without the
//! `csr` feature the crate builds natively with an offline transport so the
//! pure helpers stay testable.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;

/// WASM entry point: installs panic/log hooks and mounts the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        leptos::logging::warn!("console logger already installed");
    }
    leptos::mount::mount_to_body(app::App);
}
