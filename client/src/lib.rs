//! # client
//!
//! Leptos + WASM frontend for the fitness admin dashboard and the public
//! landing page.
//!
//! This crate contains the generic data table and form-field renderer, the
//! per-entity catalog that drives them, application state, and the browser
//! HTTP layer that talks to the server's `/api` proxy.

#![recursion_limit = "512"]

pub mod app;
pub mod components;
pub mod entity;
pub mod error;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
