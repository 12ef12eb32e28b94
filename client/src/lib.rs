//! # client
//!
//! Leptos + WASM front end for the social feed.
//!
//! This crate contains the pages, components, reactive store drivers, the
//! browser HTTP transport, and `localStorage` session persistence. Store
//! semantics live in the `social` crate; this crate only renders them and
//! dispatches actions.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: install panic/log hooks and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::mount_to_body(app::App);
}
