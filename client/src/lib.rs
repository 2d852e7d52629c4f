//! # market-client
//!
//! Leptos + WASM frontend for the video-call secondhand marketplace.
//!
//! This crate contains pages, components, application state, the REST data
//! access layer, and the STOMP chat transport. The `market-server` crate
//! renders it on the server (`ssr` feature); the browser bundle hydrates it
//! (`hydrate` feature).

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install panic/console logging and hydrate the SSR markup.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
