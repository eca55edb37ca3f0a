//! # iaas-console
//!
//! Leptos + WASM admin console for the IAAS-FIRECRACKER platform.
//!
//! The console talks to the backend microservices (users, VM host, VM
//! offers, clusters, system images) through one API gateway. It keeps the
//! signed-in identity in `localStorage`, mirrors it into a reactive session,
//! and gates every route on that session before rendering.
//!
//! Browser-only code sits behind the `csr` feature so the state, network and
//! validation layers can be unit tested natively.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: logging, panic hook, then mount the app on `<body>`.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    use leptos::prelude::*;

    use crate::app::App;

    let (config, rejected) = config::ConsoleConfig::from_build_env();

    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(config.log_level) {
        web_sys::console::error_1(&format!("logger init failed: {e}").into());
    }
    for problem in &rejected {
        log::warn!("{problem}; using the default");
    }

    leptos::mount::mount_to_body(move || view! { <App config=config.clone()/> });
}
