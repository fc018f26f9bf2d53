#![allow(warnings)]
//! Checklist Frontend Entry Point

mod models;
mod error;
mod config;
mod logging;
mod task_store;
mod persistence;
mod render;
mod controller;
mod store;
mod context;
mod components;
mod app;

use app::App;
use config::AppConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let loaded = AppConfig::from_document();
    let config = loaded.as_ref().ok().cloned().unwrap_or_default();
    logging::init(config.level_filter());
    if let Err(e) = loaded {
        log::warn!(target: "app", "using default config: {}", e);
    }
    log::info!(target: "app", "starting with storage slot {:?}", config.storage_key);

    mount_to_body(move || view! { <App config=config /> });
}
