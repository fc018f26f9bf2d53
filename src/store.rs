//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The controller
//! publishes a fresh render model here after every dispatch.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::render::{Counters, ListView, RowView};

/// Displayed list state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// One entry per task, in collection order
    pub rows: Vec<RowView>,
    /// Total and completed counts
    pub counters: Counters,
    /// Row in edit mode
    pub editing: Option<u32>,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

/// Replace the displayed state with a freshly built render model
pub fn store_publish(store: &AppStore, view: ListView) {
    *store.rows().write() = view.rows;
    *store.counters().write() = view.counters;
    *store.editing().write() = view.editing;
}
