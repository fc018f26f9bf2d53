//! Task Counters Component

use leptos::prelude::*;

use crate::store::{use_app_store, AppStateStoreFields};

/// Total and completed counts
#[component]
pub fn TaskCounters() -> impl IntoView {
    let store = use_app_store();

    view! {
        <p class="task-counters">
            "Total: " <span id="totalCount">{move || store.counters().get().total}</span>
            " · Completed: " <span id="completedCount">{move || store.counters().get().completed}</span>
        </p>
    }
}
