//! Sort Bar Component
//!
//! Sort ascending, sort descending, and back to the order tasks were added in.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::controller::Interaction;

#[component]
pub fn SortBar() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <div class="sort-bar">
            <button class="sort-btn" on:click=move |_| { let _ = ctx.dispatch(Interaction::SortAscending); }>
                "A → Z"
            </button>
            <button class="sort-btn" on:click=move |_| { let _ = ctx.dispatch(Interaction::SortDescending); }>
                "Z → A"
            </button>
            <button class="sort-btn" on:click=move |_| { let _ = ctx.dispatch(Interaction::ResetOrder); }>
                "Reset"
            </button>
        </div>
    }
}
