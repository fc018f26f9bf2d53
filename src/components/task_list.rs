//! Task List Component
//!
//! Displays all tasks in order and owns the document-level Delete binding.

use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::components::TaskRow;
use crate::context::{use_app_context, AppContext};
use crate::controller::Interaction;
use crate::store::{use_app_store, AppStateStoreFields};

/// Task list with drag-and-drop rows
#[component]
pub fn TaskList() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    bind_global_delete(ctx);

    view! {
        <ul id="list-container" class="task-list">
            <For
                each=move || store.rows().get()
                // Text and edit mode rebuild the row; the rest is reactive inside it
                key=|row| (row.id, row.text.clone(), row.editing)
                children=move |row| {
                    view! { <TaskRow id=row.id text=row.text editing=row.editing /> }
                }
            />
        </ul>
    }
}

/// Bind the global Delete key to batch deletion of selected rows
fn bind_global_delete(ctx: AppContext) {
    let on_keydown = Closure::<dyn FnMut(web_sys::KeyboardEvent)>::new(move |ev: web_sys::KeyboardEvent| {
        if let Some(interaction) = Interaction::for_global_key(&ev.key()) {
            let _ = ctx.dispatch(interaction);
        }
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref());
        }
    }
    on_keydown.forget();
}
