//! Task Input Component
//!
//! Text-entry field; Enter adds the task.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::controller::Interaction;
use crate::error::TaskError;

/// Form for adding new tasks
#[component]
pub fn TaskInput() -> impl IntoView {
    let ctx = use_app_context();

    let (new_text, set_new_text) = signal(String::new());

    let add_task = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        match ctx.dispatch(Interaction::Submit(new_text.get_untracked())) {
            // A duplicate clears the field too; an empty submit leaves it alone
            Ok(_) | Err(TaskError::Duplicate(_)) => set_new_text.set(String::new()),
            Err(_) => {}
        }
    };

    view! {
        <form class="task-input" on:submit=add_task>
            <input
                id="input-box"
                type="text"
                placeholder="Add your task"
                autocomplete="off"
                prop:value=move || new_text.get()
                on:input=move |ev| set_new_text.set(event_target_value(&ev))
            />
            <button type="submit">"Add"</button>
        </form>
    }
}
