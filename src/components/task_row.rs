//! Task Row Component
//!
//! One row in the task list: selection checkbox, editable text, remove button.

use leptos::html;
use leptos::prelude::*;
use leptos_dragdrop::*;

use crate::context::use_app_context;
use crate::controller::Interaction;
use crate::render::row_class;
use crate::store::{use_app_store, AppStateStoreFields};

/// A single task row.
///
/// Rows are rebuilt when their text or edit mode changes; completion and
/// selection are read reactively so a click does not replace the element
/// between the two halves of a double-click.
#[component]
pub fn TaskRow(id: u32, text: String, editing: bool) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let dnd = ctx.dnd;
    let text_ref = NodeRef::<html::Span>::new();

    let state = Memo::new(move |_| store.rows().read().iter().find(|r| r.id == id).cloned());

    // A row created in edit mode takes focus with the caret at the end
    if editing {
        Effect::new(move |_| {
            if let Some(el) = text_ref.get() {
                focus_at_end(&el);
            }
        });
    }

    let on_click = move |_ev: web_sys::MouseEvent| {
        if dnd.suppress_click() {
            return;
        }
        let _ = ctx.dispatch(Interaction::ToggleRow(id));
    };

    let on_dblclick = move |_ev: web_sys::MouseEvent| {
        if !editing {
            let _ = ctx.dispatch(Interaction::BeginEdit(id));
        }
    };

    // Enter commits through the blur handler
    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Enter" {
            ev.prevent_default();
            if let Some(el) = text_ref.get_untracked() {
                let _ = el.blur();
            }
        }
    };

    let on_blur = move |_ev: web_sys::FocusEvent| {
        let text = text_ref
            .get_untracked()
            .and_then(|el| el.text_content())
            .unwrap_or_default();
        let _ = ctx.dispatch(Interaction::CommitEdit { id, text });
    };

    let on_select = move |ev: web_sys::Event| {
        let selected = event_target_checked(&ev);
        let _ = ctx.dispatch(Interaction::Select { id, selected });
    };

    let on_remove = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        let _ = ctx.dispatch(Interaction::RequestRemove(id));
    };

    let on_drop = move |source: u32, target: u32| {
        let _ = ctx.dispatch(Interaction::Drop { source, target });
    };

    let item_class = move || {
        let is_dragging = dnd.dragging_id_read.get() == Some(id);
        let is_drop_target = dnd.over_id_read.get() == Some(id);
        state
            .get()
            .map(|row| row_class(&row, is_dragging, is_drop_target))
            .unwrap_or_default()
    };

    view! {
        <li
            class=item_class
            draggable=if editing { "false" } else { "true" }
            on:click=on_click
            on:dblclick=on_dblclick
            on:dragstart=make_on_dragstart(dnd, id)
            on:dragover=make_on_dragover(dnd, id)
            on:dragleave=make_on_dragleave(dnd, id)
            on:drop=make_on_drop(dnd, id, on_drop)
            on:dragend=make_on_dragend(dnd)
        >
            <input
                type="checkbox"
                class="delete-checkbox"
                prop:checked=move || state.get().map(|row| row.selected).unwrap_or(false)
                on:click=|ev| ev.stop_propagation()
                on:change=on_select
            />
            {if editing {
                view! {
                    <span
                        class="task-text"
                        contenteditable="true"
                        node_ref=text_ref
                        on:keydown=on_keydown
                        on:blur=on_blur
                    >
                        {text}
                    </span>
                }.into_any()
            } else {
                view! { <span class="task-text">{text}</span> }.into_any()
            }}
            <span class="remove-btn" on:click=on_remove>"\u{00d7}"</span>
        </li>
    }
}

/// Focus an editable element and collapse the selection to the end of its text
fn focus_at_end(el: &web_sys::HtmlElement) {
    let _ = el.focus();
    let Some(win) = web_sys::window() else { return };
    let Some(doc) = win.document() else { return };
    let Ok(range) = doc.create_range() else { return };
    if range.select_node_contents(el).is_err() {
        return;
    }
    range.collapse_with_to_start(false);
    if let Ok(Some(selection)) = win.get_selection() {
        let _ = selection.remove_all_ranges();
        let _ = selection.add_range(&range);
    }
}
