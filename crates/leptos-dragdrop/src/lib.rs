//! Leptos DragDrop Utilities
//!
//! HTML5 drag-and-drop for flat Leptos lists.
//! Tracks the drag source and the hovered row as signals; the list decides
//! what a drop means.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

/// DnD state signals
#[derive(Clone, Copy)]
pub struct DndSignals {
    pub dragging_id_read: ReadSignal<Option<u32>>,
    pub dragging_id_write: WriteSignal<Option<u32>>,
    /// Row currently hovered as a drop target
    pub over_id_read: ReadSignal<Option<u32>>,
    pub over_id_write: WriteSignal<Option<u32>>,
    pub drag_just_ended_read: ReadSignal<bool>,
    pub drag_just_ended_write: WriteSignal<bool>,
}

/// Some browsers emit a click on the drop target right after `drop`
const CLICK_SUPPRESS_MS: u32 = 100;

/// Payload type written to the DataTransfer
const DRAG_FORMAT: &str = "text/plain";

pub fn create_dnd_signals() -> DndSignals {
    let (dragging_id_read, dragging_id_write) = signal(None::<u32>);
    let (over_id_read, over_id_write) = signal(None::<u32>);
    let (drag_just_ended_read, drag_just_ended_write) = signal(false);
    DndSignals {
        dragging_id_read,
        dragging_id_write,
        over_id_read,
        over_id_write,
        drag_just_ended_read,
        drag_just_ended_write,
    }
}

impl DndSignals {
    /// Whether a click arriving now is the tail of a drag
    pub fn suppress_click(&self) -> bool {
        self.drag_just_ended_read.get_untracked()
    }
}

/// End drag operation
pub fn end_drag(dnd: &DndSignals) {
    let was_dragging = dnd.dragging_id_read.get_untracked().is_some();
    dnd.dragging_id_write.set(None);
    dnd.over_id_write.set(None);

    if was_dragging {
        dnd.drag_just_ended_write.set(true);
        let clear = dnd.drag_just_ended_write;
        let _ = Timeout::new(CLICK_SUPPRESS_MS, move || clear.set(false)).forget();
    }
}

/// Create dragstart handler: records `item_id` as the active drag source
pub fn make_on_dragstart(dnd: DndSignals, item_id: u32) -> impl Fn(web_sys::DragEvent) + Copy + 'static {
    move |ev: web_sys::DragEvent| {
        if let Some(dt) = ev.data_transfer() {
            let _ = dt.set_data(DRAG_FORMAT, &item_id.to_string());
            dt.set_effect_allowed("move");
        }
        dnd.dragging_id_write.set(Some(item_id));
    }
}

/// Create dragover handler.
/// Cancelling the event is what makes the row a valid drop target.
pub fn make_on_dragover(dnd: DndSignals, item_id: u32) -> impl Fn(web_sys::DragEvent) + Copy + 'static {
    move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        if let Some(dt) = ev.data_transfer() {
            dt.set_drop_effect("move");
        }
        match dnd.dragging_id_read.get_untracked() {
            Some(dragging) if dragging != item_id => {
                if dnd.over_id_read.get_untracked() != Some(item_id) {
                    dnd.over_id_write.set(Some(item_id));
                }
            }
            _ => {}
        }
    }
}

/// Create dragleave handler
pub fn make_on_dragleave(dnd: DndSignals, item_id: u32) -> impl Fn(web_sys::DragEvent) + Copy + 'static {
    move |_ev: web_sys::DragEvent| {
        if dnd.over_id_read.get_untracked() == Some(item_id) {
            dnd.over_id_write.set(None);
        }
    }
}

/// Create drop handler.
/// Calls `on_drop(source, target)` only when a different row was dragged here.
pub fn make_on_drop<F>(dnd: DndSignals, item_id: u32, on_drop: F) -> impl Fn(web_sys::DragEvent) + Copy + 'static
where
    F: Fn(u32, u32) + Copy + 'static,
{
    move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        let dragging = dnd.dragging_id_read.get_untracked();
        end_drag(&dnd);
        if let Some(source) = dragging {
            if source != item_id {
                on_drop(source, item_id);
            }
        }
    }
}

/// Create dragend handler: fires on the source whether or not a drop happened
pub fn make_on_dragend(dnd: DndSignals) -> impl Fn(web_sys::DragEvent) + Copy + 'static {
    move |_ev: web_sys::DragEvent| {
        if dnd.dragging_id_read.get_untracked().is_some() {
            end_drag(&dnd);
        }
    }
}
