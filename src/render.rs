//! Render Model
//!
//! Projects the task store and session into what the list displays: one row
//! per task in collection order, plus the two counters. Components rebuild
//! their rows from this on every change.

use crate::controller::Session;
use crate::task_store::TaskStore;

/// One displayed row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: u32,
    pub index: usize,
    pub text: String,
    /// Completion
    pub checked: bool,
    /// Ticked for batch deletion
    pub selected: bool,
    /// Text region is in edit mode
    pub editing: bool,
}

/// Total and completed task counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    pub total: usize,
    pub completed: usize,
}

impl Counters {
    pub fn of(store: &TaskStore) -> Self {
        Self {
            total: store.len(),
            completed: store.completed_count(),
        }
    }
}

/// Everything the list needs to draw itself
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListView {
    pub rows: Vec<RowView>,
    pub counters: Counters,
    pub editing: Option<u32>,
}

impl ListView {
    pub fn build(store: &TaskStore, session: &Session) -> Self {
        let rows = store
            .tasks()
            .iter()
            .enumerate()
            .map(|(index, task)| RowView {
                id: task.id,
                index,
                text: task.text.clone(),
                checked: task.checked,
                selected: session.selected.contains(&task.id),
                editing: session.editing == Some(task.id),
            })
            .collect();

        Self {
            rows,
            counters: Counters::of(store),
            editing: session.editing,
        }
    }
}

/// CSS classes for a row
pub fn row_class(row: &RowView, is_dragging: bool, is_drop_target: bool) -> String {
    let mut c = String::from("task-row");
    if row.checked { c.push_str(" checked"); }
    if row.selected { c.push_str(" selected-task"); }
    if row.editing { c.push_str(" editing"); }
    if is_dragging { c.push_str(" dragging"); }
    if is_drop_target { c.push_str(" drop-target"); }
    c
}
