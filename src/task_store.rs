//! Task Store
//!
//! Owns the ordered task collection and the natural order snapshot used to
//! undo sorting. Operations take positions, the way rows are addressed on
//! screen; ids stay stable across reorders so the UI can resolve a row to
//! its current position at event time.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::error::TaskError;
use crate::models::{normalize, Task, TaskRecord};

/// Ordered task collection plus the order recorded at the last add/remove
#[derive(Debug, Clone)]
pub struct TaskStore {
    tasks: Vec<Task>,
    /// Ids in collection order as of the last add, remove or remove_many.
    /// Reorder, sort and edit leave it alone, so `reset_order` after a drag
    /// puts the dragged task back.
    natural_order: Vec<u32>,
    next_id: u32,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            natural_order: Vec::new(),
            next_id: 1,
        }
    }

    /// Build a store from persisted records.
    /// Records with empty text or a duplicate of an earlier record are dropped.
    pub fn from_records(records: Vec<TaskRecord>) -> Self {
        let mut store = Self::new();
        for record in records {
            let key = normalize(&record.text);
            if key.is_empty() {
                log::warn!(target: "store", "dropping stored task with empty text");
                continue;
            }
            if store.find_key(&key, None).is_some() {
                log::warn!(target: "store", "dropping duplicate stored task {:?}", record.text);
                continue;
            }
            let id = store.alloc_id();
            store.tasks.push(Task::from_record(id, record));
        }
        store.snapshot_order();
        store
    }

    // ========================
    // Queries
    // ========================

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    pub fn position_of(&self, id: u32) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.checked).count()
    }

    /// Persistable view of the collection, in order
    pub fn records(&self) -> Vec<TaskRecord> {
        self.tasks.iter().map(Task::to_record).collect()
    }

    /// Ids in natural order
    pub fn natural_order(&self) -> &[u32] {
        &self.natural_order
    }

    // ========================
    // Structural mutations (refresh the snapshot)
    // ========================

    /// Append a new unchecked task. The raw text is stored as typed;
    /// only the duplicate check trims and folds case.
    pub fn add(&mut self, text: &str) -> Result<u32, TaskError> {
        let key = normalize(text);
        if key.is_empty() {
            return Err(TaskError::EmptyText);
        }
        if let Some(existing) = self.find_key(&key, None) {
            return Err(TaskError::Duplicate(self.tasks[existing].text.clone()));
        }

        let id = self.alloc_id();
        self.tasks.push(Task::new(id, text.to_string()));
        self.snapshot_order();
        Ok(id)
    }

    pub fn remove(&mut self, index: usize) -> Result<Task, TaskError> {
        self.check_index(index)?;
        let removed = self.tasks.remove(index);
        self.snapshot_order();
        Ok(removed)
    }

    /// Remove several positions at once. An out-of-range index fails the
    /// whole batch before anything is removed. Returns the removed tasks in
    /// collection order.
    pub fn remove_many(&mut self, indices: &[usize]) -> Result<Vec<Task>, TaskError> {
        for &index in indices {
            self.check_index(index)?;
        }

        let mut sorted: Vec<usize> = indices.to_vec();
        sorted.sort_unstable();
        sorted.dedup();

        let mut removed: Vec<Task> = sorted
            .iter()
            .rev()
            .map(|&index| self.tasks.remove(index))
            .collect();
        removed.reverse();

        self.snapshot_order();
        Ok(removed)
    }

    // ========================
    // In-place mutations (snapshot untouched)
    // ========================

    /// Flip completion; returns the new state
    pub fn toggle_checked(&mut self, index: usize) -> Result<bool, TaskError> {
        self.check_index(index)?;
        let task = &mut self.tasks[index];
        task.checked = !task.checked;
        Ok(task.checked)
    }

    /// Replace a task's text with the trimmed new text
    pub fn edit(&mut self, index: usize, new_text: &str) -> Result<(), TaskError> {
        self.check_index(index)?;
        let key = normalize(new_text);
        if key.is_empty() {
            return Err(TaskError::EmptyText);
        }
        if let Some(existing) = self.find_key(&key, Some(index)) {
            return Err(TaskError::Duplicate(self.tasks[existing].text.clone()));
        }
        self.tasks[index].text = new_text.trim().to_string();
        Ok(())
    }

    /// Move the task at `from` so that it lands at `to`
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<(), TaskError> {
        self.check_index(from)?;
        if from == to {
            return Ok(());
        }
        let task = self.tasks.remove(from);
        let to = to.min(self.tasks.len());
        self.tasks.insert(to, task);
        Ok(())
    }

    pub fn sort_ascending(&mut self) {
        self.tasks.sort_by(|a, b| locale_compare(&a.text, &b.text));
    }

    pub fn sort_descending(&mut self) {
        self.tasks.sort_by(|a, b| locale_compare(&b.text, &a.text));
    }

    /// Rearrange the collection into the recorded natural order
    pub fn reset_order(&mut self) {
        let mut by_id: HashMap<u32, Task> = self.tasks.drain(..).map(|t| (t.id, t)).collect();
        let mut ordered = Vec::with_capacity(by_id.len());
        for id in &self.natural_order {
            if let Some(task) = by_id.remove(id) {
                ordered.push(task);
            }
        }
        // Only reachable if the snapshot fell out of step; keep those tasks anyway
        let mut rest: Vec<Task> = by_id.into_values().collect();
        rest.sort_by_key(|t| t.id);
        ordered.extend(rest);
        self.tasks = ordered;
    }

    // ========================
    // Helpers
    // ========================

    fn alloc_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn snapshot_order(&mut self) {
        self.natural_order = self.tasks.iter().map(|t| t.id).collect();
    }

    fn check_index(&self, index: usize) -> Result<(), TaskError> {
        if index < self.tasks.len() {
            Ok(())
        } else {
            Err(TaskError::IndexOutOfRange { index, len: self.tasks.len() })
        }
    }

    /// Position of a task whose normalized text equals `key`, skipping `except`
    fn find_key(&self, key: &str, except: Option<usize>) -> Option<usize> {
        self.tasks
            .iter()
            .enumerate()
            .find(|(i, t)| Some(*i) != except && t.key() == key)
            .map(|(i, _)| i)
    }
}

/// `String.prototype.localeCompare` in the browser
#[cfg(target_arch = "wasm32")]
fn locale_compare(a: &str, b: &str) -> Ordering {
    js_sys::JsString::from(a)
        .locale_compare(b, &js_sys::Array::new(), &js_sys::Object::new())
        .cmp(&0)
}

/// Case-folded comparison; lowercase sorts first on ties, as the root collation does
#[cfg(not(target_arch = "wasm32"))]
fn locale_compare(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}
