//! Interaction Controller
//!
//! Turns UI interactions into task store operations. Each dispatch runs one
//! compound step (mutate, persist, report what to redraw) to completion.
//! All user-facing alert and confirmation text lives here.

use std::collections::BTreeSet;

use crate::error::TaskError;
use crate::persistence::{KeyValueStore, TaskPersistence};
use crate::render::ListView;
use crate::task_store::TaskStore;

/// Blocking yes/no and notice dialogs
pub trait Prompter {
    fn alert(&self, message: &str);
    fn confirm(&self, message: &str) -> bool;
}

/// `window.alert` / `window.confirm`
pub struct BrowserPrompter;

impl Prompter for BrowserPrompter {
    fn alert(&self, message: &str) {
        if let Some(win) = web_sys::window() {
            let _ = win.alert_with_message(message);
        }
    }

    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|win| win.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
}

/// Everything the user can do to the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    /// Enter in the text-entry field
    Submit(String),
    /// Click on a row body
    ToggleRow(u32),
    /// Row checkbox changed
    Select { id: u32, selected: bool },
    /// Double-click on a row
    BeginEdit(u32),
    /// Enter or focus loss in an editing row
    CommitEdit { id: u32, text: String },
    /// Click on a row's × button
    RequestRemove(u32),
    /// Global Delete key
    DeleteSelected,
    /// `source` dropped onto `target`
    Drop { source: u32, target: u32 },
    SortAscending,
    SortDescending,
    ResetOrder,
}

impl Interaction {
    /// Document-wide key bindings. Delete fires wherever focus is, the
    /// entry field included.
    pub fn for_global_key(key: &str) -> Option<Self> {
        match key {
            "Delete" => Some(Interaction::DeleteSelected),
            _ => None,
        }
    }
}

/// What the view has to redraw after a dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    None,
    /// A single row's state and the counters
    Row,
    /// The whole list
    List,
}

/// Ephemeral UI state, never persisted
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// Row whose text is being edited
    pub editing: Option<u32>,
    /// Rows ticked for batch deletion. Reset to the completed rows whenever
    /// the whole list is redrawn.
    pub selected: BTreeSet<u32>,
}

impl Session {
    /// Tick exactly the completed rows
    fn retick(&mut self, store: &TaskStore) {
        self.selected = store
            .tasks()
            .iter()
            .filter(|t| t.checked)
            .map(|t| t.id)
            .collect();
    }
}

pub struct Controller<S, P> {
    store: TaskStore,
    persistence: TaskPersistence<S>,
    session: Session,
    prompter: P,
}

impl<S: KeyValueStore, P: Prompter> Controller<S, P> {
    /// Load the persisted list; completed rows start ticked for deletion
    pub fn load(persistence: TaskPersistence<S>, prompter: P) -> Self {
        let store = persistence.load();
        let mut session = Session::default();
        session.retick(&store);
        Self {
            store,
            persistence,
            session,
            prompter,
        }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn persistence(&self) -> &TaskPersistence<S> {
        &self.persistence
    }

    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    pub fn view(&self) -> ListView {
        ListView::build(&self.store, &self.session)
    }

    pub fn dispatch(&mut self, interaction: Interaction) -> Result<Change, TaskError> {
        log::debug!(target: "controller", "dispatch {:?}", interaction);
        let result = match interaction {
            Interaction::Submit(text) => self.submit(&text),
            Interaction::ToggleRow(id) => self.toggle_row(id),
            Interaction::Select { id, selected } => self.select(id, selected),
            Interaction::BeginEdit(id) => self.begin_edit(id),
            Interaction::CommitEdit { id, text } => self.commit_edit(id, &text),
            Interaction::RequestRemove(id) => self.request_remove(id),
            Interaction::DeleteSelected => self.delete_selected(),
            Interaction::Drop { source, target } => self.drop_on(source, target),
            Interaction::SortAscending => {
                self.store.sort_ascending();
                Ok(Change::List)
            }
            Interaction::SortDescending => {
                self.store.sort_descending();
                Ok(Change::List)
            }
            Interaction::ResetOrder => {
                self.store.reset_order();
                Ok(Change::List)
            }
        };
        match &result {
            Ok(Change::List) => self.session.retick(&self.store),
            Err(e) => log::debug!(target: "controller", "rejected: {}", e),
            Ok(_) => {}
        }
        result
    }

    // ========================
    // Handlers
    // ========================

    fn submit(&mut self, text: &str) -> Result<Change, TaskError> {
        match self.store.add(text) {
            Ok(_) => {
                self.persist();
                Ok(Change::List)
            }
            Err(e) => {
                match e {
                    TaskError::EmptyText => self.prompter.alert("You must write something"),
                    _ => self.prompter.alert("Task already exists!"),
                }
                Err(e)
            }
        }
    }

    fn toggle_row(&mut self, id: u32) -> Result<Change, TaskError> {
        if self.session.editing == Some(id) {
            return Ok(Change::None);
        }
        let index = self.index_of(id)?;
        self.store.toggle_checked(index)?;
        self.persist();
        Ok(Change::Row)
    }

    fn select(&mut self, id: u32, selected: bool) -> Result<Change, TaskError> {
        self.index_of(id)?;
        if selected {
            self.session.selected.insert(id);
        } else {
            self.session.selected.remove(&id);
        }
        Ok(Change::Row)
    }

    fn begin_edit(&mut self, id: u32) -> Result<Change, TaskError> {
        self.index_of(id)?;
        self.session.editing = Some(id);
        Ok(Change::Row)
    }

    fn commit_edit(&mut self, id: u32, text: &str) -> Result<Change, TaskError> {
        // A blur from a row that already left edit mode
        if self.session.editing != Some(id) {
            return Ok(Change::None);
        }
        self.session.editing = None;

        let index = self.index_of(id)?;
        match self.store.edit(index, text) {
            Ok(()) => {
                self.persist();
                Ok(Change::Row)
            }
            Err(e) => {
                match e {
                    TaskError::EmptyText => self.prompter.alert("Task cannot be empty."),
                    _ => self.prompter.alert("Task already exists!"),
                }
                Err(e)
            }
        }
    }

    fn request_remove(&mut self, id: u32) -> Result<Change, TaskError> {
        if self.session.editing.is_some() {
            self.prompter
                .alert("Cannot delete while editing a task. Finish editing first.");
            return Err(TaskError::EditInProgress);
        }

        let index = self.index_of(id)?;
        let text = self.store.tasks()[index].text.clone();
        if !self
            .prompter
            .confirm(&format!("Do you want to remove a task \"{}\"?", text))
        {
            self.prompter.alert("Removing Cancelled.");
            return Ok(Change::None);
        }

        self.store.remove(index)?;
        self.persist();
        Ok(Change::List)
    }

    fn delete_selected(&mut self) -> Result<Change, TaskError> {
        if self.session.editing.is_some() {
            self.prompter.alert("Cannot delete while editing a task.");
            return Err(TaskError::EditInProgress);
        }

        let mut indices: Vec<usize> = self
            .session
            .selected
            .iter()
            .filter_map(|id| self.store.position_of(*id))
            .collect();
        if indices.is_empty() {
            self.prompter.alert("No tasks selected for deletion.");
            return Err(TaskError::NothingSelected);
        }
        indices.sort_unstable();

        let names = indices
            .iter()
            .map(|&i| self.store.tasks()[i].text.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        if !self
            .prompter
            .confirm(&format!("Do you want to remove the selected tasks: \"{}\"?", names))
        {
            self.prompter.alert("Deletion cancelled.");
            return Ok(Change::None);
        }

        let removed = self.store.remove_many(&indices)?;
        log::info!(target: "controller", "removed {} selected tasks", removed.len());
        self.persist();
        Ok(Change::List)
    }

    fn drop_on(&mut self, source: u32, target: u32) -> Result<Change, TaskError> {
        if source == target {
            return Ok(Change::None);
        }
        let from = self.index_of(source)?;
        let to = self.index_of(target)?;
        self.store.reorder(from, to)?;
        self.persist();
        Ok(Change::List)
    }

    // ========================
    // Helpers
    // ========================

    fn index_of(&self, id: u32) -> Result<usize, TaskError> {
        self.store.position_of(id).ok_or(TaskError::UnknownTask(id))
    }

    /// Save failures are logged; the in-memory list stays authoritative
    fn persist(&mut self) {
        if let Err(e) = self.persistence.save(&self.store) {
            log::error!(target: "storage", "failed to save tasks: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    const KEY: &str = "data";

    /// Answers confirms from a queue and records every prompt
    #[derive(Default)]
    struct ScriptedPrompter {
        answers: RefCell<VecDeque<bool>>,
        alerts: RefCell<Vec<String>>,
        confirms: RefCell<Vec<String>>,
    }

    impl ScriptedPrompter {
        fn answering(answers: &[bool]) -> Self {
            Self {
                answers: RefCell::new(answers.iter().copied().collect()),
                ..Self::default()
            }
        }
    }

    impl Prompter for ScriptedPrompter {
        fn alert(&self, message: &str) {
            self.alerts.borrow_mut().push(message.to_string());
        }

        fn confirm(&self, message: &str) -> bool {
            self.confirms.borrow_mut().push(message.to_string());
            self.answers.borrow_mut().pop_front().unwrap_or(false)
        }
    }

    type TestController = Controller<MemoryStore, ScriptedPrompter>;

    fn controller(answers: &[bool]) -> TestController {
        Controller::load(
            TaskPersistence::new(MemoryStore::new(), KEY),
            ScriptedPrompter::answering(answers),
        )
    }

    fn with_tasks(texts: &[&str], answers: &[bool]) -> TestController {
        let mut c = controller(answers);
        for text in texts {
            c.dispatch(Interaction::Submit(text.to_string())).unwrap();
        }
        c
    }

    fn id_at(c: &TestController, index: usize) -> u32 {
        c.store().get(index).unwrap().id
    }

    fn texts(c: &TestController) -> Vec<String> {
        c.store().tasks().iter().map(|t| t.text.clone()).collect()
    }

    fn stored(c: &TestController) -> Vec<String> {
        c.persistence()
            .try_load()
            .unwrap()
            .unwrap_or_default()
            .into_iter()
            .map(|r| r.text)
            .collect()
    }

    fn alerts(c: &TestController) -> Vec<String> {
        c.prompter().alerts.borrow().clone()
    }

    #[test]
    fn test_submit_persists_and_rerenders() {
        let mut c = controller(&[]);
        assert_eq!(c.dispatch(Interaction::Submit("Buy milk".into())), Ok(Change::List));
        assert_eq!(stored(&c), vec!["Buy milk"]);
    }

    #[test]
    fn test_submit_duplicate_alerts() {
        let mut c = with_tasks(&["Buy milk"], &[]);
        let result = c.dispatch(Interaction::Submit("buy milk".into()));
        assert!(matches!(result, Err(TaskError::Duplicate(_))));
        assert_eq!(c.store().len(), 1);
        assert_eq!(alerts(&c), vec!["Task already exists!"]);
    }

    #[test]
    fn test_submit_empty_alerts() {
        let mut c = controller(&[]);
        assert_eq!(c.dispatch(Interaction::Submit("  ".into())), Err(TaskError::EmptyText));
        assert_eq!(alerts(&c), vec!["You must write something"]);
        assert!(c.persistence().backend().raw(KEY).is_none());
    }

    #[test]
    fn test_toggle_updates_counters_and_storage() {
        let mut c = with_tasks(&["X"], &[]);
        let id = id_at(&c, 0);
        assert_eq!(c.dispatch(Interaction::ToggleRow(id)), Ok(Change::Row));

        let view = c.view();
        assert_eq!(view.counters.total, 1);
        assert_eq!(view.counters.completed, 1);
        let records = c.persistence().try_load().unwrap().unwrap();
        assert!(records[0].checked);
    }

    #[test]
    fn test_toggle_ignored_while_row_is_editing() {
        let mut c = with_tasks(&["X"], &[]);
        let id = id_at(&c, 0);
        c.dispatch(Interaction::BeginEdit(id)).unwrap();
        assert_eq!(c.dispatch(Interaction::ToggleRow(id)), Ok(Change::None));
        assert_eq!(c.store().completed_count(), 0);
    }

    #[test]
    fn test_commit_empty_edit_keeps_text() {
        let mut c = with_tasks(&["X"], &[]);
        let id = id_at(&c, 0);
        c.dispatch(Interaction::BeginEdit(id)).unwrap();
        let result = c.dispatch(Interaction::CommitEdit { id, text: String::new() });
        assert_eq!(result, Err(TaskError::EmptyText));
        assert_eq!(texts(&c), vec!["X"]);
        assert_eq!(c.session().editing, None);
        assert_eq!(alerts(&c), vec!["Task cannot be empty."]);
        assert!(!c.view().rows[0].editing);
    }

    #[test]
    fn test_commit_edit_trims_and_persists() {
        let mut c = with_tasks(&["X", "Y"], &[]);
        let id = id_at(&c, 1);
        c.dispatch(Interaction::BeginEdit(id)).unwrap();
        c.dispatch(Interaction::CommitEdit { id, text: "  Zed ".into() }).unwrap();
        assert_eq!(stored(&c), vec!["X", "Zed"]);
    }

    #[test]
    fn test_commit_duplicate_edit_alerts() {
        let mut c = with_tasks(&["X", "Y"], &[]);
        let id = id_at(&c, 1);
        c.dispatch(Interaction::BeginEdit(id)).unwrap();
        let result = c.dispatch(Interaction::CommitEdit { id, text: "x".into() });
        assert!(matches!(result, Err(TaskError::Duplicate(_))));
        assert_eq!(texts(&c), vec!["X", "Y"]);
        assert_eq!(alerts(&c), vec!["Task already exists!"]);
    }

    #[test]
    fn test_stray_commit_is_ignored() {
        let mut c = with_tasks(&["X"], &[]);
        let id = id_at(&c, 0);
        assert_eq!(c.dispatch(Interaction::CommitEdit { id, text: "Y".into() }), Ok(Change::None));
        assert_eq!(texts(&c), vec!["X"]);
    }

    #[test]
    fn test_remove_confirmed() {
        let mut c = with_tasks(&["A", "B"], &[true]);
        let id = id_at(&c, 0);
        assert_eq!(c.dispatch(Interaction::RequestRemove(id)), Ok(Change::List));
        assert_eq!(texts(&c), vec!["B"]);
        assert_eq!(stored(&c), vec!["B"]);
        assert_eq!(
            c.prompter().confirms.borrow().clone(),
            vec!["Do you want to remove a task \"A\"?"]
        );
    }

    #[test]
    fn test_remove_cancelled() {
        let mut c = with_tasks(&["A"], &[false]);
        let id = id_at(&c, 0);
        assert_eq!(c.dispatch(Interaction::RequestRemove(id)), Ok(Change::None));
        assert_eq!(texts(&c), vec!["A"]);
        assert_eq!(alerts(&c), vec!["Removing Cancelled."]);
    }

    #[test]
    fn test_remove_refused_while_editing() {
        let mut c = with_tasks(&["A", "B"], &[true]);
        let editing = id_at(&c, 1);
        c.dispatch(Interaction::BeginEdit(editing)).unwrap();
        let result = c.dispatch(Interaction::RequestRemove(id_at(&c, 0)));
        assert_eq!(result, Err(TaskError::EditInProgress));
        assert_eq!(c.store().len(), 2);
        assert!(c.prompter().confirms.borrow().is_empty());
    }

    #[test]
    fn test_delete_selected() {
        let mut c = with_tasks(&["a", "b", "c"], &[true]);
        let (a, c_id) = (id_at(&c, 0), id_at(&c, 2));
        c.dispatch(Interaction::Select { id: c_id, selected: true }).unwrap();
        c.dispatch(Interaction::Select { id: a, selected: true }).unwrap();

        assert_eq!(c.dispatch(Interaction::DeleteSelected), Ok(Change::List));
        assert_eq!(texts(&c), vec!["b"]);
        assert_eq!(stored(&c), vec!["b"]);
        assert!(c.session().selected.is_empty());
        assert_eq!(
            c.prompter().confirms.borrow().clone(),
            vec!["Do you want to remove the selected tasks: \"a, c\"?"]
        );
    }

    #[test]
    fn test_delete_selected_refused_while_editing() {
        let mut c = with_tasks(&["a", "b"], &[true]);
        let a = id_at(&c, 0);
        c.dispatch(Interaction::Select { id: a, selected: true }).unwrap();
        c.dispatch(Interaction::BeginEdit(id_at(&c, 1))).unwrap();

        assert_eq!(c.dispatch(Interaction::DeleteSelected), Err(TaskError::EditInProgress));
        assert_eq!(c.store().len(), 2);
        assert_eq!(alerts(&c), vec!["Cannot delete while editing a task."]);
    }

    #[test]
    fn test_global_key_bindings() {
        assert_eq!(Interaction::for_global_key("Delete"), Some(Interaction::DeleteSelected));
        assert_eq!(Interaction::for_global_key("Backspace"), None);
        assert_eq!(Interaction::for_global_key("Enter"), None);
    }

    #[test]
    fn test_delete_with_nothing_selected() {
        let mut c = with_tasks(&["a"], &[]);
        assert_eq!(c.dispatch(Interaction::DeleteSelected), Err(TaskError::NothingSelected));
        assert_eq!(alerts(&c), vec!["No tasks selected for deletion."]);
    }

    #[test]
    fn test_delete_selected_cancelled() {
        let mut c = with_tasks(&["a"], &[false]);
        c.dispatch(Interaction::Select { id: id_at(&c, 0), selected: true }).unwrap();
        assert_eq!(c.dispatch(Interaction::DeleteSelected), Ok(Change::None));
        assert_eq!(c.store().len(), 1);
        assert_eq!(alerts(&c), vec!["Deletion cancelled."]);
        assert_eq!(c.session().selected.len(), 1);
    }

    #[test]
    fn test_deselect() {
        let mut c = with_tasks(&["a"], &[]);
        let id = id_at(&c, 0);
        c.dispatch(Interaction::Select { id, selected: true }).unwrap();
        c.dispatch(Interaction::Select { id, selected: false }).unwrap();
        assert!(!c.view().rows[0].selected);
        assert_eq!(c.dispatch(Interaction::Select { id: 99, selected: true }), Err(TaskError::UnknownTask(99)));
    }

    #[test]
    fn test_completed_tasks_load_ticked() {
        let raw = r#"[{"text":"done","checked":true},{"text":"todo","checked":false}]"#;
        let mut c = Controller::load(
            TaskPersistence::new(MemoryStore::with_slot(KEY, raw), KEY),
            ScriptedPrompter::answering(&[true]),
        );
        let view = c.view();
        assert!(view.rows[0].selected);
        assert!(!view.rows[1].selected);

        assert_eq!(c.dispatch(Interaction::DeleteSelected), Ok(Change::List));
        assert_eq!(
            c.prompter().confirms.borrow().clone(),
            vec!["Do you want to remove the selected tasks: \"done\"?"]
        );
        assert_eq!(texts(&c), vec!["todo"]);
        assert_eq!(stored(&c), vec!["todo"]);
    }

    #[test]
    fn test_list_redraw_reticks_completed_rows() {
        let mut c = with_tasks(&["a", "b", "c"], &[]);
        let (a, b) = (id_at(&c, 0), id_at(&c, 1));
        c.dispatch(Interaction::ToggleRow(a)).unwrap();
        c.dispatch(Interaction::Select { id: b, selected: true }).unwrap();
        // Toggling alone leaves the checkbox as it was
        assert_eq!(c.session().selected, BTreeSet::from([b]));

        c.dispatch(Interaction::SortDescending).unwrap();
        assert_eq!(c.session().selected, BTreeSet::from([a]));
    }

    #[test]
    fn test_drop_reorders_and_persists() {
        let mut c = with_tasks(&["one", "two", "three"], &[]);
        let (first, last) = (id_at(&c, 0), id_at(&c, 2));
        assert_eq!(c.dispatch(Interaction::Drop { source: first, target: last }), Ok(Change::List));
        assert_eq!(texts(&c), vec!["two", "three", "one"]);
        assert_eq!(stored(&c), vec!["two", "three", "one"]);

        let reloaded = Controller::load(
            TaskPersistence::new(c.persistence().backend().clone(), KEY),
            ScriptedPrompter::default(),
        );
        assert_eq!(texts(&reloaded), vec!["two", "three", "one"]);
    }

    #[test]
    fn test_drop_on_self_is_noop() {
        let mut c = with_tasks(&["one", "two"], &[]);
        let id = id_at(&c, 0);
        assert_eq!(c.dispatch(Interaction::Drop { source: id, target: id }), Ok(Change::None));
        assert_eq!(texts(&c), vec!["one", "two"]);
    }

    #[test]
    fn test_sort_is_not_persisted() {
        let mut c = with_tasks(&["Task A", "Task B"], &[]);
        c.dispatch(Interaction::SortDescending).unwrap();
        assert_eq!(texts(&c), vec!["Task B", "Task A"]);
        assert_eq!(stored(&c), vec!["Task A", "Task B"]);

        c.dispatch(Interaction::ResetOrder).unwrap();
        assert_eq!(texts(&c), vec!["Task A", "Task B"]);
    }

    #[test]
    fn test_save_failure_keeps_memory_state() {
        let mut c = Controller::load(
            TaskPersistence::new(MemoryStore::failing(), KEY),
            ScriptedPrompter::default(),
        );
        assert_eq!(c.dispatch(Interaction::Submit("kept".into())), Ok(Change::List));
        assert_eq!(texts(&c), vec!["kept"]);
    }

    #[test]
    fn test_counters_track_every_mutation() {
        let mut c = with_tasks(&["a", "b", "c"], &[true]);
        let steps = vec![
            Interaction::ToggleRow(id_at(&c, 0)),
            Interaction::ToggleRow(id_at(&c, 2)),
            Interaction::RequestRemove(id_at(&c, 2)),
            Interaction::Submit("d".into()),
            Interaction::SortDescending,
        ];
        for step in steps {
            c.dispatch(step).unwrap();
            let view = c.view();
            assert_eq!(view.counters.total, c.store().len());
            assert_eq!(view.counters.completed, c.store().tasks().iter().filter(|t| t.checked).count());
        }
        assert_eq!(c.view().counters.completed, 1);
    }
}
