//! Application Context
//!
//! Shared handles provided via Leptos Context API.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use leptos_dragdrop::DndSignals;

use crate::controller::{BrowserPrompter, Change, Controller, Interaction};
use crate::error::TaskError;
use crate::persistence::BrowserStorage;
use crate::store::{store_publish, AppStore};

pub type AppController = Controller<BrowserStorage, BrowserPrompter>;

/// Runs interactions against the controller and publishes the result
#[derive(Clone)]
pub struct Dispatcher {
    controller: Rc<RefCell<AppController>>,
    store: AppStore,
}

impl Dispatcher {
    pub fn new(controller: AppController, store: AppStore) -> Self {
        store_publish(&store, controller.view());
        Self {
            controller: Rc::new(RefCell::new(controller)),
            store,
        }
    }

    pub fn dispatch(&self, interaction: Interaction) -> Result<Change, TaskError> {
        // A blocking dialog can fire blur on the focused row while a dispatch
        // is still running; that nested event is dropped.
        let Ok(mut controller) = self.controller.try_borrow_mut() else {
            log::debug!(target: "app", "dropping {:?} raised during another dispatch", interaction);
            return Ok(Change::None);
        };
        let result = controller.dispatch(interaction);
        let view = controller.view();
        drop(controller);

        if !matches!(result, Ok(Change::None)) {
            store_publish(&self.store, view);
        }
        result
    }
}

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    dispatcher: StoredValue<Dispatcher, LocalStorage>,
    /// Drag source and hover target
    pub dnd: DndSignals,
    /// Class toggled on `<body>` by the theme switch
    pub theme_class: StoredValue<String>,
}

impl AppContext {
    pub fn new(dispatcher: Dispatcher, dnd: DndSignals, theme_class: String) -> Self {
        Self {
            dispatcher: StoredValue::new_local(dispatcher),
            dnd,
            theme_class: StoredValue::new(theme_class),
        }
    }

    /// Run one interaction to completion
    pub fn dispatch(&self, interaction: Interaction) -> Result<Change, TaskError> {
        self.dispatcher.get_value().dispatch(interaction)
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}
