//! Checklist App
//!
//! Loads the persisted list and lays out the page.

use leptos::prelude::*;
use leptos_dragdrop::create_dnd_signals;
use reactive_stores::Store;

use crate::components::{SortBar, TaskCounters, TaskInput, TaskList, ThemeToggle};
use crate::config::AppConfig;
use crate::context::{AppContext, Dispatcher};
use crate::controller::{BrowserPrompter, Controller};
use crate::persistence::{BrowserStorage, TaskPersistence};
use crate::store::AppState;

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let persistence = TaskPersistence::new(BrowserStorage::local(), config.storage_key.clone());
    let controller = Controller::load(persistence, BrowserPrompter);
    log::info!(target: "app", "{} tasks on screen", controller.store().len());

    let store = Store::new(AppState::default());
    let dispatcher = Dispatcher::new(controller, store);

    // Provide context to all children
    provide_context(store);
    provide_context(AppContext::new(dispatcher, create_dnd_signals(), config.theme_class.clone()));

    view! {
        <div class="container">
            <div class="todo-app">
                <header class="app-header">
                    <h2>{config.title.clone()}</h2>
                    <ThemeToggle />
                </header>

                <TaskInput />
                <SortBar />
                <TaskList />
                <TaskCounters />
            </div>
        </div>
    }
}
