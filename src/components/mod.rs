//! UI Components
//!
//! Leptos components for the task list page.

mod task_row;
mod task_list;
mod task_input;
mod task_counters;
mod sort_bar;
mod theme_toggle;

pub use task_row::TaskRow;
pub use task_list::TaskList;
pub use task_input::TaskInput;
pub use task_counters::TaskCounters;
pub use sort_bar::SortBar;
pub use theme_toggle::ThemeToggle;
