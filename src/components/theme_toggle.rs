//! Theme Toggle Component
//!
//! Flips the dark theme class on `<body>`. Presentation only; not persisted.

use leptos::prelude::*;

use crate::context::use_app_context;

#[component]
pub fn ThemeToggle() -> impl IntoView {
    let ctx = use_app_context();
    let (is_dark, set_is_dark) = signal(false);

    let toggle = move |_| {
        let class = ctx.theme_class.get_value();
        let body = web_sys::window()
            .and_then(|win| win.document())
            .and_then(|doc| doc.body());
        if let Some(body) = body {
            if let Ok(on) = body.class_list().toggle(&class) {
                set_is_dark.set(on);
            }
        }
    };

    view! {
        <button
            id="toggle"
            class=move || if is_dark.get() { "theme-toggle active" } else { "theme-toggle" }
            title=move || if is_dark.get() { "Light theme" } else { "Dark theme" }
            on:click=toggle
        >
            {move || if is_dark.get() { "☀" } else { "☾" }}
        </button>
    }
}
