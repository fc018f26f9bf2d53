//! Application Config
//!
//! Optional overrides come from a JSON block in the host page:
//! `<script type="application/json" id="app-config">{ ... }</script>`.
//! Every field has a default, so the block may be absent or partial.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Element id of the JSON config block
const CONFIG_ELEMENT_ID: &str = "app-config";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// localStorage slot holding the task list
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    /// One of error, warn, info, debug, trace, off
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Class toggled on `<body>` by the theme switch
    #[serde(default = "default_theme_class")]
    pub theme_class: String,
    #[serde(default = "default_title")]
    pub title: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            storage_key: default_storage_key(),
            log_level: default_log_level(),
            theme_class: default_theme_class(),
            title: default_title(),
        }
    }
}

fn default_storage_key() -> String {
    "data".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_theme_class() -> String {
    "dark-theme".to_string()
}

fn default_title() -> String {
    "To-Do List".to_string()
}

impl AppConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: AppConfig = serde_json::from_str(raw)?;
        config
            .log_level
            .parse::<log::LevelFilter>()
            .map_err(|_| ConfigError::LogLevel(config.log_level.clone()))?;
        Ok(config)
    }

    /// Read the config block from the current document
    pub fn from_document() -> Result<Self, ConfigError> {
        let raw = web_sys::window()
            .and_then(|win| win.document())
            .and_then(|doc| doc.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());
        match raw {
            Some(raw) => Self::from_json(&raw),
            None => Ok(Self::default()),
        }
    }

    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}
