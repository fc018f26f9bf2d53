//! Frontend Models
//!
//! Task data structures and the persisted record layout.

use serde::{Deserialize, Serialize};

/// Persisted task record, one element of the JSON array in the storage slot.
///
/// Older data may carry an `isEditing` flag; unknown fields are ignored on
/// read and never written back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub text: String,
    #[serde(default)]
    pub checked: bool,
}

/// In-memory task with a session-stable identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Generated by the store; not persisted
    pub id: u32,
    pub text: String,
    pub checked: bool,
}

impl Task {
    pub fn new(id: u32, text: String) -> Self {
        Self { id, text, checked: false }
    }

    pub fn from_record(id: u32, record: TaskRecord) -> Self {
        Self {
            id,
            text: record.text,
            checked: record.checked,
        }
    }

    pub fn to_record(&self) -> TaskRecord {
        TaskRecord {
            text: self.text.clone(),
            checked: self.checked,
        }
    }

    /// Comparison key for uniqueness: trimmed and lowercased
    pub fn key(&self) -> String {
        normalize(&self.text)
    }
}

/// Trim and case-fold text for duplicate detection
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}
