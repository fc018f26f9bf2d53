//! Error types for task operations, storage and configuration.

/// Error type for task operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    #[error("task text is empty")]
    EmptyText,
    #[error("task already exists: {0}")]
    Duplicate(String),
    #[error("a task is being edited")]
    EditInProgress,
    #[error("no tasks selected")]
    NothingSelected,
    #[error("index {index} out of range for {len} tasks")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("unknown task id {0}")]
    UnknownTask(u32),
}

/// Error type for the persistence slot
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("failed to read slot {0}")]
    Read(String),
    #[error("failed to write slot {0}")]
    Write(String),
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Error type for the configuration block
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unknown log level: {0}")]
    LogLevel(String),
}
