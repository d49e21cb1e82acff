//! Error type shared by the layout engine and the task model.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The text measurement surface could not be acquired or returned garbage.
    /// Layout refuses to guess widths in that case.
    #[error("text measurement unavailable: {0}")]
    MeasurementUnavailable(String),

    #[error("invalid layout config: {0}")]
    InvalidConfig(String),

    #[error("priority must be between 1 and 4, got {0}")]
    InvalidPriority(i64),

    #[error("importance must be between 1 and 4, got {0}")]
    InvalidImportance(i64),

    #[error("unknown layout strategy '{0}' (expected \"ring\" or \"spiral\")")]
    UnknownStrategy(String),

    #[error("task '{0}' not found")]
    TaskNotFound(String),

    #[error("duplicate task id '{0}'")]
    DuplicateTaskId(String),

    #[error("task title must not be empty")]
    EmptyTitle,

    #[error("moving task '{task}' under '{parent}' would create a cycle")]
    CycleDetected { task: String, parent: String },

    #[error("task '{0}' has no subtasks")]
    NoChildren(String),

    #[error("breadcrumb level {level} out of range (depth {depth})")]
    LevelOutOfRange { level: usize, depth: usize },

    #[error("storage error: {0}")]
    Storage(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Short machine-readable name, used in JSON output for the JS host.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::MeasurementUnavailable(_) => "measurement_unavailable",
            Error::InvalidConfig(_) => "invalid_config",
            Error::InvalidPriority(_) => "invalid_priority",
            Error::InvalidImportance(_) => "invalid_importance",
            Error::UnknownStrategy(_) => "unknown_strategy",
            Error::TaskNotFound(_) => "task_not_found",
            Error::DuplicateTaskId(_) => "duplicate_task_id",
            Error::EmptyTitle => "empty_title",
            Error::CycleDetected { .. } => "cycle_detected",
            Error::NoChildren(_) => "no_children",
            Error::LevelOutOfRange { .. } => "level_out_of_range",
            Error::Storage(_) => "storage",
            Error::Json(_) => "json",
        }
    }
}
