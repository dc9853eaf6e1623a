use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskflowError {
    #[error("not a taskflow directory (run `taskflow init` first)")]
    NotInitialized,

    #[error("taskflow already initialized in this directory")]
    AlreadyInitialized,

    #[error("{0}")]
    Validation(String),

    #[error("task {0} not found")]
    TaskNotFound(String),

    #[error("project {0} not found")]
    ProjectNotFound(u64),

    #[error("stored value for '{key}' is corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unsupported config version {0} (expected {expected})", expected = crate::config::CONFIG_VERSION)]
    UnsupportedConfig(u32),

    #[error("locked by another process: {0}")]
    Locked(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TaskflowError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotInitialized => "not_initialized",
            Self::AlreadyInitialized => "already_initialized",
            Self::Validation(_) => "validation",
            Self::TaskNotFound(_) => "task_not_found",
            Self::ProjectNotFound(_) => "project_not_found",
            Self::Corrupt { .. } => "corrupt_storage",
            Self::UnsupportedConfig(_) => "unsupported_config",
            Self::Locked(_) => "locked",
            Self::Io(_) => "io_error",
            Self::Json(_) => "json_error",
        }
    }
}

pub type Result<T> = std::result::Result<T, TaskflowError>;
