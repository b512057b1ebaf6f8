//! Error types for the cm-app service layer.

use std::path::PathBuf;

/// Application error type shared by the CLI and any other front-end.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Log parse error: {0}")]
    Parse(#[from] cm_monitor::ParseError),

    #[error("Failed to read case file: {path}")]
    CaseFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write case file: {path}")]
    CaseFileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Case validation failed: {0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for cm-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<cm_core::CoreError> for AppError {
    fn from(err: cm_core::CoreError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}
