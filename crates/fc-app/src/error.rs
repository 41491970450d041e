//! Error types for the fc-app service layer.

use std::path::PathBuf;

/// Unified error surface for front ends.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to read scenario file: {path}")]
    ScenarioRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse scenario file: {0}")]
    ScenarioParse(#[from] serde_yaml::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Compute error: {0}")]
    Compute(String),

    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for fc-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<fc_compute::ComputeError> for AppError {
    fn from(err: fc_compute::ComputeError) -> Self {
        AppError::Compute(err.to_string())
    }
}
