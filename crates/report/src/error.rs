//! Error types for the report pipeline

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using the pipeline [`ReportError`]
pub type Result<T> = std::result::Result<T, ReportError>;

/// Report pipeline error types
///
/// None of these are retried: every variant propagates to the orchestrator,
/// which logs the failing stage and aborts the run.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Merge failed: cannot read artifact directory {dir}: {reason}")]
    ArtifactDir { dir: PathBuf, reason: String },

    #[error("Merge failed: artifact {file}: {reason}")]
    ArtifactParse { file: PathBuf, reason: String },

    #[error("Render failed: {0}")]
    Render(String),

    #[error("Precondition failed: {0}")]
    Precondition(String),

    #[error("Delivery failed: {0}")]
    Delivery(String),
}
