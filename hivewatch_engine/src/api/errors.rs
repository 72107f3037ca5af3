//! # Processor Errors

use crate::config::ConfigError;
use crate::expected::ExpectedSetError;
use crate::fetch::FetchError;
use uuid::Uuid;

/// Error type for the snapshot processor facade
#[derive(Debug, thiserror::Error)]
pub enum ProcessorError {
    /// Input or output file could not be read or written
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// Snapshot or spec document is not valid JSON for its schema
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Environment not found: {environment_id}")]
    UnknownEnvironment { environment_id: Uuid },

    #[error("Expected set error: {0}")]
    ExpectedSet(#[from] ExpectedSetError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Evaluation could not complete with the resources at hand
    #[error("Evaluation incomplete: {reason}")]
    Incomplete { reason: String },
}

impl ProcessorError {
    /// Check if this error is recoverable by fixing the input
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ProcessorError::FileNotFound { .. }
                | ProcessorError::Json(_)
                | ProcessorError::Config(_)
                | ProcessorError::UnknownEnvironment { .. }
        ) || matches!(self, ProcessorError::ExpectedSet(e) if e.is_validation())
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            ProcessorError::Io { path, source } => format!("Could not access {}: {}", path, source),
            ProcessorError::FileNotFound { path } => format!("File not found: {}", path),
            ProcessorError::Json(e) => format!("Input is not a valid snapshot document: {}", e),
            ProcessorError::Config(e) => format!("Configuration problem: {}", e),
            ProcessorError::UnknownEnvironment { environment_id } => {
                format!("No environment with id {} in the snapshot", environment_id)
            }
            ProcessorError::ExpectedSet(e) => e.to_string(),
            ProcessorError::Fetch(e) => format!("Loading failed: {}", e),
            ProcessorError::Incomplete { reason } => format!("Could not evaluate: {}", reason),
        }
    }
}
