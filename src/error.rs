//! Error types for the fantasy scoring and projection engines

use thiserror::Error;


pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Error, Debug)]
pub enum EngineError {
    /// Structurally invalid scoring rules or projection options.
    ///
    /// Raised when a ruleset is compiled or a config is validated, never while
    /// scoring an individual stat line.
    #[error("Invalid configuration for '{field}': {reason}")]
    Configuration { field: String, reason: String },

    /// Projection input the engine cannot produce an estimate for.
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    pub fn configuration(field: impl Into<String>, reason: impl Into<String>) -> Self {
        EngineError::Configuration {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_input(reason: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            reason: reason.into(),
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, EngineError::Configuration { .. })
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, EngineError::InvalidInput { .. })
    }
}
