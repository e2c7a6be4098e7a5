//! Error types for touchline.
//!
//! Uses thiserror for derive macros. Every variant carries a rendered message
//! so errors can be cached by the query service and handed out again.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for touchline operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TouchlineError {
    /// User provided invalid arguments.
    #[error("{0}")]
    UserError(String),

    /// Configuration file could not be read, parsed or validated.
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Git operation failed.
    #[error("Git operation failed: {0}")]
    GitError(String),

    /// The diff text could not be obtained.
    #[error("Diff source unavailable: {0}")]
    DiffSourceError(String),
}

impl TouchlineError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            TouchlineError::UserError(_) => exit_codes::USER_ERROR,
            TouchlineError::ConfigError(_) => exit_codes::USER_ERROR,
            TouchlineError::GitError(_) => exit_codes::GIT_FAILURE,
            TouchlineError::DiffSourceError(_) => exit_codes::DIFF_SOURCE_FAILURE,
        }
    }
}

/// Result type alias for touchline operations.
pub type Result<T> = std::result::Result<T, TouchlineError>;
