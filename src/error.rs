//! Structured error types for store and controller operations.

use serde::Serialize;
use thiserror::Error;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation errors
    EmptyTitle,

    // Not found errors
    TaskNotFound,

    // Internal errors
    StorageError,
    ConfigError,
}

/// Errors raised by the store, the controller and configuration loading.
#[derive(Debug, Error)]
pub enum TodoError {
    #[error("{message}")]
    Validation {
        code: ErrorCode,
        field: &'static str,
        message: String,
    },

    #[error("task not found: {0}")]
    TaskNotFound(i64),

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl TodoError {
    // Convenience constructors

    pub fn empty_title(field: &'static str) -> Self {
        Self::Validation {
            code: ErrorCode::EmptyTitle,
            field,
            message: "The task title cannot be empty.".to_string(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            TodoError::Validation { code, .. } => *code,
            TodoError::TaskNotFound(_) => ErrorCode::TaskNotFound,
            TodoError::Storage(_) | TodoError::Io(_) => ErrorCode::StorageError,
            TodoError::Config(_) => ErrorCode::ConfigError,
        }
    }

    /// Input field a validation error refers to.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            TodoError::Validation { field, .. } => Some(*field),
            _ => None,
        }
    }

    /// Validation errors are recovered locally; everything else is a fault.
    pub fn is_validation(&self) -> bool {
        matches!(self, TodoError::Validation { .. })
    }
}

/// Result type for store and controller operations.
pub type TodoResult<T> = std::result::Result<T, TodoError>;
