//! Error types for the board engine

use std::path::PathBuf;
use thiserror::Error;

/// Result type for board operations
pub type Result<T> = std::result::Result<T, BoardError>;

/// Generic message shown to the user for any persistence failure.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// Errors that can occur in board operations
#[derive(Debug, Error)]
pub enum BoardError {
    /// Board not found
    #[error("board not found: {id}")]
    BoardNotFound { id: String },

    /// Column not found
    #[error("column not found: {id}")]
    ColumnNotFound { id: String },

    /// Task not found
    #[error("task not found: {id}")]
    TaskNotFound { id: String },

    /// Column has tasks and cannot be deleted
    #[error("column '{id}' has {count} tasks and cannot be deleted")]
    ColumnNotEmpty { id: String, count: usize },

    /// Target column belongs to a different board than the task
    #[error("column '{column}' does not belong to board '{board}'")]
    CrossBoardMove { board: String, column: String },

    /// Missing required field
    #[error("missing required field: {field}")]
    MissingField { field: String },

    /// Invalid field value
    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    /// No signed-in user; reads and writes are gated on presence
    #[error("no user is signed in")]
    Unauthenticated,

    /// Lock is held by another process
    #[error("lock busy - another operation in progress")]
    LockBusy { path: PathBuf },

    /// Backend store rejected or failed the request
    #[error("storage error: {message}")]
    Storage { message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BoardError {
    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Validation errors are raised before any store call and can be shown inline.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::MissingField { .. } | Self::InvalidValue { .. })
    }

    /// Failures of the store itself rather than of the request
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            Self::LockBusy { .. } | Self::Storage { .. } | Self::Io(_) | Self::Json(_)
        )
    }

    /// Text suitable for a toast or inline form message.
    ///
    /// Persistence failures collapse into a single generic message and the
    /// cause is only visible in the logs; everything else is shown verbatim.
    pub fn user_message(&self) -> String {
        if self.is_persistence() {
            GENERIC_FAILURE_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }
}
