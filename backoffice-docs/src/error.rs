//! Error types for document building and rendering

use std::fmt;
use thiserror::Error;

/// Result type for document operations
pub type Result<T> = std::result::Result<T, DocumentError>;

/// One failed validation rule, addressed by a dotted field path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

impl FieldIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Errors that can occur while building or rendering a document
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Input failed validation; nothing was laid out
    #[error("invalid document: {}", join_issues(.issues))]
    Validation { issues: Vec<FieldIssue> },

    /// The block sequence or settings cannot be laid out
    #[error("layout error: {message}")]
    Layout { message: String },

    /// PDF serialization failed
    #[error("PDF error: {message}")]
    Pdf { message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl DocumentError {
    /// Create a layout error
    pub fn layout(message: impl Into<String>) -> Self {
        Self::Layout {
            message: message.into(),
        }
    }

    /// Create a PDF error
    pub fn pdf(message: impl Into<String>) -> Self {
        Self::Pdf {
            message: message.into(),
        }
    }

    /// Validation issues, empty for other errors
    pub fn issues(&self) -> &[FieldIssue] {
        match self {
            Self::Validation { issues } => issues,
            _ => &[],
        }
    }
}

impl From<lopdf::Error> for DocumentError {
    fn from(e: lopdf::Error) -> Self {
        Self::pdf(e.to_string())
    }
}
