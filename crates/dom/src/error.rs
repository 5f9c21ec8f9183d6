//! Error types for DOM operations
//!
//! Simple, flat error hierarchy. A query that finds nothing is not an error;
//! only malformed input and dangling handles are.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DomError>;

#[derive(Debug, Error)]
pub enum DomError {
    #[error("Invalid selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Invalid node type: expected {expected}, got {actual}")]
    InvalidNodeType { expected: String, actual: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DomError {
    pub(crate) fn invalid_selector(selector: &str, reason: impl ToString) -> Self {
        DomError::InvalidSelector {
            selector: selector.to_string(),
            reason: reason.to_string(),
        }
    }
}
