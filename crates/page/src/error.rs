//! Error types for page objects
//!
//! Only construction and opt-in assertions fail. Resolving a query never
//! does: a missing element is `None`, a missing list is empty.

use dom::DomError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PageError>;

#[derive(Debug, Error)]
pub enum PageError {
    #[error("Cannot specify an empty selector")]
    EmptySelector,

    #[error("Selector `{selector}` is invalid: {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("{message} >> Tried selector `{description}`")]
    ElementMissing {
        message: String,
        description: String,
        /// JSON snapshot of the root the path was resolved against
        snapshot: Option<String>,
    },

    #[error(transparent)]
    Dom(#[from] DomError),
}

impl PageError {
    /// Lift a selector parse failure into a construction error, keeping the
    /// parser's message.
    pub(crate) fn from_selector_error(err: DomError) -> Self {
        match err {
            DomError::InvalidSelector { selector, reason } => {
                PageError::InvalidSelector { selector, reason }
            }
            other => PageError::Dom(other),
        }
    }
}
