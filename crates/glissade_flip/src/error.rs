//! FLIP engine errors

use glissade_core::DomError;
use thiserror::Error;

/// Errors raised by the FLIP engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlipError {
    /// An element must be attached to be re-appended or detached.
    #[error("element {key} has no parent and cannot be animated out")]
    DetachedElement { key: String },

    /// `replace` derives the shared parent from the first old element.
    #[error("replace needs at least one old element")]
    EmptyReplace,

    /// Two elements of one `read` batch share a key (strict validation).
    #[error("duplicate key {key} in a single read")]
    DuplicateKey { key: String },

    #[error(transparent)]
    Dom(DomError),
}

impl From<DomError> for FlipError {
    fn from(err: DomError) -> Self {
        match err {
            DomError::Detached { key } => FlipError::DetachedElement { key },
            other => FlipError::Dom(other),
        }
    }
}

/// Result type for FLIP operations
pub type Result<T> = std::result::Result<T, FlipError>;
