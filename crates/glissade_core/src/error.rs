//! Host tree errors

use thiserror::Error;

/// Errors raised while manipulating the host element tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    /// The element has no parent to re-append to or detach from.
    #[error("element {key} is detached from the document")]
    Detached { key: String },

    /// `remove_child` was called with a node that is not a child.
    #[error("element {key} is not a child of this parent")]
    NotAChild { key: String },

    /// A selector or id lookup found nothing.
    #[error("no element matches {0}")]
    NotFound(String),
}

/// Result type for host tree operations
pub type Result<T> = std::result::Result<T, DomError>;
