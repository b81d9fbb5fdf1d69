//! Widget errors

use thiserror::Error;

/// Errors raised while wiring a widget to its host markup
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WidgetError {
    /// A required descendant of the host is missing.
    #[error("{widget}: no element matches {selector}")]
    MissingPart {
        widget: &'static str,
        selector: String,
    },

    #[error("tab {index} has no href naming its panel")]
    MissingHref { index: usize },

    #[error("no panel with id {id}")]
    MissingPanel { id: String },

    #[error("tab list has no tabs")]
    NoTabs,

    #[error("tab index {index} out of range ({len} tabs)")]
    TabOutOfRange { index: usize, len: usize },
}

/// Result type for widget operations
pub type Result<T> = std::result::Result<T, WidgetError>;
