//! Glissade Widgets
//!
//! Transition helpers and small widgets built on the host seams of
//! `glissade_core`.
//!
//! - [`slide`]: slide up / down / toggle through height transitions
//! - [`Debouncer`]: collapse bursts of calls
//! - [`Loader`]: loading indicator markup
//! - [`Modal`]: dialog with a closing animation and Escape handling
//! - [`Tabs`]: WAI-ARIA tabs with keyboard navigation
//! - [`AutoGrow`]: textarea that fits its content

pub mod autogrow;
pub mod debounce;
pub mod error;
pub mod loader;
pub mod modal;
pub mod slide;
pub mod tabs;
pub mod widget;

pub use autogrow::AutoGrow;
pub use debounce::Debouncer;
pub use error::{Result, WidgetError};
pub use loader::{Loader, LoaderKind};
pub use modal::Modal;
pub use slide::{slide_down, slide_toggle, slide_up};
pub use tabs::Tabs;
pub use widget::Widget;
