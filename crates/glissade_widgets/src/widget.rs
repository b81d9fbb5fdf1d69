//! Base widget trait
//!
//! Widgets wrap a host element handle instead of extending a host element
//! type. Registering them with a host component registry is left to a thin
//! adapter that forwards lifecycle and keyboard events here.

use glissade_core::{Element, KeyboardEvent};

use crate::error::Result;

/// Base trait for all widgets
pub trait Widget {
    type Element: Element;

    /// The element this widget is attached to
    fn host(&self) -> &Self::Element;

    /// The host was inserted into the document
    fn connect(&mut self) -> Result<()> {
        Ok(())
    }

    /// The host left the document; pending timers are dropped
    fn disconnect(&mut self) {}

    /// Handle a key press. Returns `true` when the widget consumed it.
    fn handle_key(&mut self, _event: &mut KeyboardEvent) -> Result<bool> {
        Ok(false)
    }
}
