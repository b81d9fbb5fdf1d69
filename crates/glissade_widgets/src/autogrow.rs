//! Autosizing textarea
//!
//! Grows the textarea to fit its content. Nothing happens until the first
//! focus; from then on input resizes immediately and window resizes are
//! debounced.

use glissade_core::{Element, Scheduler};

use crate::debounce::Debouncer;
use crate::widget::Widget;

/// Debounce window for window resizes
pub const RESIZE_DEBOUNCE_MS: u32 = 300;

pub struct AutoGrow<E: Element + 'static, S: Scheduler> {
    host: E,
    resize: Debouncer<S>,
    active: bool,
}

impl<E: Element + 'static, S: Scheduler> AutoGrow<E, S> {
    pub fn new(host: E, scheduler: S) -> Self {
        Self {
            host,
            resize: Debouncer::new(scheduler, RESIZE_DEBOUNCE_MS),
            active: false,
        }
    }

    /// Whether the textarea has been focused once
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn on_focus(&mut self) {
        if self.active {
            return;
        }
        self.autogrow();
        self.host.set_style("box-sizing", "border-box");
        self.active = true;
    }

    pub fn on_input(&self) {
        if self.active {
            self.autogrow();
        }
    }

    pub fn on_window_resize(&self) {
        if !self.active {
            return;
        }
        let host = self.host.clone();
        self.resize.call(move || fit(&host));
    }

    pub fn is_resize_pending(&self) -> bool {
        self.resize.is_pending()
    }

    pub fn autogrow(&self) {
        fit(&self.host);
    }
}

fn fit<E: Element>(host: &E) {
    host.set_style("height", "auto");
    let height = host.scroll_height();
    host.set_style("height", &format!("{height}px"));
}

impl<E: Element + 'static, S: Scheduler> Widget for AutoGrow<E, S> {
    type Element = E;

    fn host(&self) -> &E {
        &self.host
    }

    fn disconnect(&mut self) {
        self.resize.cancel();
    }
}
