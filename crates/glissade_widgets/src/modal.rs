//! Modal dialog
//!
//! The host wraps a `.modal` dialog. Closing plays the dialog's
//! `is-closing` CSS animation before the host is hidden. Host adapters
//! route clicks on [`Modal::close_button`] to [`Modal::close`].

use std::cell::RefCell;
use std::rc::Rc;

use glissade_core::{Completion, Element, Key, KeyboardEvent, Scheduler, TimerId};

use crate::error::{Result, WidgetError};
use crate::widget::Widget;

/// Time left for the closing animation before the host is hidden
pub const CLOSE_DELAY_MS: u32 = 500;

const DIALOG: &str = ".modal";
const CLOSING: &str = "is-closing";
const CLOSE_BUTTON: &str = "#btnClose";

struct PendingClose {
    timer: TimerId,
    completion: Completion,
}

pub struct Modal<E: Element + 'static, S: Scheduler> {
    host: E,
    scheduler: S,
    /// Dialog height in px, from the `height` attribute
    height: Option<String>,
    pending: Rc<RefCell<Option<PendingClose>>>,
}

impl<E: Element + 'static, S: Scheduler> Modal<E, S> {
    pub fn new(host: E, scheduler: S) -> Self {
        let height = host.attribute("height");
        Self {
            host,
            scheduler,
            height,
            pending: Rc::new(RefCell::new(None)),
        }
    }

    fn dialog(&self) -> Result<E> {
        self.host
            .query_selector(DIALOG)
            .ok_or_else(|| WidgetError::MissingPart {
                widget: "modal",
                selector: DIALOG.to_string(),
            })
    }

    /// The `#btnClose` element inside the host
    pub fn close_button(&self) -> Result<E> {
        self.host
            .query_selector(CLOSE_BUTTON)
            .ok_or_else(|| WidgetError::MissingPart {
                widget: "modal",
                selector: CLOSE_BUTTON.to_string(),
            })
    }

    pub fn is_open(&self) -> bool {
        self.host.computed_display() != "none"
    }

    pub fn is_closing(&self) -> bool {
        self.pending.borrow().is_some()
    }

    /// Show the modal, interrupting a close in progress.
    pub fn open(&mut self) -> Result<()> {
        let interrupted = self.pending.borrow_mut().take();
        if let Some(pending) = interrupted {
            self.scheduler.clear_timeout(pending.timer);
            self.dialog()?.remove_class(CLOSING);
            pending.completion.resolve_all();
        }
        self.host.remove_style("display");
        tracing::debug!("modal opened: {:?}", self.host);
        Ok(())
    }

    /// Start the closing animation; the host is hidden after
    /// [`CLOSE_DELAY_MS`].
    pub fn close(&mut self) -> Result<Completion> {
        let dialog = self.dialog()?;
        dialog.add_class(CLOSING);

        let previous = self.pending.borrow_mut().take();
        if let Some(previous) = previous {
            self.scheduler.clear_timeout(previous.timer);
            previous.completion.resolve_all();
        }

        let completion = Completion::new(1);
        let done = completion.clone();
        let host = self.host.clone();
        let pending = Rc::clone(&self.pending);
        let timer = self.scheduler.set_timeout(
            CLOSE_DELAY_MS,
            Box::new(move || {
                *pending.borrow_mut() = None;
                host.set_style("display", "none");
                dialog.remove_class(CLOSING);
                tracing::debug!("modal closed: {:?}", host);
                done.resolve_one();
            }),
        );
        *self.pending.borrow_mut() = Some(PendingClose {
            timer,
            completion: completion.clone(),
        });
        Ok(completion)
    }
}

impl<E: Element + 'static, S: Scheduler> Widget for Modal<E, S> {
    type Element = E;

    fn host(&self) -> &E {
        &self.host
    }

    fn connect(&mut self) -> Result<()> {
        self.host.set_style("display", "none");
        let dialog = self.dialog()?;
        if let Some(height) = &self.height {
            dialog.set_style("height", &format!("{height}px"));
        }
        Ok(())
    }

    fn disconnect(&mut self) {
        let pending = self.pending.borrow_mut().take();
        if let Some(pending) = pending {
            self.scheduler.clear_timeout(pending.timer);
            pending.completion.resolve_all();
        }
    }

    fn handle_key(&mut self, event: &mut KeyboardEvent) -> Result<bool> {
        if event.key != Key::Escape {
            return Ok(false);
        }
        event.prevent_default();
        self.close()?;
        Ok(true)
    }
}
