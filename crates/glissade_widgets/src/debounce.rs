//! Debounced calls
//!
//! Only the last call of a burst runs, `delay_ms` after the burst ends.

use std::cell::Cell;
use std::rc::Rc;

use glissade_core::{Scheduler, TimerId};

/// Collapses bursts of calls into one deferred call
pub struct Debouncer<S: Scheduler> {
    scheduler: S,
    delay_ms: u32,
    pending: Rc<Cell<Option<TimerId>>>,
}

impl<S: Scheduler> Debouncer<S> {
    pub fn new(scheduler: S, delay_ms: u32) -> Self {
        Self {
            scheduler,
            delay_ms,
            pending: Rc::new(Cell::new(None)),
        }
    }

    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    /// Schedule `f`, replacing any call still waiting.
    pub fn call<F: FnOnce() + 'static>(&self, f: F) {
        self.cancel();
        let pending = Rc::clone(&self.pending);
        let id = self.scheduler.set_timeout(
            self.delay_ms,
            Box::new(move || {
                pending.set(None);
                f();
            }),
        );
        self.pending.set(Some(id));
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get().is_some()
    }

    /// Drop the waiting call, if any.
    pub fn cancel(&self) -> bool {
        match self.pending.take() {
            Some(id) => self.scheduler.clear_timeout(id),
            None => false,
        }
    }
}
