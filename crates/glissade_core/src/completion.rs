//! Completion signal for deferred work
//!
//! Transitions return immediately and finish later on the host event loop.
//! A [`Completion`] counts the outstanding pieces of work and runs its
//! listeners once the count reaches zero.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

type Listener = Box<dyn FnOnce()>;

struct CompletionState {
    pending: usize,
    listeners: Vec<Listener>,
}

/// Shared handle resolved when all deferred work has run.
#[derive(Clone)]
pub struct Completion {
    state: Rc<RefCell<CompletionState>>,
}

impl Completion {
    /// A completion waiting on `pending` pieces of work.
    pub fn new(pending: usize) -> Self {
        Self {
            state: Rc::new(RefCell::new(CompletionState {
                pending,
                listeners: Vec::new(),
            })),
        }
    }

    /// A completion with nothing left to wait for.
    pub fn resolved() -> Self {
        Self::new(0)
    }

    /// Number of pieces of work still outstanding.
    pub fn pending(&self) -> usize {
        self.state.borrow().pending
    }

    pub fn is_complete(&self) -> bool {
        self.pending() == 0
    }

    /// Mark one piece of work as done.
    ///
    /// Listeners run on the transition to zero, never again afterwards.
    pub fn resolve_one(&self) {
        let listeners = {
            let mut state = self.state.borrow_mut();
            if state.pending == 0 {
                return;
            }
            state.pending -= 1;
            if state.pending > 0 {
                return;
            }
            std::mem::take(&mut state.listeners)
        };
        for listener in listeners {
            listener();
        }
    }

    /// Resolve everything that is still outstanding.
    pub fn resolve_all(&self) {
        let listeners = {
            let mut state = self.state.borrow_mut();
            if state.pending == 0 {
                return;
            }
            state.pending = 0;
            std::mem::take(&mut state.listeners)
        };
        for listener in listeners {
            listener();
        }
    }

    /// Run `listener` once complete; immediately if already complete.
    pub fn on_complete<F: FnOnce() + 'static>(&self, listener: F) {
        if self.is_complete() {
            listener();
            return;
        }
        self.state.borrow_mut().listeners.push(Box::new(listener));
    }
}

impl fmt::Debug for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Completion")
            .field("pending", &self.pending())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn listeners_run_once_when_count_reaches_zero() {
        let completion = Completion::new(2);
        let fired = Rc::new(Cell::new(0));
        let counter = fired.clone();
        completion.on_complete(move || counter.set(counter.get() + 1));

        completion.resolve_one();
        assert_eq!(fired.get(), 0);
        assert!(!completion.is_complete());

        completion.resolve_one();
        assert_eq!(fired.get(), 1);
        assert!(completion.is_complete());

        completion.resolve_one();
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn late_listener_runs_immediately() {
        let completion = Completion::resolved();
        let fired = Rc::new(Cell::new(false));
        let flag = fired.clone();
        completion.on_complete(move || flag.set(true));
        assert!(fired.get());
    }

    #[test]
    fn resolve_all_short_circuits() {
        let completion = Completion::new(3);
        completion.resolve_all();
        assert_eq!(completion.pending(), 0);
    }
}
