//! Deferred detachment of removed elements
//!
//! `remove` animates elements out and detaches them later. Each pending
//! detachment is a [`DetachTask`]; the [`RemovalHandle`] returned to the
//! caller observes and cancels them as a group.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use glissade_core::{element, Completion, Element, Scheduler, TimerId};

use crate::error::FlipError;

/// Progress of one deferred detachment
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetachStatus {
    /// Waiting for the timer or the animation to finish
    Pending,
    /// Removed from its parent
    Detached,
    /// The element had already lost its parent when the task ran
    Failed,
    /// Cancelled before it ran
    Cancelled,
}

/// One element waiting to be detached.
pub(crate) struct DetachTask<E: Element> {
    key: String,
    element: E,
    status: Cell<DetachStatus>,
    timer: Cell<Option<TimerId>>,
    error: RefCell<Option<FlipError>>,
    completion: Completion,
}

impl<E: Element> DetachTask<E> {
    pub(crate) fn new(key: String, element: E, completion: Completion) -> Rc<Self> {
        Rc::new(Self {
            key,
            element,
            status: Cell::new(DetachStatus::Pending),
            timer: Cell::new(None),
            error: RefCell::new(None),
            completion,
        })
    }

    pub(crate) fn key(&self) -> &str {
        &self.key
    }

    pub(crate) fn element(&self) -> &E {
        &self.element
    }

    pub(crate) fn status(&self) -> DetachStatus {
        self.status.get()
    }

    pub(crate) fn set_timer(&self, id: TimerId) {
        self.timer.set(Some(id));
    }

    /// Detach the element. Runs at most once.
    pub(crate) fn fire(&self) {
        if self.status.get() != DetachStatus::Pending {
            return;
        }
        self.timer.set(None);
        match element::detach(&self.element) {
            Ok(()) => {
                tracing::debug!(key = %self.key, "detached removed element");
                self.status.set(DetachStatus::Detached);
            }
            Err(err) => {
                tracing::warn!(key = %self.key, "removed element was already detached");
                self.status.set(DetachStatus::Failed);
                *self.error.borrow_mut() = Some(err.into());
            }
        }
        self.completion.resolve_one();
    }

    /// Drop the detachment if it has not run yet.
    pub(crate) fn cancel<S: Scheduler>(&self, scheduler: &S) -> bool {
        if self.status.get() != DetachStatus::Pending {
            return false;
        }
        if let Some(id) = self.timer.take() {
            scheduler.clear_timeout(id);
        }
        self.status.set(DetachStatus::Cancelled);
        self.completion.resolve_one();
        true
    }

    fn error(&self) -> Option<FlipError> {
        self.error.borrow().clone()
    }
}

/// Handle on the detachments scheduled by one `remove` or `replace` call.
///
/// Completes once every detachment has run, failed or been cancelled.
pub struct RemovalHandle<E: Element, S: Scheduler> {
    tasks: Vec<Rc<DetachTask<E>>>,
    completion: Completion,
    scheduler: S,
}

impl<E: Element, S: Scheduler> Clone for RemovalHandle<E, S> {
    fn clone(&self) -> Self {
        Self {
            tasks: self.tasks.clone(),
            completion: self.completion.clone(),
            scheduler: self.scheduler.clone(),
        }
    }
}

impl<E: Element, S: Scheduler> RemovalHandle<E, S> {
    pub(crate) fn new(tasks: Vec<Rc<DetachTask<E>>>, completion: Completion, scheduler: S) -> Self {
        Self {
            tasks,
            completion,
            scheduler,
        }
    }

    /// Whether every detachment has settled
    pub fn is_complete(&self) -> bool {
        self.completion.is_complete()
    }

    /// Number of detachments still waiting
    pub fn pending(&self) -> usize {
        self.completion.pending()
    }

    pub fn completion(&self) -> &Completion {
        &self.completion
    }

    /// Run `listener` once every detachment has settled
    pub fn on_complete<F: FnOnce() + 'static>(&self, listener: F) {
        self.completion.on_complete(listener);
    }

    /// Number of elements covered by this handle
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Keys of the elements detached so far, in call order
    pub fn detached(&self) -> Vec<String> {
        self.tasks
            .iter()
            .filter(|task| task.status() == DetachStatus::Detached)
            .map(|task| task.key().to_string())
            .collect()
    }

    /// Errors recorded by detachments that found their element detached
    pub fn errors(&self) -> Vec<FlipError> {
        self.tasks.iter().filter_map(|task| task.error()).collect()
    }

    /// Status of the detachment for `key`
    pub fn status(&self, key: &str) -> Option<DetachStatus> {
        self.tasks
            .iter()
            .find(|task| task.key() == key)
            .map(|task| task.status())
    }

    /// Status of the detachment for `element`
    pub fn status_of(&self, element: &E) -> Option<DetachStatus> {
        self.tasks
            .iter()
            .find(|task| task.element().same_node(element))
            .map(|task| task.status())
    }

    /// Cancel every pending detachment, returning how many were cancelled.
    ///
    /// The exit animations keep running; cancelled elements stay attached.
    pub fn cancel(&self) -> usize {
        self.tasks
            .iter()
            .filter(|task| task.cancel(&self.scheduler))
            .count()
    }
}

impl<E: Element, S: Scheduler> fmt::Debug for RemovalHandle<E, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemovalHandle")
            .field("tasks", &self.tasks.len())
            .field("pending", &self.pending())
            .finish()
    }
}
