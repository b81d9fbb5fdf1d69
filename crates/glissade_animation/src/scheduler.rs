//! Virtual-time timer queue
//!
//! A deterministic [`Scheduler`] driven by an explicit clock. Nothing fires
//! until [`TimerQueue::advance`] moves time forward, which makes deferred
//! work (detachments, debounced handlers, modal close delays) testable to
//! the millisecond. The headless host uses it as its event loop.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use glissade_core::{Scheduler, TimerCallback, TimerId};
use slotmap::SlotMap;

/// Upper bound on callbacks run by a single `run_until_idle`.
const IDLE_FIRE_LIMIT: usize = 10_000;

struct Timer {
    deadline_ms: u64,
    /// Insertion order, breaks ties between equal deadlines
    seq: u64,
    callback: TimerCallback,
}

#[derive(Default)]
struct QueueState {
    timers: SlotMap<TimerId, Timer>,
    now_ms: u64,
    next_seq: u64,
}

impl QueueState {
    /// Pop the earliest timer due at or before `limit_ms`.
    fn pop_due(&mut self, limit_ms: u64) -> Option<(TimerId, u64, TimerCallback)> {
        let (id, deadline) = self
            .timers
            .iter()
            .filter(|(_, timer)| timer.deadline_ms <= limit_ms)
            .min_by_key(|(_, timer)| (timer.deadline_ms, timer.seq))
            .map(|(id, timer)| (id, timer.deadline_ms))?;
        let timer = self.timers.remove(id)?;
        self.now_ms = self.now_ms.max(deadline);
        Some((id, deadline, timer.callback))
    }
}

/// Shared handle to a virtual-time timer queue
#[derive(Clone, Default)]
pub struct TimerQueue {
    state: Rc<RefCell<QueueState>>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds
    pub fn now_ms(&self) -> u64 {
        self.state.borrow().now_ms
    }

    /// Number of timers waiting to fire
    pub fn pending_count(&self) -> usize {
        self.state.borrow().timers.len()
    }

    /// Deadline of the next timer to fire
    pub fn next_deadline(&self) -> Option<u64> {
        self.state
            .borrow()
            .timers
            .values()
            .map(|timer| timer.deadline_ms)
            .min()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.state.borrow().timers.contains_key(id)
    }

    /// Move the clock forward by `ms`, firing due timers in deadline order.
    ///
    /// Timers scheduled by a callback fire in the same call if they fall due
    /// within the window. Returns the number of callbacks run.
    pub fn advance(&self, ms: u64) -> usize {
        let target = self.now_ms().saturating_add(ms);
        let mut fired = 0;
        loop {
            // The borrow must end before the callback runs: callbacks
            // schedule and cancel timers on this queue.
            let due = self.state.borrow_mut().pop_due(target);
            let Some((id, deadline, callback)) = due else {
                break;
            };
            tracing::trace!(?id, deadline, "timer fired");
            callback();
            fired += 1;
        }
        let mut state = self.state.borrow_mut();
        state.now_ms = state.now_ms.max(target);
        fired
    }

    /// Fire timers until none remain, jumping the clock to each deadline.
    pub fn run_until_idle(&self) -> usize {
        let mut fired = 0;
        while let Some(deadline) = self.next_deadline() {
            if fired >= IDLE_FIRE_LIMIT {
                tracing::warn!(fired, "timer queue still busy, giving up");
                break;
            }
            let wait = deadline.saturating_sub(self.now_ms());
            fired += self.advance(wait);
        }
        fired
    }
}

impl Scheduler for TimerQueue {
    fn set_timeout(&self, delay_ms: u32, callback: TimerCallback) -> TimerId {
        let mut state = self.state.borrow_mut();
        let deadline_ms = state.now_ms + delay_ms as u64;
        let seq = state.next_seq;
        state.next_seq += 1;
        state.timers.insert(Timer {
            deadline_ms,
            seq,
            callback,
        })
    }

    fn clear_timeout(&self, id: TimerId) -> bool {
        self.state.borrow_mut().timers.remove(id).is_some()
    }
}

impl fmt::Debug for TimerQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerQueue")
            .field("now_ms", &self.now_ms())
            .field("pending", &self.pending_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, TimerQueue) {
        (Rc::new(RefCell::new(Vec::new())), TimerQueue::new())
    }

    #[test]
    fn fires_in_deadline_then_insertion_order() {
        let (log, queue) = recorder();
        for (delay, name) in [(200, "late"), (100, "first"), (100, "second")] {
            let log = log.clone();
            queue.set_timeout(delay, Box::new(move || log.borrow_mut().push(name)));
        }

        assert_eq!(queue.advance(99), 0);
        assert!(log.borrow().is_empty());

        assert_eq!(queue.advance(1), 2);
        assert_eq!(*log.borrow(), vec!["first", "second"]);
        assert_eq!(queue.now_ms(), 100);

        assert_eq!(queue.advance(100), 1);
        assert_eq!(*log.borrow(), vec!["first", "second", "late"]);
    }

    #[test]
    fn cleared_timer_never_fires() {
        let queue = TimerQueue::new();
        let fired = Rc::new(Cell::new(false));
        let flag = fired.clone();
        let id = queue.set_timeout(10, Box::new(move || flag.set(true)));

        assert!(queue.is_pending(id));
        assert!(queue.clear_timeout(id));
        assert!(!queue.clear_timeout(id));
        queue.advance(50);
        assert!(!fired.get());
    }

    #[test]
    fn callbacks_can_schedule_follow_ups() {
        let (log, queue) = recorder();
        let inner_queue = queue.clone();
        let inner_log = log.clone();
        queue.set_timeout(
            10,
            Box::new(move || {
                inner_log.borrow_mut().push("outer");
                let log = inner_log.clone();
                inner_queue.set_timeout(5, Box::new(move || log.borrow_mut().push("inner")));
            }),
        );

        assert_eq!(queue.advance(20), 2);
        assert_eq!(*log.borrow(), vec!["outer", "inner"]);
        assert_eq!(queue.now_ms(), 20);
    }

    #[test]
    fn run_until_idle_jumps_to_each_deadline() {
        let queue = TimerQueue::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        for delay in [300, 100] {
            let seen = seen.clone();
            let clock = queue.clone();
            queue.set_timeout(delay, Box::new(move || seen.borrow_mut().push(clock.now_ms())));
        }
        assert_eq!(queue.run_until_idle(), 2);
        assert_eq!(*seen.borrow(), vec![100, 300]);
        assert_eq!(queue.pending_count(), 0);
        assert_eq!(queue.next_deadline(), None);
    }
}
