//! One-shot timer seam
//!
//! The equivalent of `setTimeout`/`clearTimeout`. Hosts run callbacks on
//! their own event loop; nothing here blocks.

use slotmap::new_key_type;

new_key_type! {
    /// Handle of a scheduled one-shot callback
    pub struct TimerId;
}

/// Callback run when a timer fires
pub type TimerCallback = Box<dyn FnOnce()>;

/// Schedules one-shot delayed callbacks on the host event loop.
///
/// Implementations are shared handles: cloning yields another handle to the
/// same queue, so deferred work can keep one.
pub trait Scheduler: Clone {
    /// Run `callback` once after `delay_ms` milliseconds.
    fn set_timeout(&self, delay_ms: u32, callback: TimerCallback) -> TimerId;

    /// Cancel a pending timer. Returns false when it already fired or was
    /// cancelled.
    fn clear_timeout(&self, id: TimerId) -> bool;
}
