//! Recorded animations
//!
//! `animate` does not interpolate anything eagerly. It records the request
//! and schedules its finish on the document's timer queue; the effect at
//! any instant is sampled on demand.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use glissade_animation::{
    Animate, AnimationOptions, FinishCallback, Keyframe, Keyframes, Playback, TimerQueue,
};
use glissade_core::{Element, Scheduler, TimerId};

use crate::document::NodeId;
use crate::element::HeadlessElement;

#[derive(Default)]
struct PlaybackState {
    finished: bool,
    cancelled: bool,
    callbacks: Vec<FinishCallback>,
    timer: Option<TimerId>,
}

/// Playback handle of a headless animation
#[derive(Clone)]
pub struct HeadlessPlayback {
    state: Rc<RefCell<PlaybackState>>,
    timers: TimerQueue,
}

impl HeadlessPlayback {
    fn start(timers: &TimerQueue, total_ms: u32) -> Self {
        let playback = Self {
            state: Rc::new(RefCell::new(PlaybackState::default())),
            timers: timers.clone(),
        };
        let finishing = playback.clone();
        let id = timers.set_timeout(total_ms, Box::new(move || finishing.finish()));
        playback.state.borrow_mut().timer = Some(id);
        playback
    }

    fn finish(&self) {
        let callbacks = {
            let mut state = self.state.borrow_mut();
            if state.finished || state.cancelled {
                return;
            }
            state.finished = true;
            state.timer = None;
            std::mem::take(&mut state.callbacks)
        };
        for callback in callbacks {
            callback();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.state.borrow().cancelled
    }
}

impl Playback for HeadlessPlayback {
    fn cancel(&self) {
        let timer = {
            let mut state = self.state.borrow_mut();
            if state.finished || state.cancelled {
                return;
            }
            state.cancelled = true;
            state.callbacks.clear();
            state.timer.take()
        };
        if let Some(id) = timer {
            self.timers.clear_timeout(id);
        }
    }

    fn on_finish(&self, callback: FinishCallback) {
        {
            let mut state = self.state.borrow_mut();
            if state.cancelled {
                return;
            }
            if !state.finished {
                state.callbacks.push(callback);
                return;
            }
        }
        callback();
    }

    fn is_finished(&self) -> bool {
        self.state.borrow().finished
    }
}

impl fmt::Debug for HeadlessPlayback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("HeadlessPlayback")
            .field("finished", &state.finished)
            .field("cancelled", &state.cancelled)
            .finish()
    }
}

/// One `animate` call
#[derive(Clone, Debug)]
pub struct AnimationRecord {
    pub node: NodeId,
    /// Key of the element when the animation started
    pub key: Option<String>,
    pub keyframes: Keyframes,
    pub options: AnimationOptions,
    pub started_ms: u64,
    pub playback: HeadlessPlayback,
}

impl AnimationRecord {
    pub fn start(&self) -> Keyframe {
        self.keyframes.first().copied().unwrap_or_default()
    }

    pub fn end(&self) -> Keyframe {
        self.keyframes.last().copied().unwrap_or_default()
    }

    pub fn is_cancelled(&self) -> bool {
        self.playback.is_cancelled()
    }

    pub fn is_finished(&self) -> bool {
        self.playback.is_finished()
    }

    /// Effect at virtual time `now_ms`
    pub fn sample(&self, now_ms: u64) -> Option<Keyframe> {
        if self.is_cancelled() {
            return None;
        }
        let elapsed = now_ms.saturating_sub(self.started_ms);
        self.keyframes.sample_at(&self.options, elapsed)
    }
}

impl Animate for HeadlessElement {
    type Playback = HeadlessPlayback;

    fn animate(&self, keyframes: &Keyframes, options: &AnimationOptions) -> HeadlessPlayback {
        let document = self.document();
        let playback = HeadlessPlayback::start(&document.timers, options.total_ms());
        let record = AnimationRecord {
            node: self.node_id(),
            key: self.key(),
            keyframes: keyframes.clone(),
            options: *options,
            started_ms: document.timers.now_ms(),
            playback: playback.clone(),
        };
        tracing::trace!(key = ?record.key, duration_ms = options.duration_ms, "animate");
        document.state.borrow_mut().animations.push(record);
        playback
    }
}
