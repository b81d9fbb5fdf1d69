//! Host animation seam
//!
//! Mirrors `Element.animate()`: the host interpolates the keyframes on its
//! own timeline and hands back a playback handle.

use crate::keyframe::{AnimationOptions, Keyframes};

/// Callback run when a playback finishes
pub type FinishCallback = Box<dyn FnOnce()>;

/// A running animation on the host
pub trait Playback: Clone {
    /// Stop the animation and drop its effect. Finish callbacks of a
    /// cancelled playback never run.
    fn cancel(&self);

    /// Run `callback` when the playback finishes; immediately if it already
    /// has.
    fn on_finish(&self, callback: FinishCallback);

    fn is_finished(&self) -> bool;
}

/// Elements that can run keyframe animations
pub trait Animate {
    type Playback: Playback;

    fn animate(&self, keyframes: &Keyframes, options: &AnimationOptions) -> Self::Playback;
}
