//! Animation presets for FLIP transitions
//!
//! Pre-built keyframe lists for the three shapes of a layout transition:
//! an element appearing, an element moving from its previous box, and an
//! element leaving.

use crate::keyframe::{Keyframe, Keyframes, Transform};

/// Pre-built keyframes for layout transitions
pub struct AnimationPreset;

impl AnimationPreset {
    /// Enter from `offset` pixels above while fading in
    pub fn enter_from_above(offset: f32) -> Keyframes {
        Keyframes::new(
            Keyframe::transform(Transform::translate(0.0, -offset)).with_opacity(0.0),
            Keyframe::transform(Transform::IDENTITY).with_opacity(1.0),
        )
    }

    /// Start at the inverted transform and play back to identity
    pub fn invert(from: Transform) -> Keyframes {
        Keyframes::new(
            Keyframe::transform(from),
            Keyframe::transform(Transform::IDENTITY),
        )
    }

    /// Hold the previous position, then rise `offset` pixels while fading out
    pub fn exit_upward(dx: f32, dy: f32, offset: f32) -> Keyframes {
        Keyframes::new(
            Keyframe::transform(Transform::translate(dx, dy)).with_opacity(1.0),
            Keyframe::transform(Transform::translate(dx, dy - offset)).with_opacity(0.0),
        )
    }
}
