//! Transform keyframes
//!
//! The model handed to a host's keyframe animation primitive: a short list
//! of keyframes over `transform` and `opacity`, plus timing options
//! (duration, easing, fill mode, delay). Keyframes are evenly spaced over
//! the iteration, as in the Web Animations API.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::easing::Easing;

// ============================================================================
// Transform
// ============================================================================

/// A translate-then-scale transform, relative to the element's own box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// Translation X in pixels
    pub translate_x: f32,
    /// Translation Y in pixels
    pub translate_y: f32,
    /// Scale X factor
    pub scale_x: f32,
    /// Scale Y factor
    pub scale_y: f32,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        translate_x: 0.0,
        translate_y: 0.0,
        scale_x: 1.0,
        scale_y: 1.0,
    };

    /// Pure translation
    pub const fn translate(x: f32, y: f32) -> Self {
        Self {
            translate_x: x,
            translate_y: y,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }

    /// Builder: set scale x and y separately
    pub const fn with_scale(mut self, x: f32, y: f32) -> Self {
        self.scale_x = x;
        self.scale_y = y;
        self
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Interpolate component-wise
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            translate_x: lerp(self.translate_x, other.translate_x, t),
            translate_y: lerp(self.translate_y, other.translate_y, t),
            scale_x: lerp(self.scale_x, other.scale_x, t),
            scale_y: lerp(self.scale_y, other.scale_y, t),
        }
    }

    /// CSS `transform` value. Identity renders as `none`.
    pub fn css(&self) -> String {
        if self.is_identity() {
            return "none".to_string();
        }
        let translate = format!("translate({}px, {}px)", self.translate_x, self.translate_y);
        if self.scale_x == 1.0 && self.scale_y == 1.0 {
            translate
        } else {
            format!("{translate} scale({}, {})", self.scale_x, self.scale_y)
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Helper to interpolate optional values
fn lerp_opt(a: Option<f32>, b: Option<f32>, t: f32) -> Option<f32> {
    match (a, b) {
        (Some(a), Some(b)) => Some(lerp(a, b, t)),
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    }
}

// ============================================================================
// Keyframes
// ============================================================================

/// Properties at one keyframe. `None` leaves the property untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Keyframe {
    pub transform: Option<Transform>,
    /// Opacity (0.0 to 1.0)
    pub opacity: Option<f32>,
}

impl Keyframe {
    /// Keyframe with only a transform set
    pub fn transform(transform: Transform) -> Self {
        Self {
            transform: Some(transform),
            opacity: None,
        }
    }

    /// Keyframe with only opacity set
    pub fn opacity(value: f32) -> Self {
        Self {
            transform: None,
            opacity: Some(value),
        }
    }

    /// Builder: set opacity
    pub fn with_opacity(mut self, value: f32) -> Self {
        self.opacity = Some(value);
        self
    }

    /// Interpolate between two keyframes
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        let transform = match (self.transform, other.transform) {
            (Some(a), Some(b)) => Some(a.lerp(&b, t)),
            (a, b) => a.or(b),
        };
        Self {
            transform,
            opacity: lerp_opt(self.opacity, other.opacity, t),
        }
    }

    /// Resolved transform (identity if not set)
    pub fn resolved_transform(&self) -> Transform {
        self.transform.unwrap_or_default()
    }

    /// Resolved opacity (1.0 if not set)
    pub fn resolved_opacity(&self) -> f32 {
        self.opacity.unwrap_or(1.0)
    }

    /// CSS declarations for this keyframe, in a stable order.
    pub fn css_declarations(&self) -> Vec<(&'static str, String)> {
        let mut declarations = Vec::with_capacity(2);
        if let Some(transform) = self.transform {
            declarations.push(("transform", transform.css()));
        }
        if let Some(opacity) = self.opacity {
            declarations.push(("opacity", opacity.to_string()));
        }
        declarations
    }

    /// Keyframe rendered as `transform: ...; opacity: ...`.
    pub fn css(&self) -> String {
        self.css_declarations()
            .into_iter()
            .map(|(property, value)| format!("{property}: {value}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// An ordered keyframe list; most transitions have exactly two.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Keyframes(SmallVec<[Keyframe; 2]>);

impl Keyframes {
    /// Two-keyframe `from -> to` list
    pub fn new(from: Keyframe, to: Keyframe) -> Self {
        let mut frames = SmallVec::new();
        frames.push(from);
        frames.push(to);
        Self(frames)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<&Keyframe> {
        self.0.first()
    }

    pub fn last(&self) -> Option<&Keyframe> {
        self.0.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Keyframe> {
        self.0.iter()
    }

    /// Sample at iteration progress (0.0 to 1.0).
    ///
    /// Easing shapes the whole iteration; keyframes are then interpolated
    /// linearly between their evenly spaced offsets.
    pub fn sample(&self, progress: f32, easing: Easing) -> Keyframe {
        match self.0.len() {
            0 => Keyframe::default(),
            1 => self.0[0],
            n => {
                let eased = easing.apply(progress.clamp(0.0, 1.0));
                let position = eased * (n - 1) as f32;
                let index = (position.floor() as usize).min(n - 2);
                let local = position - index as f32;
                self.0[index].lerp(&self.0[index + 1], local)
            }
        }
    }

    /// Visual effect `elapsed_ms` after the animation started, honoring the
    /// delay and fill mode. `None` means the animation has no effect.
    pub fn sample_at(&self, options: &AnimationOptions, elapsed_ms: u64) -> Option<Keyframe> {
        let delay = options.delay_ms as u64;
        if elapsed_ms < delay {
            return match options.fill {
                FillMode::Backwards | FillMode::Both => self.first().copied(),
                _ => None,
            };
        }
        let active = elapsed_ms - delay;
        if active >= options.duration_ms as u64 {
            return match options.fill {
                FillMode::Forwards | FillMode::Both => self.last().copied(),
                _ => None,
            };
        }
        let progress = active as f32 / options.duration_ms as f32;
        Some(self.sample(progress, options.easing))
    }
}

impl FromIterator<Keyframe> for Keyframes {
    fn from_iter<I: IntoIterator<Item = Keyframe>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ============================================================================
// Timing
// ============================================================================

/// Fill mode determines the animation state before/after playback
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FillMode {
    /// No fill - reset to initial state after animation
    #[default]
    None,
    /// Hold the final keyframe value after animation completes
    Forwards,
    /// Apply the first keyframe value before animation starts
    Backwards,
    /// Apply both forwards and backwards fill
    Both,
}

impl FillMode {
    pub fn css(&self) -> &'static str {
        match self {
            FillMode::None => "none",
            FillMode::Forwards => "forwards",
            FillMode::Backwards => "backwards",
            FillMode::Both => "both",
        }
    }
}

/// Timing options passed alongside keyframes
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationOptions {
    pub duration_ms: u32,
    pub easing: Easing,
    pub fill: FillMode,
    pub delay_ms: u32,
}

impl AnimationOptions {
    pub fn new(duration_ms: u32) -> Self {
        Self {
            duration_ms,
            easing: Easing::Linear,
            fill: FillMode::None,
            delay_ms: 0,
        }
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn fill(mut self, fill: FillMode) -> Self {
        self.fill = fill;
        self
    }

    pub fn delay(mut self, delay_ms: u32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Delay plus duration
    pub fn total_ms(&self) -> u32 {
        self.delay_ms.saturating_add(self.duration_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_css() {
        assert_eq!(Transform::IDENTITY.css(), "none");
        assert_eq!(Transform::translate(0.0, -30.0).css(), "translate(0px, -30px)");
        assert_eq!(
            Transform::translate(12.5, -4.0).with_scale(2.0, 0.5).css(),
            "translate(12.5px, -4px) scale(2, 0.5)"
        );
    }

    #[test]
    fn keyframe_css_lists_transform_then_opacity() {
        let kf = Keyframe::transform(Transform::translate(0.0, -30.0)).with_opacity(0.0);
        assert_eq!(kf.css(), "transform: translate(0px, -30px); opacity: 0");
        assert_eq!(Keyframe::default().css(), "");
    }

    #[test]
    fn sample_interpolates_linearly_with_linear_easing() {
        let frames = Keyframes::new(
            Keyframe::transform(Transform::translate(0.0, 100.0)).with_opacity(0.0),
            Keyframe::transform(Transform::IDENTITY).with_opacity(1.0),
        );
        let mid = frames.sample(0.5, Easing::Linear);
        assert_eq!(mid.resolved_transform().translate_y, 50.0);
        assert_eq!(mid.resolved_opacity(), 0.5);
    }

    #[test]
    fn sample_handles_three_keyframes() {
        let frames: Keyframes = [0.0, 1.0, 0.0].into_iter().map(Keyframe::opacity).collect();
        assert_eq!(frames.len(), 3);
        assert_eq!(frames.sample(0.5, Easing::Linear).opacity, Some(1.0));
        assert_eq!(frames.sample(0.75, Easing::Linear).opacity, Some(0.5));
        assert_eq!(frames.sample(1.0, Easing::Linear).opacity, Some(0.0));
    }

    #[test]
    fn fill_mode_controls_effect_outside_active_phase() {
        let frames = Keyframes::new(Keyframe::opacity(0.0), Keyframe::opacity(1.0));

        let none = AnimationOptions::new(100).delay(50);
        assert_eq!(frames.sample_at(&none, 10), None);
        assert_eq!(frames.sample_at(&none, 150), None);

        let both = none.fill(FillMode::Both);
        assert_eq!(frames.sample_at(&both, 10), Some(Keyframe::opacity(0.0)));
        assert_eq!(frames.sample_at(&both, 500), Some(Keyframe::opacity(1.0)));

        let forwards = none.fill(FillMode::Forwards);
        assert_eq!(frames.sample_at(&forwards, 10), None);
        assert_eq!(frames.sample_at(&forwards, 150), Some(Keyframe::opacity(1.0)));
    }

    #[test]
    fn zero_duration_is_immediately_finished() {
        let frames = Keyframes::new(Keyframe::opacity(0.0), Keyframe::opacity(1.0));
        let options = AnimationOptions::new(0).fill(FillMode::Forwards);
        assert_eq!(frames.sample_at(&options, 0), Some(Keyframe::opacity(1.0)));
    }
}
