//! Glissade Animation
//!
//! The animation model shared by the FLIP engine and the widgets.
//!
//! # Features
//!
//! - **Easing**: CSS-named timing curves, including custom cubic beziers
//! - **Keyframes**: transform/opacity keyframes with fill modes and delays
//! - **Presets**: entrance, inverted-move and exit keyframe lists
//! - **Host seam**: `Animate`/`Playback`, the `Element.animate()` shape
//! - **Virtual timers**: `TimerQueue`, a deterministic `Scheduler`

pub mod easing;
pub mod keyframe;
pub mod playback;
pub mod presets;
pub mod scheduler;

pub use easing::Easing;
pub use keyframe::{AnimationOptions, FillMode, Keyframe, Keyframes, Transform};
pub use playback::{Animate, FinishCallback, Playback};
pub use presets::AnimationPreset;
pub use scheduler::TimerQueue;
