//! Glissade FLIP
//!
//! Position transitions for keyed elements: measure before a layout change,
//! measure after, and animate the difference so elements glide instead of
//! jumping.
//!
//! # Operations
//!
//! - [`FlipAnimation::read`]: record the current boxes
//! - [`FlipAnimation::play`]: animate moved elements, fade in new ones
//! - [`FlipAnimation::remove`]: fade elements out, then detach them
//! - [`FlipAnimation::replace`]: swap one element set for another
//!
//! The engine only talks to its host through `glissade_core::Element`,
//! `glissade_animation::Animate` and `glissade_core::Scheduler`.

pub mod config;
pub mod engine;
pub mod error;
pub mod removal;
pub mod snapshot;

pub use config::{ConfigError, FlipConfig, KeyValidation, RemovalStrategy};
pub use engine::{invert, FlipAnimation};
pub use error::{FlipError, Result};
pub use removal::{DetachStatus, RemovalHandle};
pub use snapshot::SnapshotMap;
