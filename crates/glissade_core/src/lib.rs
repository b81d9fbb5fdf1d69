//! Glissade Core
//!
//! Foundational types shared by every Glissade crate:
//!
//! - **Geometry**: `Point`, `Size` and `Rect` in layout pixels
//! - **Host seams**: the `Element` and `Document` traits a DOM-like host implements
//! - **Timers**: the one-shot `Scheduler` seam and `TimerId` keys
//! - **Completion**: a shared handle resolved when deferred work has run
//! - **Events**: keyboard events consumed by widgets
//!
//! # Example
//!
//! ```rust
//! use glissade_core::Rect;
//!
//! let before = Rect::new(0.0, 40.0, 200.0, 40.0);
//! let after = Rect::new(0.0, 0.0, 200.0, 40.0);
//! assert_eq!(before.y() - after.y(), 40.0);
//! ```

pub mod completion;
pub mod element;
pub mod error;
pub mod events;
pub mod geometry;
pub mod timer;

pub use completion::Completion;
pub use element::{Document, Element};
pub use error::{DomError, Result};
pub use events::{Key, KeyboardEvent};
pub use geometry::{Point, Rect, Size};
pub use timer::{Scheduler, TimerCallback, TimerId};
