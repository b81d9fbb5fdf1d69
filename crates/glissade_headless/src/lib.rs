//! Glissade Headless
//!
//! An in-memory host for Glissade: a DOM-like node arena with block layout,
//! keyframe animations that are recorded rather than rendered, and a
//! virtual-time event loop. Tests and the `glissade` scenario runner drive
//! transitions against it deterministically.
//!
//! ```rust
//! use glissade_core::Element;
//! use glissade_headless::HeadlessDocument;
//!
//! let document = HeadlessDocument::new();
//! let list = document.body().append_new("ul");
//! let a = document.create_block("a", 40.0);
//! let b = document.create_block("b", 40.0);
//! list.append_child(&a);
//! list.append_child(&b);
//! assert_eq!(b.bounding_rect().y(), 40.0);
//! ```

pub mod animation;
pub mod document;
pub mod element;
pub mod layout;

pub use animation::{AnimationRecord, HeadlessPlayback};
pub use document::{HeadlessDocument, NodeId, DEFAULT_VIEWPORT};
pub use element::HeadlessElement;
