//! Host element seam
//!
//! Glissade never owns host nodes. Everything it needs from a DOM-like
//! environment goes through [`Element`]: attribute access, tree mutation,
//! geometry, inline style and the class list. A browser binding implements
//! it over real nodes; `glissade_headless` implements it over an arena.
//!
//! Handles are cheap clones referring to the same node, the way a JS
//! reference to an `HTMLElement` is.

use std::fmt;

use crate::error::{DomError, Result};
use crate::geometry::Rect;

/// Placeholder used in logs and errors for elements without an `id`.
pub const UNKEYED: &str = "<unkeyed>";

/// A handle to a host element.
pub trait Element: Clone + fmt::Debug {
    // ------------------------------------------------------------------
    // Attributes
    // ------------------------------------------------------------------

    fn attribute(&self, name: &str) -> Option<String>;

    fn set_attribute(&self, name: &str, value: &str);

    fn remove_attribute(&self, name: &str);

    fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// Identifier used to track the element across layouts.
    ///
    /// An empty `id` attribute counts as no key.
    fn key(&self) -> Option<String> {
        self.attribute("id").filter(|id| !id.is_empty())
    }

    // ------------------------------------------------------------------
    // Tree
    // ------------------------------------------------------------------

    /// Whether both handles refer to the same host node.
    fn same_node(&self, other: &Self) -> bool;

    fn parent(&self) -> Option<Self>;

    fn children(&self) -> Vec<Self>;

    /// Append `child` as the last child, moving it out of its current
    /// parent first if it has one.
    fn append_child(&self, child: &Self);

    fn remove_child(&self, child: &Self) -> Result<()>;

    // ------------------------------------------------------------------
    // Geometry
    // ------------------------------------------------------------------

    /// Border box in viewport pixels. Detached elements report `Rect::ZERO`.
    fn bounding_rect(&self) -> Rect;

    /// Laid-out height. Reading it forces a reflow on real hosts.
    fn offset_height(&self) -> f32;

    /// Height of the content, including overflow.
    fn scroll_height(&self) -> f32;

    // ------------------------------------------------------------------
    // Style
    // ------------------------------------------------------------------

    /// Inline style property, if set.
    fn style(&self, property: &str) -> Option<String>;

    fn set_style(&self, property: &str, value: &str);

    fn remove_style(&self, property: &str);

    /// Computed `display` value.
    fn computed_display(&self) -> String;

    fn add_class(&self, class: &str);

    fn remove_class(&self, class: &str);

    fn has_class(&self, class: &str) -> bool;

    // ------------------------------------------------------------------
    // Content
    // ------------------------------------------------------------------

    /// First descendant matching a simple selector (`#id`, `.class` or a
    /// tag name).
    fn query_selector(&self, selector: &str) -> Option<Self>;

    fn inner_html(&self) -> String;

    fn set_inner_html(&self, html: &str);
}

/// Document-level lookups.
pub trait Document {
    type Element: Element;

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;
}

/// Key of `element` for logs and errors.
pub fn describe<E: Element>(element: &E) -> String {
    element.key().unwrap_or_else(|| UNKEYED.to_string())
}

/// Parent of `element`, or [`DomError::Detached`].
pub fn require_parent<E: Element>(element: &E) -> Result<E> {
    element.parent().ok_or_else(|| DomError::Detached {
        key: describe(element),
    })
}

/// Remove `element` from its parent.
pub fn detach<E: Element>(element: &E) -> Result<()> {
    let parent = require_parent(element)?;
    parent.remove_child(element)
}
