//! Block layout
//!
//! Just enough layout for transitions to be measurable:
//!
//! - a node with an explicit frame is positioned at that frame
//! - an in-flow child sits below the displayed in-flow siblings before it,
//!   at its parent's x and width
//! - height is the inline `height` in px if set, else the content height
//!   (intrinsic height, or the sum of in-flow children)
//! - `display: none` (inline, or via the `hidden` attribute) has no height,
//!   and neither do its descendants
//! - a detached node without a frame has no box at all

use glissade_core::Rect;

use crate::document::{DomState, NodeId};

/// Parse a CSS length in px. `auto` and other keywords yield `None`.
pub fn parse_px(value: &str) -> Option<f32> {
    let value = value.trim();
    value
        .strip_suffix("px")
        .unwrap_or(value)
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|px| px.is_finite())
}

impl DomState {
    pub(crate) fn rect(&self, id: NodeId) -> Rect {
        let Some(node) = self.nodes.get(id) else {
            return Rect::ZERO;
        };
        if let Some(frame) = node.frame {
            return frame;
        }
        let Some(parent) = node.parent else {
            return Rect::ZERO;
        };
        let parent_rect = self.rect(parent);

        let mut y = parent_rect.y();
        if let Some(parent_node) = self.nodes.get(parent) {
            for &sibling in &parent_node.children {
                if sibling == id {
                    break;
                }
                if self.in_flow(sibling) {
                    y += self.layout_height(sibling);
                }
            }
        }
        let height = if self.inside_hidden(parent) {
            0.0
        } else {
            self.layout_height(id)
        };
        Rect::new(parent_rect.x(), y, parent_rect.width(), height)
    }

    /// Whether `id` or one of its ancestors is `display: none`.
    fn inside_hidden(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if self.display(node) == "none" {
                return true;
            }
            current = self.nodes.get(node).and_then(|data| data.parent);
        }
        false
    }

    pub(crate) fn display(&self, id: NodeId) -> String {
        let Some(node) = self.nodes.get(id) else {
            return "none".to_string();
        };
        match node.style.get("display") {
            Some(display) if !display.is_empty() => display.clone(),
            _ if node.attributes.contains_key("hidden") => "none".to_string(),
            _ => "block".to_string(),
        }
    }

    pub(crate) fn layout_height(&self, id: NodeId) -> f32 {
        if self.display(id) == "none" {
            return 0.0;
        }
        self.nodes
            .get(id)
            .and_then(|node| node.style.get("height"))
            .and_then(|height| parse_px(height))
            .unwrap_or_else(|| self.content_height(id))
    }

    pub(crate) fn content_height(&self, id: NodeId) -> f32 {
        let Some(node) = self.nodes.get(id) else {
            return 0.0;
        };
        if let Some(height) = node.intrinsic_height {
            return height;
        }
        node.children
            .iter()
            .filter(|child| self.in_flow(**child))
            .map(|child| self.layout_height(*child))
            .sum()
    }

    fn in_flow(&self, id: NodeId) -> bool {
        self.nodes.get(id).is_some_and(|node| node.frame.is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pixel_lengths() {
        assert_eq!(parse_px("40px"), Some(40.0));
        assert_eq!(parse_px(" 12.5px "), Some(12.5));
        assert_eq!(parse_px("0"), Some(0.0));
        assert_eq!(parse_px("auto"), None);
        assert_eq!(parse_px(""), None);
    }
}
