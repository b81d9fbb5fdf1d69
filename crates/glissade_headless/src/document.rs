//! Headless document
//!
//! Nodes live in a slotmap arena owned by the document. Handles
//! ([`HeadlessElement`]) are an arena key plus a clone of the document, so
//! they stay valid after detachment the way DOM references do. Nodes are
//! never freed while the document lives.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use glissade_animation::{Keyframe, TimerQueue};
use glissade_core::{Document, Element, Rect};
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};

use crate::animation::AnimationRecord;
use crate::element::HeadlessElement;

new_key_type! {
    /// Arena key of a headless node
    pub struct NodeId;
}

/// Default viewport, matching the headless runner's window size
pub const DEFAULT_VIEWPORT: (f32, f32) = (1280.0, 720.0);

pub(crate) struct NodeData {
    pub tag: String,
    pub attributes: FxHashMap<String, String>,
    pub style: FxHashMap<String, String>,
    pub inner_html: String,
    pub children: Vec<NodeId>,
    pub parent: Option<NodeId>,
    /// Explicit box; makes the node a positioned root
    pub frame: Option<Rect>,
    /// Content height when the node has no in-flow children
    pub intrinsic_height: Option<f32>,
}

impl NodeData {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attributes: FxHashMap::default(),
            style: FxHashMap::default(),
            inner_html: String::new(),
            children: Vec::new(),
            parent: None,
            frame: None,
            intrinsic_height: None,
        }
    }
}

pub(crate) struct DomState {
    pub nodes: SlotMap<NodeId, NodeData>,
    pub body: NodeId,
    pub animations: Vec<AnimationRecord>,
}

impl DomState {
    /// Whether `ancestor` is `node` or one of its ancestors.
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(id).and_then(|data| data.parent);
        }
        false
    }

    /// Descendants of `root` in document order, `root` excluded.
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self
            .nodes
            .get(root)
            .map(|data| data.children.iter().rev().copied().collect())
            .unwrap_or_default();
        while let Some(id) = stack.pop() {
            out.push(id);
            if let Some(data) = self.nodes.get(id) {
                stack.extend(data.children.iter().rev().copied());
            }
        }
        out
    }
}

/// In-memory document with block layout and virtual timers.
#[derive(Clone)]
pub struct HeadlessDocument {
    pub(crate) state: Rc<RefCell<DomState>>,
    pub(crate) timers: TimerQueue,
}

impl HeadlessDocument {
    pub fn new() -> Self {
        Self::with_viewport(DEFAULT_VIEWPORT.0, DEFAULT_VIEWPORT.1)
    }

    /// Document whose `body` covers a `width` x `height` viewport.
    pub fn with_viewport(width: f32, height: f32) -> Self {
        let mut nodes = SlotMap::with_key();
        let mut body = NodeData::new("body");
        body.frame = Some(Rect::new(0.0, 0.0, width, height));
        let body = nodes.insert(body);
        Self {
            state: Rc::new(RefCell::new(DomState {
                nodes,
                body,
                animations: Vec::new(),
            })),
            timers: TimerQueue::new(),
        }
    }

    pub fn body(&self) -> HeadlessElement {
        let body = self.state.borrow().body;
        self.element(body)
    }

    pub(crate) fn element(&self, id: NodeId) -> HeadlessElement {
        HeadlessElement::new(id, self.clone())
    }

    /// Create a detached element.
    pub fn create_element(&self, tag: &str) -> HeadlessElement {
        let id = self.state.borrow_mut().nodes.insert(NodeData::new(tag));
        self.element(id)
    }

    /// Create a detached `div` with an id and a content height.
    pub fn create_block(&self, id: &str, height: f32) -> HeadlessElement {
        let element = self.create_element("div");
        element.set_attribute("id", id);
        element.set_intrinsic_height(height);
        element
    }

    // =========================================================================
    // Time
    // =========================================================================

    /// The document's event loop
    pub fn timers(&self) -> TimerQueue {
        self.timers.clone()
    }

    pub fn now_ms(&self) -> u64 {
        self.timers.now_ms()
    }

    /// Move virtual time forward, firing timers and finishing animations.
    pub fn advance(&self, ms: u64) -> usize {
        self.timers.advance(ms)
    }

    pub fn run_until_idle(&self) -> usize {
        self.timers.run_until_idle()
    }

    // =========================================================================
    // Animations
    // =========================================================================

    /// Every animation started on this document, oldest first
    pub fn animations(&self) -> Vec<AnimationRecord> {
        self.state.borrow().animations.clone()
    }

    pub fn animations_for(&self, element: &HeadlessElement) -> Vec<AnimationRecord> {
        self.state
            .borrow()
            .animations
            .iter()
            .filter(|record| record.node == element.node_id())
            .cloned()
            .collect()
    }

    pub fn last_animation(&self, element: &HeadlessElement) -> Option<AnimationRecord> {
        self.state
            .borrow()
            .animations
            .iter()
            .rev()
            .find(|record| record.node == element.node_id())
            .cloned()
    }

    pub fn clear_animations(&self) {
        self.state.borrow_mut().animations.clear();
    }

    /// Effect currently applied to `element` by its latest live animation.
    ///
    /// `None` when nothing applies: no animation, a cancelled one, or one
    /// outside its active phase without a matching fill mode.
    pub fn visual_state(&self, element: &HeadlessElement) -> Option<Keyframe> {
        let now = self.now_ms();
        self.state
            .borrow()
            .animations
            .iter()
            .rev()
            .filter(|record| record.node == element.node_id())
            .find(|record| !record.is_cancelled())
            .and_then(|record| record.sample(now))
    }
}

impl Default for HeadlessDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl Document for HeadlessDocument {
    type Element = HeadlessElement;

    fn element_by_id(&self, id: &str) -> Option<HeadlessElement> {
        let found = {
            let state = self.state.borrow();
            state.descendants(state.body).into_iter().find(|node| {
                state
                    .nodes
                    .get(*node)
                    .and_then(|data| data.attributes.get("id"))
                    .is_some_and(|value| value == id)
            })
        };
        found.map(|node| self.element(node))
    }
}

impl fmt::Debug for HeadlessDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("HeadlessDocument")
            .field("nodes", &state.nodes.len())
            .field("animations", &state.animations.len())
            .field("now_ms", &self.timers.now_ms())
            .finish()
    }
}
