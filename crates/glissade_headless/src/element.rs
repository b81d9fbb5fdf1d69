//! Headless element handles

use std::fmt;

use glissade_core::element::describe;
use glissade_core::{DomError, Element, Rect};

use crate::document::{HeadlessDocument, NodeId};

/// Handle to a node of a [`HeadlessDocument`]
#[derive(Clone)]
pub struct HeadlessElement {
    id: NodeId,
    document: HeadlessDocument,
}

impl HeadlessElement {
    pub(crate) fn new(id: NodeId, document: HeadlessDocument) -> Self {
        Self { id, document }
    }

    pub fn node_id(&self) -> NodeId {
        self.id
    }

    pub fn document(&self) -> HeadlessDocument {
        self.document.clone()
    }

    pub fn tag(&self) -> String {
        self.read(|node| node.tag.clone()).unwrap_or_default()
    }

    /// Give the node an explicit box, taking it out of flow.
    pub fn set_frame(&self, frame: Option<Rect>) {
        self.write(|node| node.frame = frame);
    }

    /// Content height used when the node has no in-flow children.
    pub fn set_intrinsic_height(&self, height: f32) {
        self.write(|node| node.intrinsic_height = Some(height));
    }

    /// Whether the node is reachable from the document body
    pub fn is_attached(&self) -> bool {
        let state = self.document.state.borrow();
        state.is_ancestor_or_self(state.body, self.id)
    }

    /// Create a child element and append it.
    pub fn append_new(&self, tag: &str) -> HeadlessElement {
        let child = self.document.create_element(tag);
        self.append_child(&child);
        child
    }

    /// Keys of the children, in order. Unkeyed children are skipped.
    pub fn child_keys(&self) -> Vec<String> {
        self.children().iter().filter_map(|child| child.key()).collect()
    }

    fn read<T>(&self, f: impl FnOnce(&crate::document::NodeData) -> T) -> Option<T> {
        self.document.state.borrow().nodes.get(self.id).map(f)
    }

    fn write(&self, f: impl FnOnce(&mut crate::document::NodeData)) {
        if let Some(node) = self.document.state.borrow_mut().nodes.get_mut(self.id) {
            f(node);
        }
    }

    fn matches(&self, selector: &str) -> bool {
        if let Some(id) = selector.strip_prefix('#') {
            self.attribute("id").is_some_and(|value| value == id)
        } else if let Some(class) = selector.strip_prefix('.') {
            self.has_class(class)
        } else {
            self.tag().eq_ignore_ascii_case(selector)
        }
    }

    fn classes(&self) -> Vec<String> {
        self.attribute("class")
            .map(|value| value.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }

    fn set_classes(&self, classes: &[String]) {
        if classes.is_empty() {
            self.remove_attribute("class");
        } else {
            self.set_attribute("class", &classes.join(" "));
        }
    }
}

impl Element for HeadlessElement {
    fn attribute(&self, name: &str) -> Option<String> {
        self.read(|node| node.attributes.get(name).cloned()).flatten()
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.write(|node| {
            node.attributes.insert(name.to_string(), value.to_string());
        });
    }

    fn remove_attribute(&self, name: &str) {
        self.write(|node| {
            node.attributes.remove(name);
        });
    }

    fn same_node(&self, other: &Self) -> bool {
        self.id == other.id && std::rc::Rc::ptr_eq(&self.document.state, &other.document.state)
    }

    fn parent(&self) -> Option<Self> {
        self.read(|node| node.parent)
            .flatten()
            .map(|parent| self.document.element(parent))
    }

    fn children(&self) -> Vec<Self> {
        self.read(|node| node.children.clone())
            .unwrap_or_default()
            .into_iter()
            .map(|child| self.document.element(child))
            .collect()
    }

    fn append_child(&self, child: &Self) {
        let cyclic = self.document.state.borrow().is_ancestor_or_self(child.id, self.id);
        if cyclic {
            tracing::warn!("refusing to append {} inside itself", describe(child));
            return;
        }
        let mut state = self.document.state.borrow_mut();
        let previous = state.nodes.get(child.id).and_then(|node| node.parent);
        if let Some(previous) = previous {
            if let Some(node) = state.nodes.get_mut(previous) {
                node.children.retain(|id| *id != child.id);
            }
        }
        if let Some(node) = state.nodes.get_mut(self.id) {
            node.children.push(child.id);
        }
        if let Some(node) = state.nodes.get_mut(child.id) {
            node.parent = Some(self.id);
        }
    }

    fn remove_child(&self, child: &Self) -> glissade_core::Result<()> {
        if child.read(|node| node.parent).flatten() != Some(self.id) {
            return Err(DomError::NotAChild {
                key: describe(child),
            });
        }
        let mut state = self.document.state.borrow_mut();
        if let Some(node) = state.nodes.get_mut(self.id) {
            node.children.retain(|id| *id != child.id);
        }
        if let Some(node) = state.nodes.get_mut(child.id) {
            node.parent = None;
        }
        Ok(())
    }

    fn bounding_rect(&self) -> Rect {
        self.document.state.borrow().rect(self.id)
    }

    fn offset_height(&self) -> f32 {
        self.bounding_rect().height()
    }

    fn scroll_height(&self) -> f32 {
        self.document.state.borrow().content_height(self.id)
    }

    fn style(&self, property: &str) -> Option<String> {
        self.read(|node| node.style.get(property).cloned()).flatten()
    }

    fn set_style(&self, property: &str, value: &str) {
        self.write(|node| {
            node.style.insert(property.to_string(), value.to_string());
        });
    }

    fn remove_style(&self, property: &str) {
        self.write(|node| {
            node.style.remove(property);
        });
    }

    fn computed_display(&self) -> String {
        self.document.state.borrow().display(self.id)
    }

    fn add_class(&self, class: &str) {
        let mut classes = self.classes();
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
            self.set_classes(&classes);
        }
    }

    fn remove_class(&self, class: &str) {
        let mut classes = self.classes();
        let before = classes.len();
        classes.retain(|c| c != class);
        if classes.len() != before {
            self.set_classes(&classes);
        }
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes().iter().any(|c| c == class)
    }

    fn query_selector(&self, selector: &str) -> Option<Self> {
        let descendants = {
            let state = self.document.state.borrow();
            state.descendants(self.id)
        };
        descendants
            .into_iter()
            .map(|id| self.document.element(id))
            .find(|element| element.matches(selector))
    }

    fn inner_html(&self) -> String {
        self.read(|node| node.inner_html.clone()).unwrap_or_default()
    }

    /// Replaces the content: existing children are detached.
    fn set_inner_html(&self, html: &str) {
        let mut state = self.document.state.borrow_mut();
        let children = match state.nodes.get_mut(self.id) {
            Some(node) => {
                node.inner_html = html.to_string();
                std::mem::take(&mut node.children)
            }
            None => return,
        };
        for child in children {
            if let Some(node) = state.nodes.get_mut(child) {
                node.parent = None;
            }
        }
    }
}

impl PartialEq for HeadlessElement {
    fn eq(&self, other: &Self) -> bool {
        self.same_node(other)
    }
}

impl fmt::Debug for HeadlessElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.key() {
            Some(key) => write!(f, "<{}#{}>", self.tag(), key),
            None => write!(f, "<{}>", self.tag()),
        }
    }
}
