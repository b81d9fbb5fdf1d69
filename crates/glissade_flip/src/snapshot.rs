//! Recorded element geometry
//!
//! Keys are element ids chosen by the caller. Recording a key twice keeps
//! the most recent rectangle (last write wins); nothing accumulates.

use glissade_core::Rect;
use rustc_hash::{FxHashMap, FxHashSet};

/// Rectangles keyed by element id
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SnapshotMap {
    rects: FxHashMap<String, Rect>,
}

impl SnapshotMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `rect` for `key`, returning the rectangle it replaced.
    pub fn insert(&mut self, key: impl Into<String>, rect: Rect) -> Option<Rect> {
        self.rects.insert(key.into(), rect)
    }

    pub fn get(&self, key: &str) -> Option<Rect> {
        self.rects.get(key).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.rects.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Rect> {
        self.rects.remove(key)
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    pub fn clear(&mut self) {
        self.rects.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Rect)> {
        self.rects.iter().map(|(key, rect)| (key.as_str(), rect))
    }
}

/// Keys that appear more than once, in order of their second appearance.
pub fn duplicate_keys<'a>(keys: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen = FxHashSet::default();
    let mut duplicates: Vec<String> = Vec::new();
    for key in keys {
        if !seen.insert(key) && !duplicates.iter().any(|d| d == key) {
            duplicates.push(key.to_string());
        }
    }
    duplicates
}
