//! Assertion helpers for scenario steps.

use rustc_hash::FxHashMap;

/// Observable state of the scenario's elements at one point in time.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub elements: FxHashMap<String, ElementState>,
}

#[derive(Debug, Clone, Default)]
pub struct ElementState {
    pub attached: bool,
    /// Latest animation as (start, end) CSS
    pub animation: Option<(String, String)>,
}

/// Assertion result with structured failure details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssertionResult {
    Passed,
    Failed { code: String, message: String },
}

impl AssertionResult {
    fn failed(code: &str, message: String) -> Self {
        AssertionResult::Failed {
            code: code.to_string(),
            message,
        }
    }
}

fn missing(id: &str) -> AssertionResult {
    AssertionResult::failed("missing_element", format!("{id}: element not found"))
}

pub fn evaluate_assert_attached(id: &str, snapshot: &Snapshot) -> AssertionResult {
    match snapshot.elements.get(id) {
        None => missing(id),
        Some(element) if element.attached => AssertionResult::Passed,
        Some(_) => AssertionResult::failed("detached", format!("{id}: not attached")),
    }
}

pub fn evaluate_assert_detached(id: &str, snapshot: &Snapshot) -> AssertionResult {
    match snapshot.elements.get(id) {
        None => missing(id),
        Some(element) if !element.attached => AssertionResult::Passed,
        Some(_) => AssertionResult::failed("attached", format!("{id}: still attached")),
    }
}

pub fn evaluate_assert_animation(
    id: &str,
    start: Option<&str>,
    end: Option<&str>,
    snapshot: &Snapshot,
) -> AssertionResult {
    let Some(element) = snapshot.elements.get(id) else {
        return missing(id);
    };
    let Some((actual_start, actual_end)) = element.animation.as_ref() else {
        return AssertionResult::failed("no_animation", format!("{id}: never animated"));
    };
    if let Some(expected) = start {
        if expected != actual_start {
            return AssertionResult::failed(
                "start_mismatch",
                format!("{id}: expected start '{expected}', got '{actual_start}'"),
            );
        }
    }
    if let Some(expected) = end {
        if expected != actual_end {
            return AssertionResult::failed(
                "end_mismatch",
                format!("{id}: expected end '{expected}', got '{actual_end}'"),
            );
        }
    }
    AssertionResult::Passed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> Snapshot {
        let mut elements = FxHashMap::default();
        elements.insert(
            "a".to_string(),
            ElementState {
                attached: true,
                animation: Some((
                    "transform: translate(0px, 40px)".to_string(),
                    "transform: none".to_string(),
                )),
            },
        );
        elements.insert("b".to_string(), ElementState::default());
        Snapshot { elements }
    }

    #[test]
    fn attachment() {
        let snapshot = snapshot();
        assert_eq!(evaluate_assert_attached("a", &snapshot), AssertionResult::Passed);
        assert_eq!(evaluate_assert_detached("b", &snapshot), AssertionResult::Passed);
        assert!(matches!(
            evaluate_assert_detached("a", &snapshot),
            AssertionResult::Failed { code, .. } if code == "attached"
        ));
        assert!(matches!(
            evaluate_assert_attached("zz", &snapshot),
            AssertionResult::Failed { code, .. } if code == "missing_element"
        ));
    }

    #[test]
    fn animation_keyframes() {
        let snapshot = snapshot();
        assert_eq!(
            evaluate_assert_animation("a", None, Some("transform: none"), &snapshot),
            AssertionResult::Passed
        );
        assert!(matches!(
            evaluate_assert_animation("a", Some("transform: none"), None, &snapshot),
            AssertionResult::Failed { code, .. } if code == "start_mismatch"
        ));
        assert!(matches!(
            evaluate_assert_animation("b", None, None, &snapshot),
            AssertionResult::Failed { code, .. } if code == "no_animation"
        ));
    }
}
