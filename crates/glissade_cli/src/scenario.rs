//! Scenario format for headless transition runs.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Height given to scenario items that do not set one
pub const DEFAULT_ITEM_HEIGHT: f32 = 40.0;

/// A keyed list plus the steps to run against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Initial children of the list container, top to bottom
    #[serde(default)]
    pub items: Vec<Item>,
    pub steps: Vec<ScenarioStep>,
}

/// A list item: a block with an id and a content height.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Item {
    pub id: String,
    #[serde(default = "default_height")]
    pub height: f32,
}

fn default_height() -> f32 {
    DEFAULT_ITEM_HEIGHT
}

/// Incoming element of a `replace` step.
///
/// Without a height the element with that id is reused; with one a fresh
/// element is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Incoming {
    pub id: String,
    #[serde(default)]
    pub height: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioStep {
    /// Snapshot elements; no ids means every current child of the list.
    Read {
        #[serde(default)]
        ids: Vec<String>,
    },
    /// Play transitions; no ids means every current child of the list.
    Play {
        #[serde(default)]
        ids: Vec<String>,
    },
    Remove {
        ids: Vec<String>,
    },
    /// Detach without a transition.
    Detach {
        ids: Vec<String>,
    },
    /// Create an element and insert it into the list.
    Insert {
        id: String,
        #[serde(default = "default_height")]
        height: f32,
        /// Position among the list's children; appended when absent
        #[serde(default)]
        index: Option<usize>,
    },
    /// Move a child of the list to another position.
    Move {
        id: String,
        index: usize,
    },
    Replace {
        old: Vec<String>,
        new: Vec<Incoming>,
    },
    /// Move virtual time forward.
    Advance {
        ms: u64,
    },
    /// Fire every pending timer.
    Settle,
    AssertAttached {
        id: String,
    },
    AssertDetached {
        id: String,
    },
    /// Check the element's latest animation. Keyframes are compared as CSS,
    /// e.g. `transform: translate(0px, -40px); opacity: 1`.
    AssertAnimation {
        id: String,
        #[serde(default)]
        start: Option<String>,
        #[serde(default)]
        end: Option<String>,
    },
}

impl ScenarioStep {
    /// Step name as written in scenario files
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioStep::Read { .. } => "read",
            ScenarioStep::Play { .. } => "play",
            ScenarioStep::Remove { .. } => "remove",
            ScenarioStep::Detach { .. } => "detach",
            ScenarioStep::Insert { .. } => "insert",
            ScenarioStep::Move { .. } => "move",
            ScenarioStep::Replace { .. } => "replace",
            ScenarioStep::Advance { .. } => "advance",
            ScenarioStep::Settle => "settle",
            ScenarioStep::AssertAttached { .. } => "assert_attached",
            ScenarioStep::AssertDetached { .. } => "assert_detached",
            ScenarioStep::AssertAnimation { .. } => "assert_animation",
        }
    }
}

impl Scenario {
    pub fn from_json(input: &str) -> Result<Self> {
        let scenario: Self =
            serde_json::from_str(input).context("failed to parse scenario JSON")?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let input = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario file: {}", path.display()))?;
        Self::from_json(&input)
    }

    fn validate(&self) -> Result<()> {
        for (index, item) in self.items.iter().enumerate() {
            if item.id.is_empty() {
                bail!("item {index} has an empty id");
            }
            if self.items[..index].iter().any(|earlier| earlier.id == item.id) {
                bail!("item id '{}' is used twice", item.id);
            }
            if !item.height.is_finite() || item.height < 0.0 {
                bail!("item '{}' has an invalid height", item.id);
            }
        }
        Ok(())
    }
}
