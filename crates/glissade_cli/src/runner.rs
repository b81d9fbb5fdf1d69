//! Scenario runner that drives the FLIP engine against the headless host.

use rustc_hash::FxHashMap;

use anyhow::Result;
use glissade_animation::TimerQueue;
use glissade_core::element::detach;
use glissade_core::{DomError, Element};
use glissade_flip::{FlipAnimation, FlipError, RemovalHandle};
use glissade_headless::{HeadlessDocument, HeadlessElement};

use crate::assert::{
    evaluate_assert_animation, evaluate_assert_attached, evaluate_assert_detached,
    AssertionResult, ElementState, Snapshot,
};
use crate::config::GlissadeConfig;
use crate::report::{AnimationEntry, ScenarioReport};
use crate::scenario::{Incoming, Item, Scenario, ScenarioStep};

type Flip = FlipAnimation<HeadlessElement, TimerQueue>;

/// Final outcome of a scenario run.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    Passed { report: ScenarioReport },
    Failed { report: ScenarioReport },
}

impl RunOutcome {
    pub fn report(&self) -> &ScenarioReport {
        match self {
            RunOutcome::Passed { report } => report,
            RunOutcome::Failed { report } => report,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RunOutcome::Failed { .. })
    }
}

/// Why a step stopped the run
#[derive(Debug)]
struct StepFailure {
    code: String,
    message: String,
}

impl StepFailure {
    fn new(code: &str, message: String) -> Self {
        Self {
            code: code.to_string(),
            message,
        }
    }
}

impl From<FlipError> for StepFailure {
    fn from(err: FlipError) -> Self {
        let code = match &err {
            FlipError::DetachedElement { .. } => "detached_element",
            FlipError::EmptyReplace => "empty_replace",
            FlipError::DuplicateKey { .. } => "duplicate_key",
            FlipError::Dom(_) => "dom_error",
        };
        Self::new(code, err.to_string())
    }
}

impl From<DomError> for StepFailure {
    fn from(err: DomError) -> Self {
        Self::new("dom_error", err.to_string())
    }
}

/// A keyed list in a headless document with a FLIP engine bound to it.
pub struct ScenarioRunner {
    document: HeadlessDocument,
    list: HeadlessElement,
    flip: Flip,
    /// Every element the scenario created, by id
    elements: FxHashMap<String, HeadlessElement>,
    removals: Vec<RemovalHandle<HeadlessElement, TimerQueue>>,
}

impl ScenarioRunner {
    pub fn new(items: &[Item], config: &GlissadeConfig) -> Self {
        let document =
            HeadlessDocument::with_viewport(config.viewport.width, config.viewport.height);
        let list = document.body().append_new("ul");
        let mut elements = FxHashMap::default();
        for item in items {
            let element = document.create_block(&item.id, item.height);
            list.append_child(&element);
            elements.insert(item.id.clone(), element);
        }
        let flip = FlipAnimation::with_config(document.timers(), config.flip.clone());
        Self {
            document,
            list,
            flip,
            elements,
            removals: Vec::new(),
        }
    }

    pub fn document(&self) -> &HeadlessDocument {
        &self.document
    }

    /// The list container
    pub fn list(&self) -> &HeadlessElement {
        &self.list
    }

    pub fn element(&self, id: &str) -> Option<&HeadlessElement> {
        self.elements.get(id)
    }

    /// Removals started so far, oldest first
    pub fn removals(&self) -> &[RemovalHandle<HeadlessElement, TimerQueue>] {
        &self.removals
    }

    pub fn snapshot(&self) -> Snapshot {
        let elements = self
            .elements
            .iter()
            .map(|(id, element)| {
                let animation = self
                    .document
                    .last_animation(element)
                    .map(|record| (record.start().css(), record.end().css()));
                let state = ElementState {
                    attached: element.is_attached(),
                    animation,
                };
                (id.clone(), state)
            })
            .collect();
        Snapshot { elements }
    }

    pub fn animations(&self) -> Vec<AnimationEntry> {
        self.document
            .animations()
            .iter()
            .map(AnimationEntry::from)
            .collect()
    }

    /// Run `steps` in order, stopping at the first failure.
    pub fn run(&mut self, steps: &[ScenarioStep]) -> RunOutcome {
        let started_ms = self.document.now_ms();
        for (index, step) in steps.iter().enumerate() {
            tracing::debug!("step {index}: {}", step.name());
            if let Err(failure) = self.step(step) {
                tracing::warn!(
                    "step {index} ({}) failed: {}",
                    step.name(),
                    failure.message
                );
                let report = ScenarioReport::failed(
                    step.name(),
                    index,
                    failure.code,
                    failure.message,
                    self.document.now_ms() - started_ms,
                    self.animations(),
                );
                return RunOutcome::Failed { report };
            }
        }
        RunOutcome::Passed {
            report: ScenarioReport::passed(
                self.document.now_ms() - started_ms,
                self.animations(),
            ),
        }
    }

    fn step(&mut self, step: &ScenarioStep) -> std::result::Result<(), StepFailure> {
        match step {
            ScenarioStep::Read { ids } => {
                let elements = self.resolve_or_children(ids)?;
                self.flip.read(&elements)?;
            }
            ScenarioStep::Play { ids } => {
                let elements = self.resolve_or_children(ids)?;
                self.flip.play(&elements);
            }
            ScenarioStep::Remove { ids } => {
                let elements = self.resolve(ids)?;
                let handle = self.flip.remove(&elements)?;
                self.removals.push(handle);
            }
            ScenarioStep::Detach { ids } => {
                for element in self.resolve(ids)? {
                    detach(&element)?;
                }
            }
            ScenarioStep::Insert { id, height, index } => {
                if self.elements.get(id).is_some_and(|e| e.is_attached()) {
                    return Err(StepFailure::new(
                        "duplicate_id",
                        format!("{id}: an attached element already uses this id"),
                    ));
                }
                let element = self.document.create_block(id, *height);
                self.place(&element, index.unwrap_or(usize::MAX));
                self.elements.insert(id.clone(), element);
            }
            ScenarioStep::Move { id, index } => {
                let element = self.lookup(id)?;
                let in_list = element
                    .parent()
                    .is_some_and(|parent| parent.same_node(&self.list));
                if !in_list {
                    return Err(StepFailure::new(
                        "not_in_list",
                        format!("{id}: not a child of the list"),
                    ));
                }
                self.place(&element, *index);
            }
            ScenarioStep::Replace { old, new } => {
                let old = self.resolve(old)?;
                let new = self.incoming(new)?;
                let handle = self.flip.replace(&old, &new)?;
                for element in &new {
                    if let Some(key) = element.key() {
                        self.elements.insert(key, element.clone());
                    }
                }
                self.removals.push(handle);
            }
            ScenarioStep::Advance { ms } => {
                self.document.advance(*ms);
            }
            ScenarioStep::Settle => {
                self.document.run_until_idle();
            }
            ScenarioStep::AssertAttached { id } => {
                check(evaluate_assert_attached(id, &self.snapshot()))?;
            }
            ScenarioStep::AssertDetached { id } => {
                check(evaluate_assert_detached(id, &self.snapshot()))?;
            }
            ScenarioStep::AssertAnimation { id, start, end } => {
                check(evaluate_assert_animation(
                    id,
                    start.as_deref(),
                    end.as_deref(),
                    &self.snapshot(),
                ))?;
            }
        }
        Ok(())
    }

    fn lookup(&self, id: &str) -> std::result::Result<HeadlessElement, StepFailure> {
        self.elements.get(id).cloned().ok_or_else(|| {
            StepFailure::new("missing_element", format!("{id}: element not found"))
        })
    }

    fn resolve(&self, ids: &[String]) -> std::result::Result<Vec<HeadlessElement>, StepFailure> {
        ids.iter().map(|id| self.lookup(id)).collect()
    }

    fn resolve_or_children(
        &self,
        ids: &[String],
    ) -> std::result::Result<Vec<HeadlessElement>, StepFailure> {
        if ids.is_empty() {
            Ok(self.list.children())
        } else {
            self.resolve(ids)
        }
    }

    fn incoming(
        &self,
        incoming: &[Incoming],
    ) -> std::result::Result<Vec<HeadlessElement>, StepFailure> {
        incoming
            .iter()
            .map(|item| match item.height {
                Some(height) => Ok(self.document.create_block(&item.id, height)),
                None => self.lookup(&item.id),
            })
            .collect()
    }

    /// Put `element` at `index` among the list's children, clamped to the end.
    fn place(&self, element: &HeadlessElement, index: usize) {
        let mut order: Vec<HeadlessElement> = self
            .list
            .children()
            .into_iter()
            .filter(|child| !child.same_node(element))
            .collect();
        let index = index.min(order.len());
        order.insert(index, element.clone());
        for child in &order[index..] {
            self.list.append_child(child);
        }
    }
}

fn check(result: AssertionResult) -> std::result::Result<(), StepFailure> {
    match result {
        AssertionResult::Passed => Ok(()),
        AssertionResult::Failed { code, message } => Err(StepFailure { code, message }),
    }
}

/// Run a parsed scenario with `config`.
pub fn run_loaded_scenario(scenario: &Scenario, config: &GlissadeConfig) -> RunOutcome {
    let mut runner = ScenarioRunner::new(&scenario.items, config);
    runner.run(&scenario.steps)
}

/// Parse and run scenario JSON with `config`.
pub fn run_scenario(input: &str, config: &GlissadeConfig) -> Result<RunOutcome> {
    let scenario = Scenario::from_json(input)?;
    Ok(run_loaded_scenario(&scenario, config))
}
