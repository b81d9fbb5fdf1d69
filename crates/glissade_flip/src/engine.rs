//! The FLIP engine
//!
//! First, Last, Invert, Play: record each element's box before a layout
//! change ([`FlipAnimation::read`]), let the caller mutate the tree, then
//! render every element where it used to be and animate the difference back
//! to identity ([`FlipAnimation::play`]).
//!
//! ```ignore
//! let mut flip = FlipAnimation::new(scheduler);
//! flip.read(&items)?;
//! list.append_child(&items[0]); // move the first item to the end
//! flip.play(&items);
//! ```

use std::rc::Rc;

use glissade_animation::{Animate, AnimationOptions, AnimationPreset, Playback, Transform};
use glissade_core::{element, Completion, Element, Rect, Scheduler};
use rustc_hash::FxHashMap;

use crate::config::{FlipConfig, KeyValidation, RemovalStrategy};
use crate::error::{FlipError, Result};
use crate::removal::{DetachTask, RemovalHandle};
use crate::snapshot::{duplicate_keys, SnapshotMap};

/// Animation (and pending detachment) last started for a key
struct InFlight<E: Element + Animate> {
    element: E,
    playback: E::Playback,
    detach: Option<Rc<DetachTask<E>>>,
}

/// Animates elements between two layouts.
///
/// One instance covers one logical transition: `read` populates the
/// snapshots, `play`, `remove` or `replace` consume them.
pub struct FlipAnimation<E, S>
where
    E: Element + Animate + 'static,
    S: Scheduler + 'static,
{
    config: FlipConfig,
    snapshots: SnapshotMap,
    scheduler: S,
    in_flight: FxHashMap<String, InFlight<E>>,
}

impl<E, S> FlipAnimation<E, S>
where
    E: Element + Animate + 'static,
    S: Scheduler + 'static,
{
    pub fn new(scheduler: S) -> Self {
        Self::with_config(scheduler, FlipConfig::default())
    }

    pub fn with_config(scheduler: S, config: FlipConfig) -> Self {
        Self {
            config,
            snapshots: SnapshotMap::new(),
            scheduler,
            in_flight: FxHashMap::default(),
        }
    }

    pub fn config(&self) -> &FlipConfig {
        &self.config
    }

    /// Changes apply to animations started afterwards. Detachments already
    /// scheduled keep the duration they were scheduled with.
    pub fn config_mut(&mut self) -> &mut FlipConfig {
        &mut self.config
    }

    pub fn set_duration(&mut self, duration_ms: u32) {
        self.config.duration_ms = duration_ms;
    }

    pub fn snapshots(&self) -> &SnapshotMap {
        &self.snapshots
    }

    pub fn snapshot(&self, key: &str) -> Option<Rect> {
        self.snapshots.get(key)
    }

    /// Forget every recorded position.
    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    // =========================================================================
    // First
    // =========================================================================

    /// Record the current box of each element under its key.
    ///
    /// Must run before the layout change being animated. A key read twice
    /// keeps its latest box. Elements without an `id` are skipped.
    pub fn read(&mut self, elements: &[E]) -> Result<()> {
        let mut measured = Vec::with_capacity(elements.len());
        for element in elements {
            match element.key() {
                Some(key) => measured.push((key, element.bounding_rect())),
                None => tracing::warn!("element without an id is not tracked: {:?}", element),
            }
        }

        if self.config.key_validation != KeyValidation::Off {
            let duplicates = duplicate_keys(measured.iter().map(|(key, _)| key.as_str()));
            if let Some(key) = duplicates.first() {
                if self.config.key_validation == KeyValidation::Strict {
                    return Err(FlipError::DuplicateKey { key: key.clone() });
                }
                tracing::warn!(?duplicates, "duplicate keys in one read, last one wins");
            }
        }

        for (key, rect) in measured {
            tracing::trace!(%key, ?rect, "snapshot");
            self.snapshots.insert(key, rect);
        }
        Ok(())
    }

    // =========================================================================
    // Last, Invert, Play
    // =========================================================================

    /// Animate each element from its recorded box to where it is now.
    ///
    /// Elements with no recorded box enter from above instead.
    pub fn play(&mut self, elements: &[E]) {
        let options = self.config.animation_options();
        for element in elements {
            self.play_one(element, &options);
        }
    }

    fn play_one(&mut self, element: &E, options: &AnimationOptions) {
        let current = element.bounding_rect();
        let previous = element.key().and_then(|key| self.snapshots.get(&key));

        let keyframes = match previous {
            Some(previous) => {
                let from = invert(&previous, &current);
                tracing::debug!(
                    "move {}: {} -> none",
                    element::describe(element),
                    from.css()
                );
                AnimationPreset::invert(from)
            }
            None => {
                tracing::debug!("entrance {}", element::describe(element));
                AnimationPreset::enter_from_above(self.config.offset_px)
            }
        };

        self.settle_previous(element);
        let playback = element.animate(&keyframes, options);
        self.track(element, playback, None);
    }

    // =========================================================================
    // Removal
    // =========================================================================

    /// Animate elements out, then detach them.
    ///
    /// Every element is first re-appended to its parent so it is laid out
    /// while it fades away; positions are measured once all are in place.
    /// Fails before touching the tree if any element has no parent.
    /// Detachment waits for the duration configured at call time,
    /// or for the exit animation to finish with
    /// [`RemovalStrategy::AnimationFinished`].
    pub fn remove(&mut self, elements: &[E]) -> Result<RemovalHandle<E, S>> {
        let parents = elements
            .iter()
            .map(element::require_parent)
            .collect::<glissade_core::Result<Vec<_>>>()?;

        let options = self.config.animation_options();
        let strategy = self.config.removal;
        let completion = Completion::new(elements.len());
        let mut tasks = Vec::with_capacity(elements.len());

        for (element, parent) in elements.iter().zip(&parents) {
            parent.append_child(element);
        }

        for element in elements {
            let current = element.bounding_rect();
            let key = element::describe(element);
            let previous = match element.key().and_then(|key| self.snapshots.get(&key)) {
                Some(rect) => rect,
                None => {
                    tracing::warn!("removing {} without a recorded position", key);
                    current
                }
            };
            let delta = current.delta_from(&previous);

            self.settle_previous(element);
            let keyframes = AnimationPreset::exit_upward(delta.x, delta.y, self.config.offset_px);
            let playback = element.animate(&keyframes, &options);

            let task = DetachTask::new(key.clone(), element.clone(), completion.clone());
            match strategy {
                RemovalStrategy::Timer => {
                    let fire = Rc::clone(&task);
                    let id = self
                        .scheduler
                        .set_timeout(options.duration_ms, Box::new(move || fire.fire()));
                    task.set_timer(id);
                    tracing::debug!("remove {}: detach in {}ms", key, options.duration_ms);
                }
                RemovalStrategy::AnimationFinished => {
                    let fire = Rc::clone(&task);
                    playback.on_finish(Box::new(move || fire.fire()));
                    tracing::debug!("remove {}: detach when the exit animation ends", key);
                }
            }

            self.track(element, playback, Some(Rc::clone(&task)));
            tasks.push(task);
        }

        Ok(RemovalHandle::new(tasks, completion, self.scheduler.clone()))
    }

    /// Swap `old` for `new` under the parent of `old[0]`.
    ///
    /// Old elements sharing a key with a new element are detached at once
    /// and the new element moves from the old one's box. The remaining old
    /// elements are removed with an exit animation, and every new element
    /// is played.
    pub fn replace(&mut self, old: &[E], new: &[E]) -> Result<RemovalHandle<E, S>> {
        let first = old.first().ok_or(FlipError::EmptyReplace)?;
        let parent = element::require_parent(first)?;
        for element in &old[1..] {
            element::require_parent(element)?;
        }

        // A node listed twice is swapped out once.
        let mut unique: Vec<E> = Vec::with_capacity(old.len());
        for element in old {
            if !unique.iter().any(|seen| seen.same_node(element)) {
                unique.push(element.clone());
            }
        }
        let old = unique.as_slice();

        self.read(old)?;
        for element in new {
            parent.append_child(element);
        }

        let new_keys: Vec<String> = new.iter().filter_map(|element| element.key()).collect();
        let mut leaving = Vec::new();
        for element in old {
            if new.iter().any(|candidate| candidate.same_node(element)) {
                // Re-appended above as part of the new set.
                continue;
            }
            let shared = element
                .key()
                .is_some_and(|key| new_keys.iter().any(|k| *k == key));
            if shared {
                tracing::debug!(
                    "replace {}: detached, new element takes over",
                    element::describe(element)
                );
                element::detach(element)?;
            } else {
                leaving.push(element.clone());
            }
        }

        let handle = self.remove(&leaving)?;
        self.play(new);
        Ok(handle)
    }

    // =========================================================================
    // In-flight tracking
    // =========================================================================

    /// Cancel the animation and pending detachment last started for this
    /// node, when `cancel_in_flight` is set.
    fn settle_previous(&mut self, element: &E) {
        if !self.config.cancel_in_flight {
            return;
        }
        let Some(key) = element.key() else {
            return;
        };
        let Some(previous) = self.in_flight.remove(&key) else {
            return;
        };
        if !previous.element.same_node(element) {
            return;
        }
        if !previous.playback.is_finished() {
            previous.playback.cancel();
        }
        if let Some(task) = previous.detach {
            if task.cancel(&self.scheduler) {
                tracing::debug!("cancelled pending detachment of {}", key);
            }
        }
    }

    fn track(&mut self, element: &E, playback: E::Playback, detach: Option<Rc<DetachTask<E>>>) {
        if !self.config.cancel_in_flight {
            return;
        }
        if let Some(key) = element.key() {
            self.in_flight.insert(
                key,
                InFlight {
                    element: element.clone(),
                    playback,
                    detach,
                },
            );
        }
    }
}

/// Transform that renders an element laid out at `current` where
/// `previous` was.
///
/// A collapsed target dimension keeps a scale factor of 1.
pub fn invert(previous: &Rect, current: &Rect) -> Transform {
    let delta = current.delta_from(previous);
    Transform::translate(delta.x, delta.y).with_scale(
        scale_factor(previous.width(), current.width()),
        scale_factor(previous.height(), current.height()),
    )
}

fn scale_factor(previous: f32, current: f32) -> f32 {
    let factor = previous / current;
    if current == 0.0 || !factor.is_finite() {
        tracing::debug!(previous, current, "degenerate target size, scale clamped to 1");
        return 1.0;
    }
    factor
}
