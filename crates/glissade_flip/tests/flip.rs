//! FLIP engine driven against the headless host

use std::cell::Cell;
use std::rc::Rc;

use glissade_animation::{Easing, FillMode, Keyframe, TimerQueue, Transform};
use glissade_core::{Document, Element};
use glissade_flip::{
    DetachStatus, FlipAnimation, FlipConfig, FlipError, KeyValidation, RemovalStrategy,
};
use glissade_headless::{HeadlessDocument, HeadlessElement};
use pretty_assertions::assert_eq;

type Flip = FlipAnimation<HeadlessElement, TimerQueue>;

struct Fixture {
    document: HeadlessDocument,
    list: HeadlessElement,
    flip: Flip,
}

impl Fixture {
    fn new(keys: &[&str]) -> Self {
        Self::with_config(keys, FlipConfig::default())
    }

    fn with_config(keys: &[&str], config: FlipConfig) -> Self {
        let document = HeadlessDocument::new();
        let list = document.body().append_new("ul");
        for key in keys {
            list.append_child(&document.create_block(key, 40.0));
        }
        let flip = FlipAnimation::with_config(document.timers(), config);
        Self {
            document,
            list,
            flip,
        }
    }

    fn get(&self, key: &str) -> HeadlessElement {
        self.document.element_by_id(key).unwrap()
    }

    fn items(&self) -> Vec<HeadlessElement> {
        self.list.children()
    }

    fn start_of(&self, element: &HeadlessElement) -> Keyframe {
        self.document.last_animation(element).unwrap().start()
    }

    fn end_of(&self, element: &HeadlessElement) -> Keyframe {
        self.document.last_animation(element).unwrap().end()
    }
}

fn entrance() -> (Keyframe, Keyframe) {
    (
        Keyframe::transform(Transform::translate(0.0, -30.0)).with_opacity(0.0),
        Keyframe::transform(Transform::IDENTITY).with_opacity(1.0),
    )
}

// =============================================================================
// play
// =============================================================================

#[test]
fn moved_elements_start_at_their_previous_box() {
    let mut fx = Fixture::new(&["a", "b", "c"]);
    let items = fx.items();
    fx.flip.read(&items).unwrap();

    // a moves to the end: b and c shift up, a drops by two rows
    fx.list.append_child(&fx.get("a"));
    fx.flip.play(&items);

    assert_eq!(
        fx.start_of(&fx.get("a")).transform,
        Some(Transform::translate(0.0, -80.0))
    );
    assert_eq!(
        fx.start_of(&fx.get("b")).transform,
        Some(Transform::translate(0.0, 40.0))
    );
    assert_eq!(
        fx.end_of(&fx.get("c")).transform,
        Some(Transform::IDENTITY)
    );
    assert_eq!(fx.start_of(&fx.get("c")).opacity, None);
}

#[test]
fn resized_elements_scale_from_previous_size() {
    let mut fx = Fixture::new(&["a"]);
    let a = fx.get("a");
    fx.flip.read(&[a.clone()]).unwrap();

    a.set_style("height", "80px");
    fx.flip.play(&[a.clone()]);

    let start = fx.start_of(&a).resolved_transform();
    assert_eq!(start.scale_x, 1.0);
    assert_eq!(start.scale_y, 0.5);
    assert_eq!((start.translate_x, start.translate_y), (0.0, 0.0));
}

#[test]
fn animations_use_configured_timing() {
    let mut fx = Fixture::new(&["a"]);
    let a = fx.get("a");
    fx.flip.play(&[a.clone()]);

    let record = fx.document.last_animation(&a).unwrap();
    assert_eq!(record.options.duration_ms, 500);
    assert_eq!(record.options.easing, Easing::EaseInOut);
    assert_eq!(record.options.fill, FillMode::Both);
}

#[test]
fn unread_elements_enter_from_above() {
    let mut fx = Fixture::new(&["a", "b"]);
    let a = fx.get("a");
    fx.flip.read(&[a]).unwrap();

    let fresh = fx.document.create_block("fresh", 10.0);
    fx.list.append_child(&fresh);
    let b = fx.get("b");
    fx.flip.play(&[b, fresh.clone()]);

    let (start, end) = entrance();
    for element in [fx.get("b"), fresh] {
        assert_eq!(fx.start_of(&element), start);
        assert_eq!(fx.end_of(&element), end);
    }
}

#[test]
fn play_without_read_is_all_entrances() {
    let mut fx = Fixture::new(&["a", "b"]);
    let items = fx.items();
    fx.flip.play(&items);

    let (start, _) = entrance();
    assert_eq!(fx.document.animations().len(), 2);
    assert!(fx
        .document
        .animations()
        .iter()
        .all(|record| record.start() == start));
}

#[test]
fn unchanged_layout_plays_identity() {
    let mut fx = Fixture::new(&["a", "b"]);
    let items = fx.items();
    fx.flip.read(&items).unwrap();
    fx.flip.play(&items);

    for item in &items {
        assert_eq!(fx.start_of(item).transform, Some(Transform::IDENTITY));
    }
}

#[test]
fn second_read_wins() {
    let mut fx = Fixture::new(&["a", "b"]);
    let a = fx.get("a");
    fx.flip.read(&[a.clone()]).unwrap();
    fx.list.append_child(&a);
    fx.flip.read(&[a.clone()]).unwrap();

    assert_eq!(fx.flip.snapshots().len(), 1);
    assert_eq!(fx.flip.snapshot("a").unwrap().y(), 40.0);
}

#[test]
fn collapsed_target_keeps_unit_scale() {
    let mut fx = Fixture::new(&["a", "b"]);
    let items = fx.items();
    fx.flip.read(&items).unwrap();

    fx.get("a").set_style("height", "0px");
    fx.flip.play(&items);

    let start = fx.start_of(&fx.get("a")).resolved_transform();
    assert_eq!(start.scale_y, 1.0);
    assert!(start.scale_x.is_finite());
    assert_eq!(
        fx.start_of(&fx.get("b")).transform,
        Some(Transform::translate(0.0, 40.0))
    );
}

#[test]
fn unkeyed_elements_are_never_stored() {
    let mut fx = Fixture::new(&["a"]);
    let anonymous = fx.list.append_new("li");
    anonymous.set_intrinsic_height(10.0);
    let a = fx.get("a");
    fx.flip.read(&[anonymous.clone(), a]).unwrap();

    assert_eq!(fx.flip.snapshots().len(), 1);
    fx.flip.play(&[anonymous.clone()]);
    assert_eq!(fx.start_of(&anonymous), entrance().0);
}

#[test]
fn strict_validation_rejects_duplicate_keys() {
    let config = FlipConfig::default().with_key_validation(KeyValidation::Strict);
    let mut fx = Fixture::with_config(&["a", "b"], config);
    let twin = fx.document.create_block("a", 40.0);
    fx.list.append_child(&twin);

    let items = fx.items();
    let err = fx.flip.read(&items).unwrap_err();
    assert_eq!(err, FlipError::DuplicateKey { key: "a".into() });
    assert!(fx.flip.snapshots().is_empty());
}

#[test]
fn lenient_validation_keeps_last_duplicate() {
    let config = FlipConfig::default().with_key_validation(KeyValidation::Warn);
    let mut fx = Fixture::with_config(&["a", "b"], config);
    let twin = fx.document.create_block("a", 40.0);
    fx.list.append_child(&twin);

    let items = fx.items();
    fx.flip.read(&items).unwrap();
    assert_eq!(fx.flip.snapshot("a").unwrap().y(), 80.0);
}

// =============================================================================
// remove
// =============================================================================

#[test]
fn remove_fades_out_then_detaches_once() {
    let mut fx = Fixture::new(&["a", "b", "c"]);
    let items = fx.items();
    fx.flip.read(&items).unwrap();

    let b = fx.get("b");
    let handle = fx.flip.remove(&[b.clone()]).unwrap();

    // re-appended at the end while it fades: it was at 40, is now at 80
    assert_eq!(fx.list.child_keys(), vec!["a", "c", "b"]);
    assert_eq!(
        fx.start_of(&b),
        Keyframe::transform(Transform::translate(0.0, -40.0)).with_opacity(1.0)
    );
    assert_eq!(
        fx.end_of(&b),
        Keyframe::transform(Transform::translate(0.0, -70.0)).with_opacity(0.0)
    );

    fx.document.advance(499);
    assert!(b.is_attached());
    assert!(!handle.is_complete());
    assert_eq!(handle.status("b"), Some(DetachStatus::Pending));

    fx.document.advance(1);
    assert!(!b.is_attached());
    assert!(handle.is_complete());
    assert_eq!(handle.detached(), vec!["b"]);

    fx.document.run_until_idle();
    assert!(handle.errors().is_empty());
    assert_eq!(fx.list.child_keys(), vec!["a", "c"]);
}

#[test]
fn removal_delay_is_fixed_at_call_time() {
    let mut fx = Fixture::new(&["a"]);
    let a = fx.get("a");
    fx.flip.read(&[a.clone()]).unwrap();
    let handle = fx.flip.remove(&[a.clone()]).unwrap();

    fx.flip.set_duration(100);
    fx.document.advance(100);
    assert!(a.is_attached());

    fx.document.advance(400);
    assert!(!a.is_attached());
    assert!(handle.is_complete());
}

#[test]
fn removing_a_detached_element_fails_before_mutating() {
    let mut fx = Fixture::new(&["a", "b"]);
    let orphan = fx.document.create_block("orphan", 40.0);
    let items = fx.items();
    fx.flip.read(&items).unwrap();

    let err = fx.flip.remove(&[items[0].clone(), orphan]).unwrap_err();

    assert_eq!(
        err,
        FlipError::DetachedElement {
            key: "orphan".into()
        }
    );
    assert_eq!(fx.list.child_keys(), vec!["a", "b"]);
    assert!(fx.document.animations().is_empty());
    assert_eq!(fx.document.timers().pending_count(), 0);
}

#[test]
fn detachment_of_an_already_detached_element_is_recorded() {
    let mut fx = Fixture::new(&["a"]);
    let a = fx.get("a");
    fx.flip.read(&[a.clone()]).unwrap();
    let handle = fx.flip.remove(&[a.clone()]).unwrap();

    fx.list.remove_child(&a).unwrap();
    fx.document.advance(500);

    assert!(handle.is_complete());
    assert_eq!(handle.status("a"), Some(DetachStatus::Failed));
    assert_eq!(
        handle.errors(),
        vec![FlipError::DetachedElement { key: "a".into() }]
    );
}

#[test]
fn remove_without_snapshot_fades_in_place() {
    let mut fx = Fixture::new(&["a", "b"]);
    let b = fx.get("b");
    fx.flip.remove(&[b.clone()]).unwrap();

    assert_eq!(
        fx.start_of(&b),
        Keyframe::transform(Transform::IDENTITY).with_opacity(1.0)
    );
}

#[test]
fn cancelled_removal_keeps_elements() {
    let mut fx = Fixture::new(&["a", "b"]);
    let items = fx.items();
    fx.flip.read(&items).unwrap();
    let handle = fx.flip.remove(&items).unwrap();

    assert_eq!(handle.len(), 2);
    assert_eq!(handle.cancel(), 2);
    assert!(handle.is_complete());
    fx.document.run_until_idle();

    assert!(items.iter().all(HeadlessElement::is_attached));
    assert_eq!(handle.status_of(&items[0]), Some(DetachStatus::Cancelled));
    assert_eq!(handle.cancel(), 0);
}

#[test]
fn animation_finished_strategy_waits_for_the_exit_animation() {
    let config = FlipConfig::default()
        .with_duration(200)
        .with_removal(RemovalStrategy::AnimationFinished);
    let mut fx = Fixture::with_config(&["a"], config);
    let a = fx.get("a");
    fx.flip.read(&[a.clone()]).unwrap();
    let handle = fx.flip.remove(&[a.clone()]).unwrap();

    fx.document.advance(199);
    assert!(a.is_attached());
    fx.document.advance(1);
    assert!(!a.is_attached());
    assert_eq!(handle.detached(), vec!["a"]);
}

#[test]
fn completion_listeners_run_after_last_detachment() {
    let mut fx = Fixture::new(&["a", "b"]);
    let items = fx.items();
    fx.flip.read(&items).unwrap();
    let handle = fx.flip.remove(&items).unwrap();

    let done = Rc::new(Cell::new(false));
    let flag = done.clone();
    handle.on_complete(move || flag.set(true));

    assert_eq!(handle.pending(), 2);
    fx.document.advance(500);
    assert!(done.get());
}

// =============================================================================
// in-flight cancellation
// =============================================================================

#[test]
fn replaying_cancels_pending_removal_when_enabled() {
    let config = FlipConfig::default().with_cancel_in_flight(true);
    let mut fx = Fixture::with_config(&["a", "b"], config);
    let items = fx.items();
    fx.flip.read(&items).unwrap();

    let b = fx.get("b");
    let handle = fx.flip.remove(&[b.clone()]).unwrap();
    let exit = fx.document.last_animation(&b).unwrap();
    fx.flip.play(&[b.clone()]);

    assert!(exit.is_cancelled());
    assert_eq!(handle.status("b"), Some(DetachStatus::Cancelled));
    fx.document.run_until_idle();
    assert!(b.is_attached());
}

#[test]
fn overlapping_animations_are_kept_by_default() {
    let mut fx = Fixture::new(&["a"]);
    let a = fx.get("a");
    fx.flip.play(&[a.clone()]);
    fx.flip.play(&[a.clone()]);

    let records = fx.document.animations_for(&a);
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|record| !record.is_cancelled()));
}

// =============================================================================
// replace
// =============================================================================

#[test]
fn replace_routes_old_and_new_elements() {
    let mut fx = Fixture::new(&["a", "b"]);
    let old = fx.items();
    let old_b = fx.get("b");
    let new_b = fx.document.create_block("b", 40.0);
    let c = fx.document.create_block("c", 40.0);

    let handle = fx.flip.replace(&old, &[new_b.clone(), c.clone()]).unwrap();

    // old b leaves at once, without an animation of its own
    assert!(!old_b.is_attached());
    assert!(fx.document.animations_for(&old_b).is_empty());

    // a fades out and is detached later
    let a = old[0].clone();
    assert_eq!(fx.end_of(&a).opacity, Some(0.0));
    assert_eq!(handle.len(), 1);

    // new b moves from old b's box (y 40) to its own (y 0)
    assert_eq!(new_b.bounding_rect().y(), 0.0);
    assert_eq!(
        fx.start_of(&new_b).transform,
        Some(Transform::translate(0.0, 40.0))
    );

    // c has no snapshot and enters
    assert_eq!(fx.start_of(&c), entrance().0);

    fx.document.advance(500);
    assert!(!a.is_attached());
    assert_eq!(fx.list.child_keys(), vec!["b", "c"]);
}

#[test]
fn replace_keeps_reused_nodes() {
    let mut fx = Fixture::new(&["a", "b"]);
    let old = fx.items();
    let b = fx.get("b");
    let c = fx.document.create_block("c", 40.0);

    fx.flip.replace(&old, &[b.clone(), c]).unwrap();
    fx.document.run_until_idle();

    assert!(b.is_attached());
    assert_eq!(fx.list.child_keys(), vec!["b", "c"]);
}

#[test]
fn replace_swaps_a_repeated_old_element_once() {
    let config = FlipConfig::default().with_key_validation(KeyValidation::Strict);
    let mut fx = Fixture::with_config(&["a", "b"], config);
    let a = fx.get("a");
    let old_b = fx.get("b");
    let new_b = fx.document.create_block("b", 40.0);
    let c = fx.document.create_block("c", 40.0);

    let handle = fx
        .flip
        .replace(&[a.clone(), old_b.clone(), old_b.clone()], &[new_b.clone(), c])
        .unwrap();

    assert!(!old_b.is_attached());
    assert_eq!(handle.len(), 1);
    assert_eq!(
        fx.start_of(&new_b).transform,
        Some(Transform::translate(0.0, 40.0))
    );

    fx.document.advance(500);
    assert!(!a.is_attached());
    assert_eq!(fx.list.child_keys(), vec!["b", "c"]);
}

#[test]
fn replace_requires_old_elements() {
    let mut fx = Fixture::new(&["a"]);
    let a = fx.get("a");
    let err = fx.flip.replace(&[], &[a]).unwrap_err();
    assert_eq!(err, FlipError::EmptyReplace);
}

#[test]
fn replace_requires_attached_old_elements() {
    let mut fx = Fixture::new(&[]);
    let orphan = fx.document.create_block("orphan", 40.0);
    let fresh = fx.document.create_block("fresh", 40.0);

    let err = fx.flip.replace(&[orphan], &[fresh.clone()]).unwrap_err();
    assert!(matches!(err, FlipError::DetachedElement { .. }));
    assert!(fresh.parent().is_none());
}
