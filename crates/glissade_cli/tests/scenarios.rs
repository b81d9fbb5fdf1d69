//! Scenario runs end to end

use glissade_cli::{run_scenario, GlissadeConfig, ReportStatus, Scenario, ScenarioRunner};
use glissade_core::Element;
use glissade_flip::RemovalStrategy;
use pretty_assertions::assert_eq;

fn run(input: &str) -> glissade_cli::ScenarioReport {
    run_scenario(input, &GlissadeConfig::default())
        .unwrap()
        .report()
        .clone()
}

#[test]
fn reorder_plays_inverted_moves() {
    let report = run(r#"{
        "items": [{ "id": "a" }, { "id": "b" }, { "id": "c" }],
        "steps": [
            { "type": "read" },
            { "type": "move", "id": "c", "index": 0 },
            { "type": "play" },
            { "type": "assert_animation", "id": "a",
              "start": "transform: translate(0px, -40px)", "end": "transform: none" },
            { "type": "assert_animation", "id": "c",
              "start": "transform: translate(0px, 80px)" },
            { "type": "advance", "ms": 500 }
        ]
    }"#);

    assert_eq!(report.status, ReportStatus::Passed);
    assert_eq!(report.elapsed_ms, 500);
    let keys: Vec<_> = report
        .animations
        .iter()
        .map(|entry| entry.key.clone().unwrap_or_default())
        .collect();
    assert_eq!(keys, vec!["c", "a", "b"]);
    assert_eq!(report.animations[2].start, "transform: translate(0px, -40px)");
    assert_eq!(report.animations[0].duration_ms, 500);
}

#[test]
fn removal_detaches_after_the_duration() {
    let report = run(r#"{
        "items": [{ "id": "a" }, { "id": "b" }, { "id": "c" }],
        "steps": [
            { "type": "read" },
            { "type": "remove", "ids": ["b"] },
            { "type": "assert_animation", "id": "b",
              "start": "transform: translate(0px, -40px); opacity: 1",
              "end": "transform: translate(0px, -70px); opacity: 0" },
            { "type": "advance", "ms": 499 },
            { "type": "assert_attached", "id": "b" },
            { "type": "advance", "ms": 1 },
            { "type": "assert_detached", "id": "b" }
        ]
    }"#);
    assert_eq!(report.status, ReportStatus::Passed);
    assert_eq!(report.elapsed_ms, 500);
}

#[test]
fn insert_enters_from_above() {
    let report = run(r#"{
        "items": [{ "id": "a" }, { "id": "b" }],
        "steps": [
            { "type": "read" },
            { "type": "insert", "id": "n", "height": 20, "index": 1 },
            { "type": "play" },
            { "type": "assert_animation", "id": "n",
              "start": "transform: translate(0px, -30px); opacity: 0",
              "end": "transform: none; opacity: 1" },
            { "type": "assert_animation", "id": "b",
              "start": "transform: translate(0px, -20px)" }
        ]
    }"#);
    assert_eq!(report.status, ReportStatus::Passed);
}

#[test]
fn replace_detaches_shared_keys_at_once() {
    let report = run(r#"{
        "items": [{ "id": "a" }, { "id": "b" }],
        "steps": [
            { "type": "replace", "old": ["a", "b"], "new": [{ "id": "b", "height": 40 }, { "id": "c" , "height": 40 }] },
            { "type": "assert_attached", "id": "a" },
            { "type": "assert_attached", "id": "b" },
            { "type": "settle" },
            { "type": "assert_detached", "id": "a" },
            { "type": "assert_attached", "id": "c" }
        ]
    }"#);
    assert_eq!(report.status, ReportStatus::Passed);
}

#[test]
fn failed_assertion_reports_the_step() {
    let report = run(r#"{
        "items": [{ "id": "a" }],
        "steps": [
            { "type": "read" },
            { "type": "remove", "ids": ["a"] },
            { "type": "advance", "ms": 100 },
            { "type": "assert_detached", "id": "a" },
            { "type": "settle" }
        ]
    }"#);
    assert_eq!(report.status, ReportStatus::Failed);
    assert_eq!(report.failed_step_index, Some(3));
    assert_eq!(report.step.as_deref(), Some("assert_detached"));
    assert_eq!(report.code.as_deref(), Some("attached"));
    assert_eq!(report.elapsed_ms, 100);
    assert_eq!(report.animations.len(), 1);
}

#[test]
fn engine_errors_fail_the_step() {
    let report = run(r#"{
        "items": [{ "id": "a" }],
        "steps": [
            { "type": "detach", "ids": ["a"] },
            { "type": "remove", "ids": ["a"] }
        ]
    }"#);
    assert_eq!(report.failed_step_index, Some(1));
    assert_eq!(report.code.as_deref(), Some("detached_element"));

    let report = run(r#"{ "steps": [{ "type": "play", "ids": ["ghost"] }] }"#);
    assert_eq!(report.code.as_deref(), Some("missing_element"));
}

#[test]
fn config_selects_removal_strategy() {
    let mut config = GlissadeConfig::from_toml(
        r#"
        [flip]
        duration_ms = 200
        removal = "animation-finished"
        "#,
    )
    .unwrap();
    assert_eq!(config.flip.removal, RemovalStrategy::AnimationFinished);
    config.viewport.width = 300.0;

    let scenario = Scenario::from_json(
        r#"{
            "items": [{ "id": "a" }],
            "steps": [
                { "type": "read" },
                { "type": "remove", "ids": ["a"] },
                { "type": "advance", "ms": 200 }
            ]
        }"#,
    )
    .unwrap();
    let mut runner = ScenarioRunner::new(&scenario.items, &config);
    let outcome = runner.run(&scenario.steps);

    assert!(!outcome.is_failed());
    assert_eq!(runner.list().bounding_rect().width(), 300.0);
    assert_eq!(runner.removals().len(), 1);
    assert!(runner.removals()[0].is_complete());
    assert_eq!(runner.removals()[0].detached(), vec!["a".to_string()]);
}

#[test]
fn bundled_scenario_passes() {
    let report = run(include_str!("../scenarios/reorder.json"));
    assert_eq!(report.status, ReportStatus::Passed, "{report:?}");
    assert_eq!(report.elapsed_ms, 1000);
}
