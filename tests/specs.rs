// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! End-to-end scenarios exercising a full `Engine` run against the
//! built-in component set, rather than any single module in isolation.

use serde_json::json;
use vap_document::PipelineDocument;
use vap_engine::{Engine, StartOutcome};

/// Mirrors the daemon's subscriber setup, minus file rotation: tests have
/// no long-lived process to roll logs for, just a `RUST_LOG`-driven filter
/// on stderr. `try_init` so repeated test binaries in the same process
/// don't panic on a second global subscriber.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn document(value: serde_json::Value) -> PipelineDocument {
    serde_json::from_value(value).expect("test document is well-formed")
}

async fn run(doc: PipelineDocument) -> (bool, vap_engine::RunOutcome, Engine) {
    init_tracing();
    let mut engine = Engine::with_builtins();
    engine.load_pipeline(doc).unwrap();
    let outcome = match engine.start(false).await.unwrap() {
        StartOutcome::Completed(outcome) => outcome,
        StartOutcome::Spawned(_) => panic!("expected a synchronous run"),
    };
    let success = outcome.success;
    (success, outcome, engine)
}

#[tokio::test]
async fn literal_variable_resolution() {
    let doc = document(json!({
        "variables": {"greeting": "Hi"},
        "steps": [
            {"name": "greet", "type": "component", "component": "variable_set",
             "params": {"name": "msg", "value": "${variables.greeting}, world"}}
        ]
    }));

    let (success, outcome, engine) = run(doc).await;
    assert!(success);
    assert_eq!(outcome.results.get("greet"), Some(&json!("Hi, world")));
    assert_eq!(engine.context().and_then(|c| c.variables.get("msg")), Some(&json!("Hi, world")));
}

#[tokio::test]
async fn conditional_skip() {
    let doc = document(json!({
        "steps": [
            {"name": "s1", "type": "component", "component": "variable_set", "if": "1 == 2",
             "params": {"name": "a", "value": 1}},
            {"name": "s2", "type": "component", "component": "variable_set",
             "params": {"name": "b", "value": 2}}
        ]
    }));

    let (success, outcome, engine) = run(doc).await;
    assert!(success);
    assert!(!outcome.results.contains_key("s1"));
    assert_eq!(engine.context().and_then(|c| c.variables.get("b")), Some(&json!(2)));
}

#[tokio::test]
async fn loop_count_tracks_iterations_and_index() {
    let doc = document(json!({
        "steps": [
            {"name": "iterate", "type": "component", "component": "loop", "params": {
                "type": "count",
                "iterations": 3,
                "steps": [
                    {"type": "component", "component": "variable_set",
                     "params": {"name": "x", "value": "${variables.loop_index}"}}
                ]
            }}
        ]
    }));

    let (success, outcome, engine) = run(doc).await;
    assert!(success);
    assert_eq!(outcome.results.get("iterate").unwrap()["iterations"], json!(3));
    let vars = &engine.context().unwrap().variables;
    assert_eq!(vars.get("x"), Some(&json!("2")));
    assert_eq!(vars.get("loop_index"), Some(&json!("2")));
}

#[tokio::test]
async fn failure_with_continue_on_error_proceeds() {
    let doc = document(json!({
        "steps": [
            {"name": "fails", "type": "shell", "command": "exit 1", "continue_on_error": true},
            {"name": "s2", "type": "component", "component": "variable_set",
             "params": {"name": "ok", "value": "1"}}
        ]
    }));

    let (success, outcome, engine) = run(doc).await;
    assert!(success);
    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(engine.context().and_then(|c| c.variables.get("ok")), Some(&json!("1")));
}

#[tokio::test]
async fn failure_without_continue_on_error_aborts() {
    let doc = document(json!({
        "steps": [
            {"name": "fails", "type": "shell", "command": "exit 1"},
            {"name": "s2", "type": "component", "component": "variable_set",
             "params": {"name": "ok", "value": "1"}}
        ]
    }));

    let (success, outcome, _engine) = run(doc).await;
    assert!(!success);
    assert!(!outcome.results.contains_key("s2"));
}

#[tokio::test]
async fn sub_pipeline_export_adds_only_absent_keys() {
    let dir = tempfile::tempdir().unwrap();
    let sub_path = dir.path().join("sub.json");
    let sub_document = json!({
        "steps": [
            {"type": "component", "component": "variable_set", "params": {"name": "b", "value": 2}},
            {"type": "component", "component": "variable_set", "params": {"name": "a", "value": 9}}
        ]
    });
    std::fs::write(&sub_path, serde_json::to_string(&sub_document).unwrap()).unwrap();

    let doc = document(json!({
        "variables": {"a": 1},
        "steps": [
            {"name": "sub", "type": "pipeline", "path": sub_path.to_string_lossy(), "export_variables": true}
        ]
    }));

    let (success, _outcome, engine) = run(doc).await;
    assert!(success);
    let vars = &engine.context().unwrap().variables;
    assert_eq!(vars.get("a"), Some(&json!(1)));
    assert_eq!(vars.get("b"), Some(&json!(2)));
}

#[tokio::test]
async fn cancellation_stops_after_at_most_one_more_step() {
    let doc = document(json!({
        "steps": [
            {"name": "s1", "type": "shell", "command": "sleep 0.1"},
            {"name": "s2", "type": "shell", "command": "echo should_not_run"},
            {"name": "s3", "type": "shell", "command": "echo also_should_not_run"}
        ]
    }));

    init_tracing();
    let mut engine = Engine::with_builtins();
    engine.load_pipeline(doc).unwrap();
    let handle = match engine.start(true).await.unwrap() {
        StartOutcome::Spawned(handle) => handle,
        StartOutcome::Completed(_) => panic!("expected a spawned run"),
    };
    handle.cancel();
    let outcome = handle.join(&mut engine).await.unwrap();
    assert!(!outcome.success);
    assert!(outcome.results.len() <= 1);

    // the engine left `Running` and can be reloaded instead of staying stranded.
    let doc = document(json!({
        "steps": [{"name": "s1", "type": "component", "component": "variable_set",
                   "params": {"name": "ok", "value": 1}}]
    }));
    engine.load_pipeline(doc).unwrap();
    let outcome = match engine.start(false).await.unwrap() {
        StartOutcome::Completed(outcome) => outcome,
        StartOutcome::Spawned(_) => panic!("expected a synchronous run"),
    };
    assert!(outcome.success);
}
