// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::{json, Map};
use vap_document::{PipelineDocument, Step, StepKind};

fn shell_step(command: &str) -> Step {
    Step { name: None, guard: None, continue_on_error: false, kind: StepKind::Shell { command: command.into(), working_dir: None, ignore_errors: false } }
}

fn document(steps: Vec<Step>) -> PipelineDocument {
    PipelineDocument { name: None, description: None, version: None, variables: Map::new(), steps }
}

#[tokio::test]
async fn start_without_loading_is_a_state_error() {
    let mut engine = Engine::new(ComponentRegistry::new());
    let err = engine.start(false).await.unwrap_err();
    assert!(matches!(err, EngineError::State(_)));
}

#[tokio::test]
async fn runs_all_steps_synchronously_and_completes() {
    let mut engine = Engine::new(ComponentRegistry::new());
    engine.load_pipeline(document(vec![shell_step("echo one"), shell_step("echo two")])).unwrap();

    let outcome = match engine.start(false).await.unwrap() {
        StartOutcome::Completed(outcome) => outcome,
        StartOutcome::Spawned(_) => panic!("expected a synchronous run"),
    };

    assert!(outcome.success);
    assert_eq!(outcome.results.len(), 2);
}

#[tokio::test]
async fn a_failing_step_aborts_the_run() {
    let mut engine = Engine::new(ComponentRegistry::new());
    engine.load_pipeline(document(vec![shell_step("exit 1"), shell_step("echo unreachable")])).unwrap();

    let outcome = match engine.start(false).await.unwrap() {
        StartOutcome::Completed(outcome) => outcome,
        StartOutcome::Spawned(_) => panic!("expected a synchronous run"),
    };

    assert!(!outcome.success);
    assert_eq!(outcome.results.len(), 0);
    assert_eq!(outcome.errors.len(), 1);
}

#[tokio::test]
async fn seed_variables_populates_the_loaded_context() {
    let mut engine = Engine::new(ComponentRegistry::new());
    engine.load_pipeline(document(Vec::new())).unwrap();

    let mut extra = Map::new();
    extra.insert("name".into(), json!("ada"));
    engine.seed_variables(&extra);

    assert_eq!(engine.context().and_then(|c| c.variables.get("name")), Some(&json!("ada")));
}

#[tokio::test]
async fn spawned_run_can_be_cancelled() {
    let mut engine = Engine::new(ComponentRegistry::new());
    let steps = vec![shell_step("sleep 0.1"), shell_step("echo should_not_run"), shell_step("echo also_should_not_run")];
    engine.load_pipeline(document(steps)).unwrap();

    let handle = match engine.start(true).await.unwrap() {
        StartOutcome::Spawned(handle) => handle,
        StartOutcome::Completed(_) => panic!("expected a spawned run"),
    };
    handle.cancel();
    let outcome = handle.join(&mut engine).await.unwrap();
    assert!(!outcome.success);
    assert!(outcome.results.len() < 3);

    assert_eq!(engine.state, EngineState::Cancelled);
    assert!(engine.context().is_some());
    // the engine isn't stranded in `Running`: a fresh run can start right away.
    engine.load_pipeline(document(Vec::new())).unwrap();
    let outcome = match engine.start(false).await.unwrap() {
        StartOutcome::Completed(outcome) => outcome,
        StartOutcome::Spawned(_) => panic!("expected a synchronous run"),
    };
    assert!(outcome.success);
}
