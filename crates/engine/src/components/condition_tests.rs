// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::{json, Map};
use vap_core::ExecutionContext;
use vap_document::StepKind;

fn variable_set_step(name: &str, value: serde_json::Value) -> vap_document::Step {
    let mut params = Map::new();
    params.insert("name".into(), json!(name));
    params.insert("value".into(), value);
    vap_document::Step {
        name: None,
        guard: None,
        continue_on_error: false,
        kind: StepKind::Component { component: "variable_set".into(), params },
    }
}

fn registry_with_condition() -> (ComponentRegistry, Arc<OnceLock<ComponentRegistry>>) {
    let shared = Arc::new(OnceLock::new());
    let mut registry = ComponentRegistry::new();
    registry.register("variable_set", Arc::new(VariableSetComponent));
    registry.register("condition", Arc::new(ConditionComponent::new(shared.clone())));
    let _ = shared.set(registry.clone());
    (registry, shared)
}

#[tokio::test]
async fn true_branch_runs_when_expression_is_truthy() {
    let (_, shared) = registry_with_condition();
    let mut context = ExecutionContext::new(Map::new());
    let mut params = Map::new();
    params.insert("condition".into(), json!("1 == 1"));
    params.insert("true_pipeline".into(), json!([serde_json::to_value(variable_set_step("branch", json!("true"))).unwrap()]));
    params.insert("false_pipeline".into(), json!([serde_json::to_value(variable_set_step("branch", json!("false"))).unwrap()]));

    let (success, value) = ConditionComponent::new(shared).execute(&params, &mut context).await.unwrap();
    assert!(success);
    assert_eq!(value, json!(true));
    assert_eq!(context.variables.get("branch"), Some(&json!("true")));
}

#[tokio::test]
async fn false_branch_runs_when_expression_is_falsy() {
    let (_, shared) = registry_with_condition();
    let mut context = ExecutionContext::new(Map::new());
    let mut params = Map::new();
    params.insert("condition".into(), json!("1 == 2"));
    params.insert("true_pipeline".into(), json!([serde_json::to_value(variable_set_step("branch", json!("true"))).unwrap()]));
    params.insert("false_pipeline".into(), json!([serde_json::to_value(variable_set_step("branch", json!("false"))).unwrap()]));

    let (success, value) = ConditionComponent::new(shared).execute(&params, &mut context).await.unwrap();
    assert!(success);
    assert_eq!(value, json!(false));
    assert_eq!(context.variables.get("branch"), Some(&json!("false")));
}

#[tokio::test]
async fn missing_branch_is_a_no_op_success() {
    let (_, shared) = registry_with_condition();
    let mut context = ExecutionContext::new(Map::new());
    let mut params = Map::new();
    params.insert("condition".into(), json!("1 == 2"));
    params.insert("true_pipeline".into(), json!([serde_json::to_value(variable_set_step("branch", json!("true"))).unwrap()]));

    let (success, _) = ConditionComponent::new(shared).execute(&params, &mut context).await.unwrap();
    assert!(success);
    assert!(!context.variables.contains_key("branch"));
}

#[tokio::test]
async fn output_var_records_the_evaluated_condition() {
    let (_, shared) = registry_with_condition();
    let mut context = ExecutionContext::new(Map::new());
    let mut params = Map::new();
    params.insert("condition".into(), json!("1 == 1"));
    params.insert("output_var".into(), json!("matched"));

    ConditionComponent::new(shared).execute(&params, &mut context).await.unwrap();
    assert_eq!(context.results.get("matched"), Some(&json!(true)));
}

#[tokio::test]
async fn a_failing_branch_step_is_an_execution_error() {
    let (_, shared) = registry_with_condition();
    let mut context = ExecutionContext::new(Map::new());
    let failing_step = vap_document::Step {
        name: None,
        guard: None,
        continue_on_error: false,
        kind: StepKind::Component { component: "missing_component".into(), params: Map::new() },
    };
    let mut params = Map::new();
    params.insert("condition".into(), json!("1 == 1"));
    params.insert("true_pipeline".into(), json!([serde_json::to_value(failing_step).unwrap()]));

    let err = ConditionComponent::new(shared).execute(&params, &mut context).await.unwrap_err();
    assert!(matches!(err, EngineError::Execution { .. }));
}
