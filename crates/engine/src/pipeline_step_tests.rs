// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;

fn write_sub_pipeline(dir: &tempfile::TempDir, variable_name: &str) -> std::path::PathBuf {
    let path = dir.path().join("sub.json");
    let document = json!({
        "steps": [
            { "name": "emit", "type": "component", "component": "variable_set", "params": { "name": variable_name, "value": "${variables.input}" } }
        ]
    });
    std::fs::write(&path, serde_json::to_string(&document).unwrap()).unwrap();
    path
}

fn registry() -> ComponentRegistry {
    let mut registry = ComponentRegistry::new();
    registry.register("variable_set", std::sync::Arc::new(crate::components::VariableSetComponent));
    registry
}

#[tokio::test]
async fn step_local_variables_win_over_parent_on_collision() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sub_pipeline(&dir, "echoed");

    let mut parent_variables = Map::new();
    parent_variables.insert("input".into(), json!("from_parent"));
    let mut context = ExecutionContext::new(parent_variables);

    let mut step_variables = Map::new();
    step_variables.insert("input".into(), json!("from_step"));

    let (success, _) = execute(&path.to_string_lossy(), &step_variables, false, &mut context, &registry()).await.unwrap();
    assert!(success);
    assert!(!context.variables.contains_key("echoed"));
}

#[tokio::test]
async fn export_variables_copies_sub_context_without_overwriting_parent() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sub_pipeline(&dir, "echoed");

    let mut parent_variables = Map::new();
    parent_variables.insert("input".into(), json!("hello"));
    parent_variables.insert("untouched".into(), json!("keep-me"));
    let mut context = ExecutionContext::new(parent_variables);

    let step_variables = Map::new();
    let (success, value) = execute(&path.to_string_lossy(), &step_variables, true, &mut context, &registry()).await.unwrap();

    assert!(success);
    assert_eq!(context.variables.get("echoed"), Some(&json!("hello")));
    assert_eq!(context.variables.get("untouched"), Some(&json!("keep-me")));
    assert_eq!(value["errors"], json!([]));
}

#[tokio::test]
async fn without_export_variables_parent_context_is_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sub_pipeline(&dir, "echoed");
    let mut context = ExecutionContext::new(Map::new());
    let step_variables = Map::new();

    execute(&path.to_string_lossy(), &step_variables, false, &mut context, &registry()).await.unwrap();
    assert!(!context.variables.contains_key("echoed"));
}
