// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::sync::Arc;
use serde_json::{json, Map};
use vap_core::ExecutionContext;
use vap_collab::FakeLlmConnector;

#[tokio::test]
async fn queries_and_writes_state() {
    let mut context = ExecutionContext::new(Map::new());
    context.collaborators.api = Some(Arc::new(FakeLlmConnector::replying("42")));

    let mut params = Map::new();
    params.insert("text".into(), json!("what is the answer"));
    params.insert("output_var".into(), json!("answer"));

    let (success, value) = LlmQueryComponent.execute(&params, &mut context).await.unwrap();
    assert!(success);
    assert_eq!(value, json!("42"));
    assert_eq!(context.results.get("answer"), Some(&json!("42")));
    assert_eq!(context.state.get("last_response"), Some(&json!("42")));
}

#[tokio::test]
async fn repeat_query_hits_cache() {
    let mut context = ExecutionContext::new(Map::new());
    let connector = Arc::new(FakeLlmConnector::replying("cached"));
    context.collaborators.api = Some(connector.clone());

    let mut params = Map::new();
    params.insert("text".into(), json!("q"));
    params.insert("output_var".into(), json!("a"));

    LlmQueryComponent.execute(&params, &mut context).await.unwrap();
    LlmQueryComponent.execute(&params, &mut context).await.unwrap();

    assert_eq!(connector.calls().len(), 1);
}

#[tokio::test]
async fn collaborator_failure_is_execution_error() {
    let mut context = ExecutionContext::new(Map::new());
    context.collaborators.api = Some(Arc::new(FakeLlmConnector::failing("offline")));

    let mut params = Map::new();
    params.insert("text".into(), json!("q"));
    params.insert("output_var".into(), json!("a"));

    let err = LlmQueryComponent.execute(&params, &mut context).await.unwrap_err();
    assert!(matches!(err, EngineError::Execution { .. }));
}
