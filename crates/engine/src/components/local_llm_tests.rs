// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::sync::Arc;
use serde_json::{json, Map};
use vap_core::ExecutionContext;
use vap_collab::FakeLlmConnector;

#[tokio::test]
async fn uses_local_model_when_it_succeeds() {
    let mut context = ExecutionContext::new(Map::new());
    context.collaborators.local_llm = Some(Arc::new(FakeLlmConnector::replying("local reply")));
    context.collaborators.api = Some(Arc::new(FakeLlmConnector::replying("remote reply")));

    let mut params = Map::new();
    params.insert("text".into(), json!("q"));
    params.insert("output_var".into(), json!("a"));

    let (success, value) = LocalLlmComponent.execute(&params, &mut context).await.unwrap();
    assert!(success);
    assert_eq!(value, json!("local reply"));
}

#[tokio::test]
async fn falls_back_to_api_on_local_failure() {
    let mut context = ExecutionContext::new(Map::new());
    context.collaborators.local_llm = Some(Arc::new(FakeLlmConnector::failing("model not loaded")));
    context.collaborators.api = Some(Arc::new(FakeLlmConnector::replying("remote reply")));

    let mut params = Map::new();
    params.insert("text".into(), json!("q"));
    params.insert("output_var".into(), json!("a"));

    let (success, value) = LocalLlmComponent.execute(&params, &mut context).await.unwrap();
    assert!(success);
    assert_eq!(value, json!("remote reply"));
}

#[tokio::test]
async fn local_failure_without_fallback_errors() {
    let mut context = ExecutionContext::new(Map::new());
    context.collaborators.local_llm = Some(Arc::new(FakeLlmConnector::failing("model not loaded")));

    let mut params = Map::new();
    params.insert("text".into(), json!("q"));
    params.insert("output_var".into(), json!("a"));
    params.insert("fallback_to_api".into(), json!(false));

    let err = LocalLlmComponent.execute(&params, &mut context).await.unwrap_err();
    assert!(matches!(err, EngineError::Execution { .. }));
}
