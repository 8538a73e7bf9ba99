// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::{json, Map};
use vap_core::ExecutionContext;

#[tokio::test]
async fn logs_at_each_level() {
    for level in ["debug", "info", "warning", "error", "critical"] {
        let mut context = ExecutionContext::new(Map::new());
        let mut params = Map::new();
        params.insert("level".into(), json!(level));
        params.insert("message".into(), json!("hello"));
        let (success, _) = LoggerComponent.execute(&params, &mut context).await.unwrap();
        assert!(success);
    }
}

#[tokio::test]
async fn unknown_level_is_a_validation_error() {
    let mut context = ExecutionContext::new(Map::new());
    let mut params = Map::new();
    params.insert("level".into(), json!("shout"));
    params.insert("message".into(), json!("hello"));

    let err = LoggerComponent.execute(&params, &mut context).await.unwrap_err();
    assert!(matches!(err, EngineError::Validation { .. }));
}

#[tokio::test]
async fn file_logger_appends_a_line() {
    let dir = tempfile::tempdir().unwrap();
    let mut context = ExecutionContext::new(Map::new());
    let mut params = Map::new();
    params.insert("level".into(), json!("info"));
    params.insert("message".into(), json!("booted"));
    params.insert("log_dir".into(), json!(dir.path().to_string_lossy()));

    LoggerComponent.execute(&params, &mut context).await.unwrap();

    let contents = std::fs::read_to_string(dir.path().join("pipeline.log")).unwrap();
    assert!(contents.contains("booted"));
}
