// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sub-pipeline step execution: a `type: pipeline` step runs a fresh
//! [`Engine`] against a nested document, sharing the parent's registry.

use serde_json::{json, Map, Value};
use vap_core::{EngineError, EngineResult, ExecutionContext};
use vap_document::expand_tilde;

use crate::driver::{Engine, StartOutcome};
use crate::registry::ComponentRegistry;

pub(crate) async fn execute(
    path: &str,
    variables: &Map<String, Value>,
    export_variables: bool,
    context: &mut ExecutionContext,
    registry: &ComponentRegistry,
) -> EngineResult<(bool, Value)> {
    let expanded = expand_tilde(std::path::Path::new(path));

    let mut sub_engine = Engine::new(registry.clone());
    sub_engine.load_pipeline_from_file(&expanded)?;

    // Parent variables first, then the step-local override: the
    // step-local value wins on key collision, as the contract requires.
    sub_engine.seed_variables(&context.variables);
    sub_engine.seed_variables(variables);

    let outcome = match sub_engine.start(false).await? {
        StartOutcome::Completed(outcome) => outcome,
        StartOutcome::Spawned(_) => {
            return Err(EngineError::State(
                "sub-pipeline run unexpectedly spawned in the background".into(),
            ))
        }
    };

    if export_variables {
        if let Some(sub_context) = sub_engine.context() {
            for (key, value) in &sub_context.variables {
                context.variables.entry(key.clone()).or_insert_with(|| value.clone());
            }
        }
    }

    let value = json!({
        "results": outcome.results,
        "errors": outcome.errors,
    });
    Ok((outcome.success, value))
}

#[cfg(test)]
#[path = "pipeline_step_tests.rs"]
mod tests;
