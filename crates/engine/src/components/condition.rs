// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use serde_json::{Map, Value};
use vap_core::{EngineError, EngineResult, ExecutionContext};
use vap_document::evaluate_condition;

use crate::dispatcher::dispatch_step;
use crate::registry::{Component, ComponentRegistry};

use super::{opt_str, parse_steps};

/// Evaluates `condition` and runs the chosen branch's steps inline against
/// the *current* context — unlike a `pipeline` step, there is no fresh
/// sub-engine, so a branch step's writes to `variables`/`state`/`results`
/// are visible to steps after the `condition` step immediately.
pub struct ConditionComponent {
    registry: Arc<OnceLock<ComponentRegistry>>,
}

impl ConditionComponent {
    pub fn new(registry: Arc<OnceLock<ComponentRegistry>>) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl Component for ConditionComponent {
    async fn execute(&self, params: &Map<String, Value>, context: &mut ExecutionContext) -> EngineResult<(bool, Value)> {
        let outcome = evaluate_condition(opt_str(params, "condition"), context, "condition");

        let branch_key = if outcome { "true_pipeline" } else { "false_pipeline" };
        let steps = parse_steps(params.get(branch_key), "condition")?;
        let registry = self.registry.get().cloned().unwrap_or_default();

        let mut branch_failed = false;
        for (index, step) in steps.iter().enumerate() {
            let step_outcome = dispatch_step(step, index, context, &registry).await;
            if !step_outcome.success && step_outcome.should_abort {
                branch_failed = true;
                break;
            }
        }

        if let Some(output_var) = opt_str(params, "output_var") {
            if let Some(results) = context.scope_mut("results") {
                results.insert(output_var.to_string(), Value::Bool(outcome));
            }
        }

        if branch_failed {
            Err(EngineError::execution("condition", "a branch step failed"))
        } else {
            Ok((true, Value::Bool(outcome)))
        }
    }
}

#[cfg(test)]
#[path = "condition_tests.rs"]
mod tests;
