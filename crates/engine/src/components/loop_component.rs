// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use vap_core::{EngineError, EngineResult, ExecutionContext};
use vap_document::{evaluate_condition, Step};

use crate::dispatcher::dispatch_step;
use crate::registry::{Component, ComponentRegistry};

use super::{opt_str, parse_steps, require_str};

/// Iterates a nested step list up to `max_iterations`, writing
/// `variables.loop_index` (and `variables[item_var]` for `for`) on each
/// pass. An inner step whose failure would abort a top-level run aborts the
/// loop the same way.
pub struct LoopComponent {
    registry: Arc<OnceLock<ComponentRegistry>>,
}

impl LoopComponent {
    pub fn new(registry: Arc<OnceLock<ComponentRegistry>>) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl Component for LoopComponent {
    async fn execute(&self, params: &Map<String, Value>, context: &mut ExecutionContext) -> EngineResult<(bool, Value)> {
        let loop_type = require_str(params, "loop", "type")?;
        let steps = parse_steps(params.get("steps"), "loop")?;
        let max_iterations = params
            .get("max_iterations")
            .and_then(Value::as_u64)
            .unwrap_or(100) as usize;
        let registry = self.registry.get().cloned().unwrap_or_default();

        let (iterations_run, failed) = match loop_type {
            "count" => {
                let iterations = params.get("iterations").and_then(Value::as_u64).unwrap_or(0) as usize;
                run_count(iterations.min(max_iterations), &steps, context, &registry).await
            }
            "while" => {
                let condition = opt_str(params, "condition");
                run_while(condition, max_iterations, &steps, context, &registry).await
            }
            "for" => {
                let item_var = require_str(params, "loop", "item_var")?.to_string();
                let collection = params.get("collection").cloned().unwrap_or_else(|| Value::Array(Vec::new()));
                let items = match collection {
                    Value::Array(items) => items,
                    other => vec![other],
                };
                run_for(&item_var, &items, max_iterations, &steps, context, &registry).await
            }
            other => return Err(EngineError::validation("loop", format!("unknown type '{other}'"))),
        };

        let value = json!({"iterations": iterations_run});
        if failed {
            Err(EngineError::execution("loop", "an inner step failed"))
        } else {
            Ok((true, value))
        }
    }
}

async fn run_body(steps: &[Step], context: &mut ExecutionContext, registry: &ComponentRegistry) -> bool {
    for (index, step) in steps.iter().enumerate() {
        let outcome = dispatch_step(step, index, context, registry).await;
        if !outcome.success && outcome.should_abort {
            return false;
        }
    }
    true
}

async fn run_count(
    bound: usize,
    steps: &[Step],
    context: &mut ExecutionContext,
    registry: &ComponentRegistry,
) -> (usize, bool) {
    let mut ran = 0;
    for i in 0..bound {
        context.variables.insert("loop_index".to_string(), json!(i.to_string()));
        if !run_body(steps, context, registry).await {
            return (ran, true);
        }
        ran += 1;
    }
    (ran, false)
}

async fn run_while(
    condition: Option<&str>,
    max_iterations: usize,
    steps: &[Step],
    context: &mut ExecutionContext,
    registry: &ComponentRegistry,
) -> (usize, bool) {
    let mut ran = 0;
    while ran < max_iterations {
        if !evaluate_condition(condition, context, "loop") {
            break;
        }
        context.variables.insert("loop_index".to_string(), json!(ran.to_string()));
        if !run_body(steps, context, registry).await {
            return (ran, true);
        }
        ran += 1;
    }
    (ran, false)
}

async fn run_for(
    item_var: &str,
    items: &[Value],
    max_iterations: usize,
    steps: &[Step],
    context: &mut ExecutionContext,
    registry: &ComponentRegistry,
) -> (usize, bool) {
    let mut ran = 0;
    for item in items.iter().take(max_iterations) {
        context.variables.insert("loop_index".to_string(), json!(ran.to_string()));
        context.variables.insert(item_var.to_string(), item.clone());
        if !run_body(steps, context, registry).await {
            return (ran, true);
        }
        ran += 1;
    }
    (ran, false)
}

#[cfg(test)]
#[path = "loop_component_tests.rs"]
mod tests;
