// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use vap_core::{EngineError, EngineResult, ExecutionContext};

use crate::registry::Component;

use super::{opt_f64, opt_str, require_str};

/// `sleep` blocks the async scheduler for `duration` seconds; `measure_start`
/// records the current instant under `timer_name`; `measure_end` reports
/// elapsed seconds since that start.
pub struct TimerComponent;

#[async_trait]
impl Component for TimerComponent {
    async fn execute(&self, params: &Map<String, Value>, context: &mut ExecutionContext) -> EngineResult<(bool, Value)> {
        let action = require_str(params, "timer", "action")?;

        match action {
            "sleep" => {
                let duration = opt_f64(params, "duration", 1.0);
                tokio::time::sleep(std::time::Duration::from_secs_f64(duration.max(0.0))).await;
                Ok((true, json!({"slept_secs": duration})))
            }
            "measure_start" => {
                let timer_name = require_str(params, "timer", "timer_name")?.to_string();
                let now = now_secs();
                context.timers.insert(timer_name, json!(now));
                Ok((true, Value::Null))
            }
            "measure_end" => {
                let timer_name = require_str(params, "timer", "timer_name")?;
                let started = context
                    .timers
                    .get(timer_name)
                    .and_then(Value::as_f64)
                    .ok_or_else(|| EngineError::execution("timer", format!("timer '{timer_name}' was never started")))?;
                let elapsed = (now_secs() - started).max(0.0);
                let value = json!({"elapsed_secs": elapsed});
                if let Some(output_var) = opt_str(params, "output_var") {
                    if let Some(results) = context.scope_mut("results") {
                        results.insert(output_var.to_string(), value.clone());
                    }
                }
                Ok((true, value))
            }
            other => Err(EngineError::validation("timer", format!("unknown action '{other}'"))),
        }
    }
}

fn now_secs() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}

#[cfg(test)]
#[path = "timer_tests.rs"]
mod tests;
