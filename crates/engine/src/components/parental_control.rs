// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use vap_core::{EngineError, EngineResult, ExecutionContext};

use crate::registry::Component;

use super::{opt_bool, opt_f64, opt_str, parental_control_handle, require_str};

/// Dispatches to the [`vap_core::ParentalControl`] collaborator. The
/// `check_usage` action can advance usage before reading the limit back;
/// `filter_input` rejects outright (`allowed = false`) when the
/// collaborator returns no rewritten text.
pub struct ParentalControlComponent;

#[async_trait]
impl Component for ParentalControlComponent {
    async fn execute(&self, params: &Map<String, Value>, context: &mut ExecutionContext) -> EngineResult<(bool, Value)> {
        let action = require_str(params, "parental_control", "action")?;
        let output_var = opt_str(params, "output_var").map(str::to_string);
        let pc = parental_control_handle(context);

        let (allowed, value) = match action {
            "check_time" => {
                let allowed = pc.check_time_restrictions();
                (allowed, json!({"allowed": allowed}))
            }
            "check_usage" => {
                if opt_bool(params, "update_usage", false) {
                    pc.update_usage(opt_f64(params, "usage_minutes", 1.0));
                }
                let allowed = pc.check_usage_limit();
                let remaining = pc.get_remaining_time();
                (allowed, json!({"allowed": allowed, "remaining_minutes": remaining}))
            }
            "filter_input" => {
                let input = require_str(params, "parental_control", "input_text")?;
                let (filtered, reason) = pc.filter_input(input);
                let allowed = filtered.is_some();
                (allowed, json!({"text": filtered, "reason": reason}))
            }
            other => return Err(EngineError::validation("parental_control", format!("unknown action '{other}'"))),
        };

        if let Some(output_var) = output_var {
            if let Some(results) = context.scope_mut("results") {
                results.insert(output_var, value.clone());
            }
        }
        Ok((allowed, value))
    }
}

#[cfg(test)]
#[path = "parental_control_tests.rs"]
mod tests;
