// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use async_trait::async_trait;
use serde_json::{Map, Value};
use vap_core::{EngineError, EngineResult, ExecutionContext};

use crate::registry::Component;

use super::{opt_str, require_str};

/// Writes `value` (already resolved by the dispatcher) into the named
/// scope, default `variables`.
pub struct VariableSetComponent;

#[async_trait]
impl Component for VariableSetComponent {
    async fn execute(&self, params: &Map<String, Value>, context: &mut ExecutionContext) -> EngineResult<(bool, Value)> {
        let name = require_str(params, "variable_set", "name")?.to_string();
        let scope = opt_str(params, "scope").unwrap_or("variables");
        let value = params.get("value").cloned().unwrap_or(Value::Null);

        let map = context
            .scope_mut(scope)
            .ok_or_else(|| EngineError::validation("variable_set", format!("unknown scope '{scope}'")))?;
        map.insert(name, value.clone());
        Ok((true, value))
    }
}

#[cfg(test)]
#[path = "variable_set_tests.rs"]
mod tests;
