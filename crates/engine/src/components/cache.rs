// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use async_trait::async_trait;
use serde_json::{Map, Value};
use vap_core::{EngineError, EngineResult, ExecutionContext};

use crate::registry::Component;

use super::{cache_handle, opt_str, require_str};

/// `get`/`set`/`clear` against `context.cache`. A miss on `get` is a
/// successful empty result (`null`), never a failure.
pub struct CacheComponent;

#[async_trait]
impl Component for CacheComponent {
    async fn execute(&self, params: &Map<String, Value>, context: &mut ExecutionContext) -> EngineResult<(bool, Value)> {
        let action = require_str(params, "cache", "action")?;
        let cache_file = opt_str(params, "cache_file");

        match action {
            "get" => {
                let key = require_str(params, "cache", "key")?.to_string();
                let cache = cache_handle(context, cache_file);
                let value = cache.get(&key).unwrap_or(Value::Null);
                if let Some(output_var) = opt_str(params, "output_var") {
                    if let Some(results) = context.scope_mut("results") {
                        results.insert(output_var.to_string(), value.clone());
                    }
                }
                Ok((true, value))
            }
            "set" => {
                let key = require_str(params, "cache", "key")?.to_string();
                let value = params.get("value").cloned().unwrap_or(Value::Null);
                let cache = cache_handle(context, cache_file);
                cache.set(&key, value.clone());
                Ok((true, value))
            }
            "clear" => {
                let cache = cache_handle(context, cache_file);
                cache.clear();
                Ok((true, Value::Null))
            }
            other => Err(EngineError::validation("cache", format!("unknown action '{other}'"))),
        }
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
