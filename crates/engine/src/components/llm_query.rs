// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use async_trait::async_trait;
use serde_json::{Map, Value};
use vap_core::{EngineError, EngineResult, ExecutionContext};

use crate::registry::Component;

use super::{api_llm_handle, cache_handle, opt_bool, opt_str, require_str, run_llm_query};

/// Sends `text` to the remote [`vap_core::LlmConnector`], consulting
/// `context.cache` first when `use_cache` is set, and writes the reply to
/// `results[output_var]` and `state.last_response`.
pub struct LlmQueryComponent;

#[async_trait]
impl Component for LlmQueryComponent {
    async fn execute(&self, params: &Map<String, Value>, context: &mut ExecutionContext) -> EngineResult<(bool, Value)> {
        let text = require_str(params, "llm_query", "text")?.to_string();
        let output_var = require_str(params, "llm_query", "output_var")?.to_string();
        let extra_context = opt_str(params, "context").map(str::to_string);
        let use_cache = opt_bool(params, "use_cache", true);

        let cache = use_cache.then(|| cache_handle(context, None));
        let cache_key = format!("llm_query:{text}:{}", extra_context.as_deref().unwrap_or(""));
        let llm = api_llm_handle(context);

        let reply = run_llm_query(&llm, &text, extra_context.as_deref(), cache.as_ref(), &cache_key)
            .await
            .map_err(|err| EngineError::execution("llm_query", err.sentinel_message()))?;

        let value = Value::String(reply);
        context.state.insert("last_response".to_string(), value.clone());
        if let Some(results) = context.scope_mut("results") {
            results.insert(output_var, value.clone());
        }
        Ok((true, value))
    }
}

#[cfg(test)]
#[path = "llm_query_tests.rs"]
mod tests;
