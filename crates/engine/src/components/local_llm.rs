// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use async_trait::async_trait;
use serde_json::{Map, Value};
use vap_core::{EngineError, EngineResult, ExecutionContext};

use crate::registry::Component;

use super::{api_llm_handle, cache_handle, local_llm_handle, opt_bool, opt_str, require_str, run_llm_query};

/// Sends `text` to the local-model collaborator; on failure, when
/// `fallback_to_api` is set, retries against the remote connector through
/// the same cached query path `llm_query` uses.
pub struct LocalLlmComponent;

#[async_trait]
impl Component for LocalLlmComponent {
    async fn execute(&self, params: &Map<String, Value>, context: &mut ExecutionContext) -> EngineResult<(bool, Value)> {
        let text = require_str(params, "local_llm", "text")?.to_string();
        let output_var = require_str(params, "local_llm", "output_var")?.to_string();
        let extra_context = opt_str(params, "context").map(str::to_string);
        let use_cache = opt_bool(params, "use_cache", true);
        let fallback_to_api = opt_bool(params, "fallback_to_api", true);

        let cache = use_cache.then(|| cache_handle(context, None));
        let cache_key = format!("local_llm:{text}:{}", extra_context.as_deref().unwrap_or(""));

        let local = local_llm_handle(context);
        let local_result = run_llm_query(&local, &text, extra_context.as_deref(), cache.as_ref(), &cache_key).await;

        let reply = match local_result {
            Ok(reply) => reply,
            Err(_local_err) if fallback_to_api => {
                let api = api_llm_handle(context);
                run_llm_query(&api, &text, extra_context.as_deref(), cache.as_ref(), &cache_key)
                    .await
                    .map_err(|api_err| EngineError::execution("local_llm", api_err.sentinel_message()))?
            }
            Err(local_err) => return Err(EngineError::execution("local_llm", local_err.sentinel_message())),
        };

        let value = Value::String(reply);
        context.state.insert("last_response".to_string(), value.clone());
        if let Some(results) = context.scope_mut("results") {
            results.insert(output_var, value.clone());
        }
        Ok((true, value))
    }
}

#[cfg(test)]
#[path = "local_llm_tests.rs"]
mod tests;
