// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use vap_core::{EngineResult, ExecutionContext};

use crate::registry::Component;

use super::{content_filter_handle, opt_str, require_str};

/// Sanitizes `text` and reports its educational value via the
/// [`vap_core::ContentFilter`] collaborator. `filter_file` is accepted but
/// unused — loading a real denylist/taxonomy file is a deployment concern
/// the collaborator implementation owns, not this component.
pub struct ContentFilterComponent;

#[async_trait]
impl Component for ContentFilterComponent {
    async fn execute(&self, params: &Map<String, Value>, context: &mut ExecutionContext) -> EngineResult<(bool, Value)> {
        let text = require_str(params, "content_filter", "text")?;
        let output_var = require_str(params, "content_filter", "output_var")?.to_string();
        let age_group = opt_str(params, "age_group").unwrap_or("5-8");

        let cf = content_filter_handle(context);
        let sanitized = cf.sanitize_content(text, age_group);
        let evaluation = cf.evaluate_educational_value(text);

        let value = json!({
            "text": sanitized,
            "educational_value": evaluation.educational_value,
            "topics": evaluation.topics,
        });
        if let Some(results) = context.scope_mut("results") {
            results.insert(output_var, value.clone());
        }
        Ok((true, value))
    }
}

#[cfg(test)]
#[path = "content_filter_tests.rs"]
mod tests;
