// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use vap_core::{EngineError, EngineResult, ExecutionContext};

use crate::registry::Component;

use super::{opt_str, require_str, stt_handle};

/// Transcribes `audio_path` via the [`vap_core::SpeechToText`] collaborator,
/// writing the transcript to `results[output_var]` and `state.last_transcript`.
pub struct SpeechToTextComponent;

#[async_trait]
impl Component for SpeechToTextComponent {
    async fn execute(&self, params: &Map<String, Value>, context: &mut ExecutionContext) -> EngineResult<(bool, Value)> {
        let audio_path = require_str(params, "speech_to_text", "audio_path")?;
        if audio_path.is_empty() {
            return Err(EngineError::resolution("speech_to_text", "audio_path resolved to an empty string"));
        }
        let output_var = require_str(params, "speech_to_text", "output_var")?.to_string();
        let language = opt_str(params, "language").unwrap_or("auto");

        let stt = stt_handle(context);
        let transcript = stt
            .transcribe(Path::new(audio_path), language)
            .await
            .map_err(|err| EngineError::execution("speech_to_text", err.sentinel_message()))?;

        let value = json!(transcript);
        context.state.insert("last_transcript".to_string(), value.clone());
        if let Some(results) = context.scope_mut("results") {
            results.insert(output_var, value.clone());
        }
        Ok((true, value))
    }
}

#[cfg(test)]
#[path = "speech_to_text_tests.rs"]
mod tests;
