// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use vap_core::{EngineError, EngineResult, ExecutionContext};

use crate::registry::Component;

use super::{audio_handle, opt_bool, opt_f64, opt_str, require_str, tts_handle};

/// Captures `duration` seconds of audio via the [`vap_core::Audio`]
/// collaborator and writes the produced path to `results[output_var]`.
/// When `announce` is set, speaks a prompt through the TTS collaborator
/// before recording starts.
pub struct AudioRecordComponent;

#[async_trait]
impl Component for AudioRecordComponent {
    async fn execute(&self, params: &Map<String, Value>, context: &mut ExecutionContext) -> EngineResult<(bool, Value)> {
        let output_var = require_str(params, "audio_record", "output_var")?.to_string();
        let duration = opt_f64(params, "duration", 5.0);

        if opt_bool(params, "announce", false) {
            let message = opt_str(params, "announce_message")
                .unwrap_or("Listening now.")
                .to_string();
            let tts = tts_handle(context);
            tts.speak(&message)
                .await
                .map_err(|err| EngineError::execution("audio_record", err.sentinel_message()))?;
        }

        let audio = audio_handle(context);
        let recorded = audio
            .record(duration)
            .await
            .map_err(|err| EngineError::execution("audio_record", err.sentinel_message()))?;

        let value = match recorded {
            Some(path) => json!(path.to_string_lossy()),
            None => Value::Null,
        };
        if let Some(results) = context.scope_mut("results") {
            results.insert(output_var, value.clone());
        }
        Ok((true, value))
    }
}

#[cfg(test)]
#[path = "audio_record_tests.rs"]
mod tests;
