// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use vap_core::{EngineError, EngineResult, ExecutionContext};

use crate::registry::Component;

use super::{opt_str, require_str, tts_handle};

/// Synthesizes `text` through the [`vap_core::TextToSpeech`] collaborator,
/// either to the default output device or, when `save_to` is given, to a
/// file. Populates `context.collaborators.tts` so later steps reuse the
/// same handle.
pub struct TextToSpeechComponent;

#[async_trait]
impl Component for TextToSpeechComponent {
    async fn execute(&self, params: &Map<String, Value>, context: &mut ExecutionContext) -> EngineResult<(bool, Value)> {
        let text = require_str(params, "text_to_speech", "text")?.to_string();
        let save_to = opt_str(params, "save_to").map(str::to_string);

        let tts = tts_handle(context);
        let spoken = if let Some(path) = &save_to {
            tts.save_to_file(&text, Path::new(path)).await
        } else {
            tts.speak(&text).await
        }
        .map_err(|err| EngineError::execution("text_to_speech", err.sentinel_message()))?;

        Ok((spoken, json!({"text": text, "saved_to": save_to})))
    }
}

#[cfg(test)]
#[path = "text_to_speech_tests.rs"]
mod tests;
