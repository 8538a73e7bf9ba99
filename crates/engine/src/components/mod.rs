// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Built-in components. Each is a thin contract over a collaborator slot
//! on the [`vap_core::ExecutionContext`]; the heavy lifting (actual audio
//! capture, actual model inference) belongs to the collaborator
//! implementation, not the component.

mod audio_record;
mod cache;
mod condition;
mod content_filter;
mod llm_query;
mod local_llm;
mod logger;
mod loop_component;
mod parental_control;
mod speech_to_text;
mod text_to_speech;
mod timer;
mod variable_set;

pub use audio_record::AudioRecordComponent;
pub use cache::CacheComponent;
pub use condition::ConditionComponent;
pub use content_filter::ContentFilterComponent;
pub use llm_query::LlmQueryComponent;
pub use local_llm::LocalLlmComponent;
pub use logger::LoggerComponent;
pub use loop_component::LoopComponent;
pub use parental_control::ParentalControlComponent;
pub use speech_to_text::SpeechToTextComponent;
pub use text_to_speech::TextToSpeechComponent;
pub use timer::TimerComponent;
pub use variable_set::VariableSetComponent;

use std::sync::{Arc, OnceLock};

use vap_core::{Audio, Cache, ContentFilter, LlmConnector, Logger, ParentalControl, SpeechToText, TextToSpeech};

use crate::registry::ComponentRegistry;

/// Register every built-in component under its conventional name.
///
/// `condition` and `loop` need to dispatch nested steps through the very
/// registry they are being added to, so registration happens in two passes:
/// everything else first, then a snapshot of the registry-so-far is handed
/// to both, and finally they're added themselves so later registry clones
/// (including the one taken for this snapshot) see the complete set.
pub fn register_builtins(registry: &mut ComponentRegistry) {
    registry.register("audio_record", Arc::new(AudioRecordComponent));
    registry.register("speech_to_text", Arc::new(SpeechToTextComponent));
    registry.register("text_to_speech", Arc::new(TextToSpeechComponent));
    registry.register("llm_query", Arc::new(LlmQueryComponent));
    registry.register("local_llm", Arc::new(LocalLlmComponent));
    registry.register("parental_control", Arc::new(ParentalControlComponent));
    registry.register("content_filter", Arc::new(ContentFilterComponent));
    registry.register("cache", Arc::new(CacheComponent));
    registry.register("logger", Arc::new(LoggerComponent));
    registry.register("variable_set", Arc::new(VariableSetComponent));

    let shared: Arc<OnceLock<ComponentRegistry>> = Arc::new(OnceLock::new());
    registry.register("condition", Arc::new(ConditionComponent::new(shared.clone())));
    registry.register("loop", Arc::new(LoopComponent::new(shared.clone())));
    let _ = shared.set(registry.clone());
}

pub(crate) fn require_str<'a>(
    params: &'a serde_json::Map<String, serde_json::Value>,
    step: &str,
    name: &str,
) -> vap_core::EngineResult<&'a str> {
    params
        .get(name)
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| vap_core::EngineError::validation(step, format!("missing required param '{name}'")))
}

pub(crate) fn opt_str<'a>(params: &'a serde_json::Map<String, serde_json::Value>, name: &str) -> Option<&'a str> {
    params.get(name).and_then(serde_json::Value::as_str)
}

pub(crate) fn opt_f64(params: &serde_json::Map<String, serde_json::Value>, name: &str, default: f64) -> f64 {
    params.get(name).and_then(serde_json::Value::as_f64).unwrap_or(default)
}

pub(crate) fn opt_bool(params: &serde_json::Map<String, serde_json::Value>, name: &str, default: bool) -> bool {
    params.get(name).and_then(serde_json::Value::as_bool).unwrap_or(default)
}

/// Deserialize a `steps`/`true_pipeline`/`false_pipeline` param into a step
/// list; absent is an empty branch, not an error.
pub(crate) fn parse_steps(
    value: Option<&serde_json::Value>,
    step: &str,
) -> vap_core::EngineResult<Vec<vap_document::Step>> {
    match value {
        None => Ok(Vec::new()),
        Some(v) => serde_json::from_value(v.clone())
            .map_err(|err| vap_core::EngineError::validation(step, format!("invalid step list: {err}"))),
    }
}

pub(crate) fn audio_handle(context: &mut vap_core::ExecutionContext) -> Arc<dyn Audio> {
    context
        .collaborators
        .audio
        .get_or_insert_with(|| Arc::new(vap_collab::NoOpAudio))
        .clone()
}

pub(crate) fn stt_handle(context: &mut vap_core::ExecutionContext) -> Arc<dyn SpeechToText> {
    context
        .collaborators
        .stt
        .get_or_insert_with(|| Arc::new(vap_collab::NoOpSpeechToText))
        .clone()
}

pub(crate) fn tts_handle(context: &mut vap_core::ExecutionContext) -> Arc<dyn TextToSpeech> {
    context
        .collaborators
        .tts
        .get_or_insert_with(|| Arc::new(vap_collab::NoOpTextToSpeech))
        .clone()
}

pub(crate) fn api_llm_handle(context: &mut vap_core::ExecutionContext) -> Arc<dyn LlmConnector> {
    context
        .collaborators
        .api
        .get_or_insert_with(|| Arc::new(vap_collab::NoOpLlmConnector))
        .clone()
}

pub(crate) fn local_llm_handle(context: &mut vap_core::ExecutionContext) -> Arc<dyn LlmConnector> {
    context
        .collaborators
        .local_llm
        .get_or_insert_with(|| Arc::new(vap_collab::NoOpLlmConnector))
        .clone()
}

pub(crate) fn cache_handle(context: &mut vap_core::ExecutionContext, cache_file: Option<&str>) -> Arc<dyn Cache> {
    context
        .collaborators
        .cache
        .get_or_insert_with(|| match cache_file {
            Some(path) => Arc::new(vap_collab::FileCache::open(path, vap_collab::FileCache::DEFAULT_TTL_SECS)),
            None => Arc::new(vap_collab::InMemoryCache::new()),
        })
        .clone()
}

pub(crate) fn logger_handle(
    context: &mut vap_core::ExecutionContext,
    log_dir: Option<&str>,
    log_to_console: bool,
) -> Arc<dyn Logger> {
    context
        .collaborators
        .logger
        .get_or_insert_with(|| match log_dir {
            Some(dir) => Arc::new(vap_collab::FileLogger::new(dir)) as Arc<dyn Logger>,
            None if log_to_console => Arc::new(vap_collab::TracingLogger),
            None => Arc::new(vap_collab::NoOpLogger),
        })
        .clone()
}

pub(crate) fn parental_control_handle(context: &mut vap_core::ExecutionContext) -> Arc<dyn ParentalControl> {
    context
        .collaborators
        .parental_control
        .get_or_insert_with(|| Arc::new(vap_collab::NoOpParentalControl))
        .clone()
}

pub(crate) fn content_filter_handle(context: &mut vap_core::ExecutionContext) -> Arc<dyn ContentFilter> {
    context
        .collaborators
        .content_filter
        .get_or_insert_with(|| Arc::new(vap_collab::NoOpContentFilter))
        .clone()
}

/// Query `llm`, consulting `cache` first and populating it on a fresh reply.
/// Shared by `llm_query` and `local_llm`'s API fallback so both go through
/// identical caching behavior.
pub(crate) async fn run_llm_query(
    llm: &Arc<dyn LlmConnector>,
    text: &str,
    context_text: Option<&str>,
    cache: Option<&Arc<dyn Cache>>,
    cache_key: &str,
) -> Result<String, vap_core::CollaboratorError> {
    if let Some(cache) = cache {
        if let Some(serde_json::Value::String(hit)) = cache.get(cache_key) {
            return Ok(hit);
        }
    }
    let reply = llm.query(text, context_text).await?;
    if let Some(cache) = cache {
        cache.set(cache_key, serde_json::Value::String(reply.clone()));
    }
    Ok(reply)
}
