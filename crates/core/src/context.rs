// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The per-run [`ExecutionContext`]: the shared state every step reads from
//! and writes into, plus the lazily-populated collaborator handles steps
//! borrow to reach audio, speech, LLM, cache, logging, and safety
//! subsystems.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::collab::{Audio, Cache, ContentFilter, Logger, ParentalControl, SpeechToText, TextToSpeech, LlmConnector};

/// One entry in the run's accumulated error list.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorEntry {
    pub step: String,
    pub kind: String,
    pub message: String,
}

impl ErrorEntry {
    pub fn new(step: impl Into<String>, kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            step: step.into(),
            kind: kind.into(),
            message: message.into(),
        }
    }
}

/// Collaborator handles the context lazily acquires and shares for the rest
/// of the run. Each slot is populated at most once; later calls reuse the
/// handle already installed.
#[derive(Default, Clone)]
pub struct CollaboratorSlots {
    pub audio: Option<Arc<dyn Audio>>,
    pub stt: Option<Arc<dyn SpeechToText>>,
    pub tts: Option<Arc<dyn TextToSpeech>>,
    pub api: Option<Arc<dyn LlmConnector>>,
    pub local_llm: Option<Arc<dyn LlmConnector>>,
    pub cache: Option<Arc<dyn Cache>>,
    pub logger: Option<Arc<dyn Logger>>,
    pub parental_control: Option<Arc<dyn ParentalControl>>,
    pub content_filter: Option<Arc<dyn ContentFilter>>,
}

/// The shared state of a single engine run.
///
/// `variables`, `state`, and `results` are JSON object maps so that
/// dotted-path resolution (`${results.step.field}`) can walk them uniformly;
/// `errors` is an ordered list rather than a map because steps may fail more
/// than once across retries within a loop.
pub struct ExecutionContext {
    pub variables: Map<String, Value>,
    pub state: Map<String, Value>,
    pub results: Map<String, Value>,
    pub errors: Vec<ErrorEntry>,
    pub timers: Map<String, Value>,
    pub collaborators: CollaboratorSlots,
}

impl ExecutionContext {
    pub fn new(variables: Map<String, Value>) -> Self {
        Self {
            variables,
            state: Map::new(),
            results: Map::new(),
            errors: Vec::new(),
            timers: Map::new(),
            collaborators: CollaboratorSlots::default(),
        }
    }

    pub fn push_error(&mut self, step: impl Into<String>, kind: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ErrorEntry::new(step, kind, message));
    }

    /// Look up a root by name (`context`, `variables`, `results`, `state`,
    /// `errors`) for dotted-path resolution. `errors` is exposed as a JSON
    /// array. `context` is the merged `{variables, results, state, errors}`
    /// object, matching the original pipeline engine's `pipeline_context`.
    pub fn root(&self, name: &str) -> Option<Value> {
        match name {
            "variables" => Some(Value::Object(self.variables.clone())),
            "results" => Some(Value::Object(self.results.clone())),
            "state" => Some(Value::Object(self.state.clone())),
            "errors" => Some(serde_json::to_value(&self.errors).ok()?),
            "timers" => Some(Value::Object(self.timers.clone())),
            "context" => {
                let mut merged = Map::new();
                merged.insert("variables".to_string(), Value::Object(self.variables.clone()));
                merged.insert("results".to_string(), Value::Object(self.results.clone()));
                merged.insert("state".to_string(), Value::Object(self.state.clone()));
                merged.insert("errors".to_string(), serde_json::to_value(&self.errors).ok()?);
                Some(Value::Object(merged))
            }
            _ => None,
        }
    }

    pub fn scope_mut(&mut self, scope: &str) -> Option<&mut Map<String, Value>> {
        match scope {
            "variables" => Some(&mut self.variables),
            "state" => Some(&mut self.state),
            "results" => Some(&mut self.results),
            _ => None,
        }
    }
}
