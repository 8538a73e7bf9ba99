// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use vap_core::{CollaboratorError, LlmConnector};

/// Always fails; used when neither a remote nor a local model is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLlmConnector;

#[async_trait]
impl LlmConnector for NoOpLlmConnector {
    async fn query(&self, _text: &str, _context: Option<&str>) -> Result<String, CollaboratorError> {
        Err(CollaboratorError::NotConfigured("llm".into()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryCall {
    pub text: String,
    pub context: Option<String>,
}

#[derive(Default)]
struct FakeLlmState {
    calls: Vec<QueryCall>,
}

/// Returns a canned reply (or a fixed per-call error) without reaching any
/// network or model process.
#[derive(Clone)]
pub struct FakeLlmConnector {
    reply: Result<String, CollaboratorError>,
    state: Arc<Mutex<FakeLlmState>>,
}

impl FakeLlmConnector {
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: Ok(reply.into()),
            state: Arc::new(Mutex::new(FakeLlmState::default())),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            reply: Err(CollaboratorError::Failed(message.into())),
            state: Arc::new(Mutex::new(FakeLlmState::default())),
        }
    }

    pub fn calls(&self) -> Vec<QueryCall> {
        self.state.lock().calls.clone()
    }
}

#[async_trait]
impl LlmConnector for FakeLlmConnector {
    async fn query(&self, text: &str, context: Option<&str>) -> Result<String, CollaboratorError> {
        self.state.lock().calls.push(QueryCall {
            text: text.to_string(),
            context: context.map(str::to_string),
        });
        self.reply.clone()
    }
}

#[cfg(test)]
#[path = "llm_tests.rs"]
mod tests;
