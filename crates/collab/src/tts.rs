// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use vap_core::{CollaboratorError, TextToSpeech};

/// Silently discards speech requests; used when no TTS voice is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpTextToSpeech;

#[async_trait]
impl TextToSpeech for NoOpTextToSpeech {
    async fn speak(&self, _text: &str) -> Result<bool, CollaboratorError> {
        Ok(false)
    }

    async fn save_to_file(&self, _text: &str, _path: &Path) -> Result<bool, CollaboratorError> {
        Ok(false)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TtsCall {
    Speak(String),
    SaveToFile(String, PathBuf),
}

#[derive(Default)]
struct FakeTtsState {
    calls: Vec<TtsCall>,
}

#[derive(Clone, Default)]
pub struct FakeTextToSpeech {
    state: Arc<Mutex<FakeTtsState>>,
}

impl FakeTextToSpeech {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<TtsCall> {
        self.state.lock().calls.clone()
    }
}

#[async_trait]
impl TextToSpeech for FakeTextToSpeech {
    async fn speak(&self, text: &str) -> Result<bool, CollaboratorError> {
        self.state.lock().calls.push(TtsCall::Speak(text.to_string()));
        Ok(true)
    }

    async fn save_to_file(&self, text: &str, path: &Path) -> Result<bool, CollaboratorError> {
        self.state
            .lock()
            .calls
            .push(TtsCall::SaveToFile(text.to_string(), path.to_path_buf()));
        Ok(true)
    }
}

#[cfg(test)]
#[path = "tts_tests.rs"]
mod tests;
