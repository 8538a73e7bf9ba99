// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use vap_core::{CollaboratorError, SpeechToText};

/// Always fails; used when no transcription model is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpSpeechToText;

#[async_trait]
impl SpeechToText for NoOpSpeechToText {
    async fn transcribe(&self, _audio_path: &Path, _language: &str) -> Result<String, CollaboratorError> {
        Err(CollaboratorError::NotConfigured("speech_to_text".into()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranscribeCall {
    pub audio_path: PathBuf,
    pub language: String,
}

#[derive(Default)]
struct FakeSttState {
    calls: Vec<TranscribeCall>,
}

/// Returns a fixed transcript regardless of input audio.
#[derive(Clone)]
pub struct FakeSpeechToText {
    transcript: String,
    state: Arc<Mutex<FakeSttState>>,
}

impl FakeSpeechToText {
    pub fn new(transcript: impl Into<String>) -> Self {
        Self {
            transcript: transcript.into(),
            state: Arc::new(Mutex::new(FakeSttState::default())),
        }
    }

    pub fn calls(&self) -> Vec<TranscribeCall> {
        self.state.lock().calls.clone()
    }
}

#[async_trait]
impl SpeechToText for FakeSpeechToText {
    async fn transcribe(&self, audio_path: &Path, language: &str) -> Result<String, CollaboratorError> {
        self.state.lock().calls.push(TranscribeCall {
            audio_path: audio_path.to_path_buf(),
            language: language.to_string(),
        });
        Ok(self.transcript.clone())
    }
}

#[cfg(test)]
#[path = "stt_tests.rs"]
mod tests;
