// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use vap_core::{Audio, CollaboratorError};

/// Records nothing; used when no microphone is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpAudio;

#[async_trait]
impl Audio for NoOpAudio {
    async fn record(&self, _duration_secs: f64) -> Result<Option<PathBuf>, CollaboratorError> {
        Ok(None)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordCall {
    pub duration_secs: f64,
}

#[derive(Default)]
struct FakeAudioState {
    calls: Vec<RecordCall>,
}

/// Deterministic in-memory `Audio` for tests: returns a fixed path and
/// records every call made to it.
#[derive(Clone)]
pub struct FakeAudio {
    output_path: Option<PathBuf>,
    state: Arc<Mutex<FakeAudioState>>,
}

impl FakeAudio {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: Some(output_path.into()),
            state: Arc::new(Mutex::new(FakeAudioState::default())),
        }
    }

    pub fn silent() -> Self {
        Self {
            output_path: None,
            state: Arc::new(Mutex::new(FakeAudioState::default())),
        }
    }

    pub fn calls(&self) -> Vec<RecordCall> {
        self.state.lock().calls.clone()
    }
}

#[async_trait]
impl Audio for FakeAudio {
    async fn record(&self, duration_secs: f64) -> Result<Option<PathBuf>, CollaboratorError> {
        self.state.lock().calls.push(RecordCall { duration_secs });
        Ok(self.output_path.clone())
    }
}

#[cfg(test)]
#[path = "audio_tests.rs"]
mod tests;
