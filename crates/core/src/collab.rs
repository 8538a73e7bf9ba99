// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Collaborator contracts: the traits components call into for audio,
//! speech, language-model, cache, logging, and safety behavior.
//!
//! These traits live in `vap-core` rather than the `vap-collab` crate that
//! implements them because [`crate::context::ExecutionContext`] needs to
//! name them in its collaborator slots; `vap-collab` depends on `vap-core`
//! to provide fakes, no-ops, and file-backed adapters against them, not the
//! other way around.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum CollaboratorError {
    #[error("not configured: {0}")]
    NotConfigured(String),
    #[error("{0}")]
    Failed(String),
}

impl CollaboratorError {
    /// A stable prefix callers can match on without downcasting, mirroring
    /// the original system's convention of error strings carrying a known
    /// sentinel.
    pub const SENTINEL: &'static str = "[collaborator-error]";

    pub fn sentinel_message(&self) -> String {
        format!("{} {}", Self::SENTINEL, self)
    }
}

#[async_trait]
pub trait Audio: Send + Sync {
    /// Records for `duration_secs` seconds and returns the path to the
    /// captured (and preprocessed) audio, or `None` if no audio device is
    /// configured.
    async fn record(&self, duration_secs: f64) -> Result<Option<PathBuf>, CollaboratorError>;
}

#[async_trait]
pub trait SpeechToText: Send + Sync {
    async fn transcribe(&self, audio_path: &Path, language: &str) -> Result<String, CollaboratorError>;
}

#[async_trait]
pub trait TextToSpeech: Send + Sync {
    async fn speak(&self, text: &str) -> Result<bool, CollaboratorError>;
    async fn save_to_file(&self, text: &str, path: &Path) -> Result<bool, CollaboratorError>;
}

#[async_trait]
pub trait LlmConnector: Send + Sync {
    async fn query(&self, text: &str, context: Option<&str>) -> Result<String, CollaboratorError>;
}

pub trait Cache: Send + Sync {
    fn get(&self, key: &str) -> Option<serde_json::Value>;
    fn set(&self, key: &str, value: serde_json::Value);
    fn clear(&self);
}

pub trait Logger: Send + Sync {
    fn debug(&self, message: &str);
    fn info(&self, message: &str);
    fn warning(&self, message: &str);
    fn error(&self, message: &str);
    fn critical(&self, message: &str);
}

pub trait ParentalControl: Send + Sync {
    fn check_time_restrictions(&self) -> bool;
    fn check_usage_limit(&self) -> bool;
    fn get_remaining_time(&self) -> i64;
    fn update_usage(&self, minutes: f64);
    /// Returns `(rewritten_text_or_none, reason)`; `None` means the input was
    /// rejected outright and must not be passed downstream.
    fn filter_input(&self, text: &str) -> (Option<String>, String);
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EducationalValue {
    pub educational_value: f64,
    pub topics: Vec<String>,
}

pub trait ContentFilter: Send + Sync {
    fn sanitize_content(&self, text: &str, age_group: &str) -> String;
    fn evaluate_educational_value(&self, text: &str) -> EducationalValue;
}
