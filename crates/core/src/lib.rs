// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! vap-core: shared types for the pipeline execution engine.
//!
//! This crate owns the runtime value representation, the per-run execution
//! context, identifier helpers, and the error hierarchy every other crate in
//! the workspace returns.

pub mod collab;
pub mod context;
pub mod error;

pub use collab::{
    Audio, Cache, CollaboratorError, ContentFilter, EducationalValue, Logger, ParentalControl,
    SpeechToText, TextToSpeech, LlmConnector,
};
pub use context::{CollaboratorSlots, ErrorEntry, ExecutionContext};
pub use error::{EngineError, EngineResult};

/// Heterogeneous runtime value carried through variables, results, state,
/// and params. A thin alias over `serde_json::Value` so every crate in the
/// workspace speaks the same wire-shaped type without inventing its own
/// variant enum.
pub type Value = serde_json::Value;
