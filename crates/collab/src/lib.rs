// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters implementing the collaborator traits declared in `vap-core`:
//! audio capture, speech-to-text, text-to-speech, LLM connectors, cache,
//! logger, parental control, and content filter. Each subsystem ships a
//! `fake` (deterministic, in-memory, used in tests) and a `noop` (silently
//! declines, used when a collaborator isn't configured); the cache and
//! logger additionally ship a file-backed adapter since those two have a
//! genuinely local, hardware-free contract.

pub mod audio;
pub mod cache;
pub mod content_filter;
pub mod llm;
pub mod logger;
pub mod parental_control;
pub mod stt;
pub mod tts;

pub use audio::{FakeAudio, NoOpAudio};
pub use cache::{FileCache, InMemoryCache};
pub use content_filter::{FakeContentFilter, NoOpContentFilter};
pub use llm::{FakeLlmConnector, NoOpLlmConnector};
pub use logger::{FileLogger, NoOpLogger, TracingLogger};
pub use parental_control::{NoOpParentalControl, PermissiveParentalControl};
pub use stt::{FakeSpeechToText, NoOpSpeechToText};
pub use tts::{FakeTextToSpeech, NoOpTextToSpeech};
