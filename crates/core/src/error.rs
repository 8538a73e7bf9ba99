// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error hierarchy for the pipeline engine.
//!
//! Every narrower error variant (parse, validation, resolution, execution,
//! state) is folded into one `EngineError` so component and dispatcher code
//! returns a single `Result` type alias, the way `oj-engine`'s `RuntimeError`
//! aggregates its callers' errors via `#[from]`.

use thiserror::Error;

pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    /// The pipeline document is syntactically invalid, or fails structural
    /// validation (missing `steps`, malformed step shape) at parse time.
    #[error("parse error: {0}")]
    Parse(String),

    /// A component's required parameter is missing or of the wrong shape.
    #[error("validation error in step {step}: {message}")]
    Validation { step: String, message: String },

    /// A variable reference was rejected by code that explicitly refuses an
    /// empty resolution, rather than tolerating it.
    #[error("resolution error in step {step}: {message}")]
    Resolution { step: String, message: String },

    /// A collaborator, shell command, or script step failed.
    #[error("execution error in step {step}: {message}")]
    Execution { step: String, message: String },

    /// The engine was asked to do something its current lifecycle state
    /// forbids (start without a loaded pipeline, double start, ...).
    #[error("invalid engine state: {0}")]
    State(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    pub fn validation(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            step: step.into(),
            message: message.into(),
        }
    }

    pub fn resolution(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Resolution {
            step: step.into(),
            message: message.into(),
        }
    }

    pub fn execution(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Execution {
            step: step.into(),
            message: message.into(),
        }
    }
}
