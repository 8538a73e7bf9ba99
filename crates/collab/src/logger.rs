// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Logger collaborator implementations.
//!
//! [`TracingLogger`] emits one `tracing` event per call so component-level
//! log lines flow into the engine's own structured logging. [`FileLogger`]
//! additionally appends a line to a per-run log file, opening and closing
//! the file on every call the way the worker logger in this workspace's
//! engine crate does; a write failure is logged via `tracing::warn!` and
//! swallowed; logging must never abort a pipeline run.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use chrono::Utc;
use tracing::{debug, error, info, warn};
use vap_core::Logger;

/// Discards every call; used when no logger is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLogger;

impl Logger for NoOpLogger {
    fn debug(&self, _message: &str) {}
    fn info(&self, _message: &str) {}
    fn warning(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
    fn critical(&self, _message: &str) {}
}

/// Routes every call to a `tracing` event at the matching level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn debug(&self, message: &str) {
        debug!(target: "pipeline.component", "{message}");
    }

    fn info(&self, message: &str) {
        info!(target: "pipeline.component", "{message}");
    }

    fn warning(&self, message: &str) {
        warn!(target: "pipeline.component", "{message}");
    }

    fn error(&self, message: &str) {
        error!(target: "pipeline.component", "{message}");
    }

    fn critical(&self, message: &str) {
        error!(target: "pipeline.component", critical = true, "{message}");
    }
}

/// Appends to `{log_dir}/pipeline.log`, one line per call, in addition to
/// emitting the matching `tracing` event.
pub struct FileLogger {
    log_path: PathBuf,
    console: TracingLogger,
}

impl FileLogger {
    pub fn new(log_dir: impl Into<PathBuf>) -> Self {
        Self {
            log_path: log_dir.into().join("pipeline.log"),
            console: TracingLogger,
        }
    }

    fn append(&self, level: &str, message: &str) {
        if let Some(parent) = self.log_path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                warn!(path = %self.log_path.display(), "failed to create log directory");
                return;
            }
        }
        let line = format!("{} [{}] {}\n", Utc::now().to_rfc3339(), level, message);
        match OpenOptions::new().create(true).append(true).open(&self.log_path) {
            Ok(mut file) => {
                if let Err(err) = file.write_all(line.as_bytes()) {
                    warn!(path = %self.log_path.display(), error = %err, "failed to write log line");
                }
            }
            Err(err) => {
                warn!(path = %self.log_path.display(), error = %err, "failed to open log file");
            }
        }
    }
}

impl Logger for FileLogger {
    fn debug(&self, message: &str) {
        self.console.debug(message);
        self.append("debug", message);
    }

    fn info(&self, message: &str) {
        self.console.info(message);
        self.append("info", message);
    }

    fn warning(&self, message: &str) {
        self.console.warning(message);
        self.append("warning", message);
    }

    fn error(&self, message: &str) {
        self.console.error(message);
        self.append("error", message);
    }

    fn critical(&self, message: &str) {
        self.console.critical(message);
        self.append("critical", message);
    }
}

#[cfg(test)]
#[path = "logger_tests.rs"]
mod tests;
