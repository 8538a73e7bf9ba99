// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use async_trait::async_trait;
use serde_json::{Map, Value};
use vap_core::{EngineError, EngineResult, ExecutionContext};

use crate::registry::Component;

use super::{logger_handle, opt_bool, opt_str, require_str};

/// Routes `message` to the [`vap_core::Logger`] collaborator at `level`.
/// The collaborator is created on first use and, once populated, is reused
/// for the remainder of the run regardless of later `log_dir` arguments.
pub struct LoggerComponent;

#[async_trait]
impl Component for LoggerComponent {
    async fn execute(&self, params: &Map<String, Value>, context: &mut ExecutionContext) -> EngineResult<(bool, Value)> {
        let level = require_str(params, "logger", "level")?;
        let message = require_str(params, "logger", "message")?;
        let log_to_console = opt_bool(params, "log_to_console", true);
        let logger = logger_handle(context, opt_str(params, "log_dir"), log_to_console);

        match level {
            "debug" => logger.debug(message),
            "info" => logger.info(message),
            "warning" => logger.warning(message),
            "error" => logger.error(message),
            "critical" => logger.critical(message),
            other => return Err(EngineError::validation("logger", format!("unknown level '{other}'"))),
        }

        Ok((true, Value::Null))
    }
}

#[cfg(test)]
#[path = "logger_tests.rs"]
mod tests;
