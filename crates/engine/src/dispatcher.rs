// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The step dispatcher: guard evaluation, field resolution, type-specific
//! execution, and result/error bookkeeping for a single [`Step`].

use rhai::{Dynamic, Scope};
use serde_json::{json, Map, Value};
use vap_core::{EngineError, EngineResult, ExecutionContext};
use vap_document::{evaluate_condition, resolve, sandboxed_engine, Step, StepKind};

use crate::registry::ComponentRegistry;

/// What happened when a single step ran: whether it succeeded, the value it
/// produced, and whether the run as a whole must now stop.
pub struct StepOutcome {
    pub name: String,
    pub success: bool,
    pub value: Value,
    pub should_abort: bool,
}

/// Run one step against `context`, recording its result or error and
/// returning whether the caller's run loop must stop.
///
/// Guarded-false steps write nothing and never abort. A step whose handler
/// returns `Ok((false, _))` is treated the same as `Err`: an error entry is
/// appended and `continue_on_error` decides whether the run proceeds.
pub async fn dispatch_step(
    step: &Step,
    index: usize,
    context: &mut ExecutionContext,
    registry: &ComponentRegistry,
) -> StepOutcome {
    let name = step.effective_name(index);

    if !evaluate_condition(step.guard.as_deref(), context, &name) {
        return StepOutcome {
            name,
            success: true,
            value: Value::Null,
            should_abort: false,
        };
    }

    let resolved_kind = resolve_step_kind(&step.kind, context);
    let outcome = match &resolved_kind {
        StepKind::Component { component, params } => execute_component(component, params, context, registry).await,
        StepKind::Shell {
            command,
            working_dir,
            ignore_errors,
        } => execute_shell(command, working_dir.as_deref(), *ignore_errors).await,
        StepKind::Script { code, imports } => execute_script(code, imports, context),
        StepKind::Pipeline {
            path,
            variables,
            export_variables,
        } => crate::pipeline_step::execute(path, variables, *export_variables, context, registry).await,
    };

    match outcome {
        Ok((true, value)) => {
            context.results.insert(name.clone(), value.clone());
            StepOutcome {
                name,
                success: true,
                value,
                should_abort: false,
            }
        }
        Ok((false, value)) => {
            context.push_error(name.clone(), "ExecutionError", "step reported failure");
            StepOutcome {
                name,
                success: false,
                value,
                should_abort: !step.continue_on_error,
            }
        }
        Err(err) => {
            context.push_error(name.clone(), error_kind(&err), err.to_string());
            StepOutcome {
                name,
                success: false,
                value: Value::Null,
                should_abort: !step.continue_on_error,
            }
        }
    }
}

fn error_kind(err: &EngineError) -> &'static str {
    match err {
        EngineError::Parse(_) => "ParseError",
        EngineError::Validation { .. } => "ValidationError",
        EngineError::Resolution { .. } => "ResolutionError",
        EngineError::Execution { .. } => "ExecutionError",
        EngineError::State(_) => "StateError",
        EngineError::Io(_) => "IoError",
    }
}

/// Resolve `${...}` references in every field the dispatcher contract names:
/// `params`, `command`, `working_dir`, `code`, `path`, `variables`.
fn resolve_step_kind(kind: &StepKind, context: &ExecutionContext) -> StepKind {
    match kind {
        StepKind::Component { component, params } => StepKind::Component {
            component: component.clone(),
            params: as_object(resolve(&Value::Object(params.clone()), context)),
        },
        StepKind::Shell {
            command,
            working_dir,
            ignore_errors,
        } => StepKind::Shell {
            command: as_string(resolve(&Value::String(command.clone()), context)),
            working_dir: working_dir
                .as_ref()
                .map(|dir| as_string(resolve(&Value::String(dir.clone()), context))),
            ignore_errors: *ignore_errors,
        },
        StepKind::Script { code, imports } => StepKind::Script {
            code: as_string(resolve(&Value::String(code.clone()), context)),
            imports: imports.clone(),
        },
        StepKind::Pipeline {
            path,
            variables,
            export_variables,
        } => StepKind::Pipeline {
            path: as_string(resolve(&Value::String(path.clone()), context)),
            variables: as_object(resolve(&Value::Object(variables.clone()), context)),
            export_variables: *export_variables,
        },
    }
}

fn as_object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn as_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

async fn execute_component(
    component: &str,
    params: &Map<String, Value>,
    context: &mut ExecutionContext,
    registry: &ComponentRegistry,
) -> EngineResult<(bool, Value)> {
    let executor = registry
        .lookup(component)
        .ok_or_else(|| EngineError::validation(component, format!("no component registered named '{component}'")))?;
    executor.execute(params, context).await
}

async fn execute_shell(command: &str, working_dir: Option<&str>, ignore_errors: bool) -> EngineResult<(bool, Value)> {
    let mut cmd = tokio::process::Command::new("sh");
    cmd.arg("-c").arg(command);
    if let Some(dir) = working_dir {
        cmd.current_dir(dir);
    }
    let output = cmd
        .output()
        .await
        .map_err(|err| EngineError::execution("shell", err.to_string()))?;
    let exit_code = output.status.code().unwrap_or(-1);
    let success = output.status.success() || ignore_errors;
    let value = json!({
        "exit_code": exit_code,
        "stdout": String::from_utf8_lossy(&output.stdout),
        "stderr": String::from_utf8_lossy(&output.stderr),
    });
    Ok((success, value))
}

/// Evaluate `code` in the sandboxed engine shared with condition evaluation.
/// A single variable `context` (with `variables`/`state`/`results` fields)
/// is bound into scope before evaluation and copied back into the real
/// context afterward, so the script can both read and write it. `imports`
/// were already checked against the allow-list at parse time; rhai has no
/// host-level module loader for them to resolve against at run time.
fn execute_script(code: &str, imports: &[String], context: &mut ExecutionContext) -> EngineResult<(bool, Value)> {
    let _ = imports;
    let engine = sandboxed_engine();
    let mut scope = Scope::new();

    let view = json!({
        "variables": context.variables,
        "state": context.state,
        "results": context.results,
    });
    let dynamic: Dynamic =
        rhai::serde::to_dynamic(&view).map_err(|err| EngineError::execution("script", err.to_string()))?;
    scope.push("context", dynamic);

    let result: Dynamic = engine
        .eval_with_scope(&mut scope, code)
        .map_err(|err| EngineError::execution("script", err.to_string()))?;

    if let Some(updated) = scope.get_value::<Dynamic>("context") {
        if let Ok(Value::Object(map)) = rhai::serde::from_dynamic::<Value>(&updated) {
            if let Some(Value::Object(vars)) = map.get("variables") {
                context.variables = vars.clone();
            }
            if let Some(Value::Object(state)) = map.get("state") {
                context.state = state.clone();
            }
            if let Some(Value::Object(results)) = map.get("results") {
                context.results = results.clone();
            }
        }
    }

    let result_value = rhai::serde::from_dynamic(&result).unwrap_or(Value::Null);
    Ok((true, result_value))
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
