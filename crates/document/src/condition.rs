// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The condition evaluator: a sandboxed boolean expression language used by
//! `if` guards and the `condition` component.
//!
//! Expressions are resolved through the variable resolver first, the words
//! `and`/`or`/`not` are normalized to `&&`/`||`/`!`, and the result is
//! evaluated by an embedded `rhai` engine with no modules, no `eval`, and no
//! host functions registered — there is no file, network, or process access
//! reachable from a condition string no matter what it contains.

use std::sync::LazyLock;

use regex::Regex;
use rhai::{Dynamic, Engine, Scope};
use vap_core::ExecutionContext;

use crate::resolver::resolve;

#[allow(clippy::expect_used)]
static WORD_OPERATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(and|or|not)\b").expect("constant regex pattern is valid"));

fn normalize_operators(expr: &str) -> String {
    WORD_OPERATOR
        .replace_all(expr, |caps: &regex::Captures| match &caps[1] {
            "and" => "&&",
            "or" => "||",
            "not" => "!",
            _ => unreachable!(),
        })
        .to_string()
}

/// A `rhai` engine with no modules, host functions, or `eval` registered,
/// shared by condition evaluation and by the engine crate's script steps so
/// both reach the outside world through exactly the same restricted surface.
pub fn sandboxed_engine() -> Engine {
    let mut engine = Engine::new_raw();
    engine.set_max_operations(100_000);
    engine.set_max_expr_depths(32, 32);
    engine
}

/// Evaluate `condition` against `context`. `None` means "always true".
/// Evaluation failure is recorded as an error entry and treated as `false`
/// rather than aborting the run.
pub fn evaluate(condition: Option<&str>, context: &mut ExecutionContext, step_name: &str) -> bool {
    let Some(expr) = condition else {
        return true;
    };

    let resolved = resolve(&serde_json::Value::String(expr.to_string()), context);
    let expr_str = match resolved {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    };
    let normalized = normalize_operators(&expr_str);

    match eval_bool(&normalized, context) {
        Ok(value) => value,
        Err(err) => {
            context.push_error(step_name, "EvaluationError", err.to_string());
            false
        }
    }
}

fn eval_bool(expr: &str, context: &ExecutionContext) -> Result<bool, Box<rhai::EvalAltResult>> {
    let engine = sandboxed_engine();
    let mut scope = Scope::new();
    for root in ["context", "variables", "results", "state", "errors", "timers"] {
        if let Some(value) = context.root(root) {
            let dynamic: Dynamic = rhai::serde::to_dynamic(&value).unwrap_or(Dynamic::UNIT);
            scope.push_constant(root, dynamic);
        }
    }
    engine.eval_with_scope::<bool>(&mut scope, expr)
}

#[cfg(test)]
#[path = "condition_tests.rs"]
mod tests;
