// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Variable resolution: expanding `${path.to.value}` references inside
//! step fields against the live [`ExecutionContext`].
//!
//! Grounded on this workspace's template-interpolation engine, but with a
//! different miss policy: an unresolvable reference yields the empty string
//! rather than being left as literal `${...}` text, since components
//! downstream (shell commands, component params) need a concrete value to
//! act on, not a half-templated string.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use vap_core::ExecutionContext;

#[allow(clippy::expect_used)]
static VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z0-9_]+(?:\.[A-Za-z0-9_]+)*)\}").expect("constant regex pattern is valid")
});

#[allow(clippy::expect_used)]
static ENV_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{(\w+):-([^}]*)\}").expect("constant regex pattern is valid"));

/// Resolve every `${...}` reference inside `value` against `context`.
///
/// Strings: environment-variable patterns are expanded first, then context
/// path references. Maps and sequences: resolved element-wise, keys
/// unchanged. Anything else is returned unchanged. A string consisting of
/// exactly one `${path}` token (no surrounding text) preserves the
/// referenced value's native JSON type instead of stringifying it.
pub fn resolve(value: &Value, context: &ExecutionContext) -> Value {
    match value {
        Value::String(s) => resolve_string(s, context),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), resolve(v, context)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(|v| resolve(v, context)).collect()),
        other => other.clone(),
    }
}

fn resolve_string(template: &str, context: &ExecutionContext) -> Value {
    let env_expanded = ENV_PATTERN
        .replace_all(template, |caps: &regex::Captures| {
            let var_name = &caps[1];
            let default_value = &caps[2];
            std::env::var(var_name).unwrap_or_else(|_| default_value.to_string())
        })
        .to_string();

    if let Some(whole) = whole_token_path(&env_expanded) {
        return lookup_path(&whole, context).unwrap_or(Value::String(String::new()));
    }

    let substituted = VAR_PATTERN.replace_all(&env_expanded, |caps: &regex::Captures| {
        let path = &caps[1];
        match lookup_path(path, context) {
            Some(Value::String(s)) => s,
            Some(other) => other.to_string(),
            None => String::new(),
        }
    });
    Value::String(substituted.to_string())
}

/// If `s` is exactly one `${path}` token with no other text, return the path.
fn whole_token_path(s: &str) -> Option<String> {
    let caps = VAR_PATTERN.captures(s)?;
    let m = caps.get(0)?;
    if m.start() == 0 && m.end() == s.len() {
        Some(caps[1].to_string())
    } else {
        None
    }
}

/// Walk a dotted path against the context's named roots
/// (`variables`, `results`, `state`, `errors`, `timers`); any other leading
/// segment starts from the root `Map` formed by all five roots combined.
fn lookup_path(path: &str, context: &ExecutionContext) -> Option<Value> {
    let mut parts = path.split('.');
    let head = parts.next()?;
    let mut current = context.root(head)?;
    for part in parts {
        current = match current {
            Value::Object(ref map) => map.get(part)?.clone(),
            _ => return None,
        };
    }
    Some(current)
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
