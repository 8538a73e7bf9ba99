// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The pipeline document's typed shape: what a parsed YAML/TOML/JSON file
//! decodes into before any variable resolution happens.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A parsed pipeline: a name, a variable seed, and an ordered step list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineDocument {
    pub name: Option<String>,
    pub description: Option<String>,
    pub version: Option<String>,
    #[serde(default)]
    pub variables: Map<String, Value>,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(flatten)]
    pub kind: StepKind,
    #[serde(rename = "if", default)]
    pub guard: Option<String>,
    #[serde(default)]
    pub continue_on_error: bool,
}

impl Step {
    /// `name`, or `step_<index>` if the document left it unset.
    pub fn effective_name(&self, index: usize) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("step_{index}"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepKind {
    Component {
        component: String,
        #[serde(default)]
        params: Map<String, Value>,
    },
    Shell {
        command: String,
        working_dir: Option<String>,
        #[serde(default)]
        ignore_errors: bool,
    },
    Script {
        code: String,
        #[serde(default)]
        imports: Vec<String>,
    },
    Pipeline {
        path: String,
        #[serde(default)]
        variables: Map<String, Value>,
        #[serde(default)]
        export_variables: bool,
    },
}

/// Names steps may list under `script.imports`; rhai has no host-level
/// module loader to gate at evaluation time, so this is enforced once, here,
/// at parse time.
pub const ALLOWED_SCRIPT_IMPORTS: &[&str] = &["string", "math", "array"];
