// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The component registry: a name-to-executor map every `type: component`
//! step dispatches through.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use vap_core::{EngineResult, ExecutionContext};

/// A named, registrable unit of step behavior.
///
/// `execute` must not mutate `params` — the dispatcher resolves variable
/// references into a fresh copy before every call, and a component that
/// wrote back into it would leak state across steps that happen to share a
/// `params` value. Components that reach a collaborator (audio, speech,
/// LLM) suspend at that call; `execute` is `async` so the driver can poll
/// other work (in practice, none — the engine runs one step at a time) and
/// so cancellation can be observed between steps rather than blocking a
/// worker thread on I/O.
#[async_trait]
pub trait Component: Send + Sync {
    async fn execute(
        &self,
        params: &Map<String, Value>,
        context: &mut ExecutionContext,
    ) -> EngineResult<(bool, Value)>;
}

/// Maps a component name to its executor. Cheaply cloneable (`Arc`-backed)
/// so a sub-pipeline can share its parent's registry without copying it.
#[derive(Clone, Default)]
pub struct ComponentRegistry {
    components: HashMap<String, Arc<dyn Component>>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `component` under `name`, replacing any prior registration.
    pub fn register(&mut self, name: impl Into<String>, component: Arc<dyn Component>) {
        self.components.insert(name.into(), component);
    }

    pub fn lookup(&self, name: &str) -> Option<Arc<dyn Component>> {
        self.components.get(name).cloned()
    }

    pub fn list(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.components.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
