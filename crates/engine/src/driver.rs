// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The engine driver: the top-level state machine that loads a pipeline
//! document and runs its steps in order.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::path::Path;

use serde_json::{Map, Value};
use vap_core::{EngineError, EngineResult, ErrorEntry, ExecutionContext};
use vap_document::{parse_file, PipelineDocument};

use crate::dispatcher::dispatch_step;
use crate::registry::ComponentRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EngineState {
    Idle,
    Loaded,
    Running,
    Completed,
    Failed,
    Cancelled,
}

/// The outcome of a completed (or aborted) run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub success: bool,
    pub results: Map<String, Value>,
    pub errors: Vec<ErrorEntry>,
}

/// What `start` hands back: a resolved outcome for a synchronous run, or a
/// joinable, cancellable handle for an asynchronous one. One method, one
/// return type, rather than two separate entry points.
pub enum StartOutcome {
    Completed(RunOutcome),
    Spawned(RunHandle),
}

/// A background run in progress. `cancel` sets the cooperative cancellation
/// flag the driver checks between steps; `join` waits for it to finish.
pub struct RunHandle {
    join: tokio::task::JoinHandle<(RunOutcome, ExecutionContext)>,
    cancelled: Arc<AtomicBool>,
}

impl RunHandle {
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Waits for the background run to finish and folds its final context
    /// back into `engine`, completing the `Running → (Completed|Failed|
    /// Cancelled)` transition the same way a synchronous run does. Until
    /// this is called, `engine` stays in `Running` and rejects a new
    /// `load_pipeline`/`start`.
    pub async fn join(self, engine: &mut Engine) -> EngineResult<RunOutcome> {
        let (outcome, context) = self
            .join
            .await
            .map_err(|err| EngineError::State(format!("run task panicked: {err}")))?;
        engine.state = if outcome.success {
            EngineState::Completed
        } else if self.cancelled.load(Ordering::SeqCst) {
            EngineState::Cancelled
        } else {
            EngineState::Failed
        };
        engine.context = Some(context);
        Ok(outcome)
    }
}

/// Executes a single pipeline document's steps in order, mutating one
/// [`ExecutionContext`] per run. Cheap to construct per run; the
/// [`ComponentRegistry`] it holds is `Arc`-shared so sub-pipeline steps reuse
/// the parent's registered components without copying them.
pub struct Engine {
    registry: ComponentRegistry,
    document: Option<PipelineDocument>,
    context: Option<ExecutionContext>,
    state: EngineState,
    cancelled: Arc<AtomicBool>,
}

impl Engine {
    pub fn new(registry: ComponentRegistry) -> Self {
        Self {
            registry,
            document: None,
            context: None,
            state: EngineState::Idle,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// A fresh registry pre-populated with every built-in component.
    pub fn with_builtins() -> Self {
        let mut registry = ComponentRegistry::new();
        crate::components::register_builtins(&mut registry);
        Self::new(registry)
    }

    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    /// The run's final context. Populated once a run (sync or already
    /// joined) has completed; `None` before any run or while a spawned run
    /// is still in flight (its context moved onto the background task).
    pub fn context(&self) -> Option<&ExecutionContext> {
        self.context.as_ref()
    }

    pub fn load_pipeline(&mut self, document: PipelineDocument) -> EngineResult<()> {
        if self.state == EngineState::Running {
            return Err(EngineError::State("cannot load a pipeline while running".into()));
        }
        self.context = Some(ExecutionContext::new(document.variables.clone()));
        self.document = Some(document);
        self.state = EngineState::Loaded;
        self.cancelled.store(false, Ordering::SeqCst);
        Ok(())
    }

    pub fn load_pipeline_from_file(&mut self, path: impl AsRef<Path>) -> EngineResult<()> {
        let document = parse_file(path).map_err(|err| EngineError::Parse(err.to_string()))?;
        self.load_pipeline(document)
    }

    /// Seed (or override) the run's variables before `start`, used by
    /// sub-pipeline steps to inject the parent's variables on top of the
    /// sub-document's own defaults.
    pub fn seed_variables(&mut self, variables: &Map<String, Value>) {
        if let Some(context) = self.context.as_mut() {
            for (key, value) in variables {
                context.variables.insert(key.clone(), value.clone());
            }
        }
    }

    pub fn stop(&mut self) -> bool {
        if self.state == EngineState::Running {
            self.cancelled.store(true, Ordering::SeqCst);
            true
        } else {
            false
        }
    }

    pub async fn start(&mut self, async_mode: bool) -> EngineResult<StartOutcome> {
        if self.state != EngineState::Loaded {
            return Err(EngineError::State(format!(
                "cannot start from state {:?}; call load_pipeline first",
                self.state
            )));
        }

        if async_mode {
            let steps = self
                .document
                .as_ref()
                .map(|doc| doc.steps.clone())
                .unwrap_or_default();
            let mut context = self.context.take().unwrap_or_else(|| ExecutionContext::new(Map::new()));
            let registry = self.registry.clone();
            let cancelled = self.cancelled.clone();
            self.state = EngineState::Running;

            let join = tokio::spawn(async move {
                let outcome = run_steps(&steps, &mut context, &registry, &cancelled).await;
                (outcome, context)
            });

            Ok(StartOutcome::Spawned(RunHandle { join, cancelled }))
        } else {
            self.state = EngineState::Running;
            let steps = self
                .document
                .as_ref()
                .map(|doc| doc.steps.clone())
                .unwrap_or_default();
            let mut context = self.context.take().unwrap_or_else(|| ExecutionContext::new(Map::new()));
            let outcome = run_steps(&steps, &mut context, &self.registry, &self.cancelled).await;
            self.state = if outcome.success {
                EngineState::Completed
            } else if self.cancelled.load(Ordering::SeqCst) {
                EngineState::Cancelled
            } else {
                EngineState::Failed
            };
            self.context = Some(context);
            Ok(StartOutcome::Completed(outcome))
        }
    }
}

async fn run_steps(
    steps: &[vap_document::Step],
    context: &mut ExecutionContext,
    registry: &ComponentRegistry,
    cancelled: &Arc<AtomicBool>,
) -> RunOutcome {
    let mut success = true;
    for (index, step) in steps.iter().enumerate() {
        if cancelled.load(Ordering::SeqCst) {
            success = false;
            break;
        }
        let outcome = dispatch_step(step, index, context, registry).await;
        if !outcome.success && outcome.should_abort {
            success = false;
            break;
        }
    }
    RunOutcome {
        success,
        results: context.results.clone(),
        errors: context.errors.clone(),
    }
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod tests;
