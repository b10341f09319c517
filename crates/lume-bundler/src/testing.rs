//! Test doubles for code that depends on a [`Compiler`].
//!
//! Available with the `test-utils` feature.

use crate::compiler::Compiler;
use crate::options::BuildMode;
use crate::outcome::BuildOutcome;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Semaphore;

/// Compiler that replays a scripted sequence of outcomes.
///
/// Once the script runs out every further compile returns `fallback`
/// (a success by default). Each call is recorded, and the highest number of
/// simultaneously running compiles is tracked so tests can assert builds are
/// serialized.
pub struct ScriptedCompiler {
    script: Mutex<VecDeque<BuildOutcome>>,
    fallback: BuildOutcome,
    calls: Mutex<Vec<BuildMode>>,
    gate: Option<Arc<Semaphore>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedCompiler {
    pub fn new(script: impl IntoIterator<Item = BuildOutcome>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            fallback: BuildOutcome::success(PathBuf::from("dist/bundle.js")),
            calls: Mutex::new(Vec::new()),
            gate: None,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Outcome returned once the script is exhausted.
    pub fn with_fallback(mut self, fallback: BuildOutcome) -> Self {
        self.fallback = fallback;
        self
    }

    /// Make every compile wait for a permit from `gate` before finishing.
    pub fn with_gate(mut self, gate: Arc<Semaphore>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Append an outcome to the script.
    pub fn push(&self, outcome: BuildOutcome) {
        self.script.lock().push_back(outcome);
    }

    pub fn calls(&self) -> Vec<BuildMode> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Compiler for ScriptedCompiler {
    async fn compile(&self, mode: BuildMode) -> BuildOutcome {
        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(running, Ordering::SeqCst);
        self.calls.lock().push(mode);

        if let Some(gate) = &self.gate {
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
        }

        let outcome = self
            .script
            .lock()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        outcome
    }
}
