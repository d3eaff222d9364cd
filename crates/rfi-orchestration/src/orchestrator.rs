//! Core orchestration: concurrent fan-out, all-or-nothing join, and run state.
//!
//! The orchestrator owns both live scenario configurations and the visible
//! run state. Every run gets a generation number; only the run holding the
//! latest generation may publish its outcome. Starting a run cancels the
//! previous one and clears its result before any request is issued.

use std::future::Future;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn, Instrument};

use rfi_core::{
    AnalysisKind, CancellationToken, ConfigError, ScenarioConfig, ScenarioLabel,
    SimulationBackend, SimulationError,
};

use crate::interfaces::ComparisonResult;

/// Error type for a comparison run.
#[derive(Debug, thiserror::Error)]
pub enum ComparisonError {
    /// A scenario snapshot violates the configuration invariants.
    #[error("scenario {scenario} is invalid")]
    InvalidScenario {
        scenario: ScenarioLabel,
        #[source]
        source: ConfigError,
    },

    /// One of the four backend calls failed.
    #[error("{kind} simulation of scenario {scenario} failed")]
    Simulation {
        kind: AnalysisKind,
        scenario: ScenarioLabel,
        #[source]
        source: SimulationError,
    },

    /// The run was cancelled before it completed.
    #[error("comparison cancelled")]
    Cancelled,

    /// A newer run replaced this one; its outcome was discarded.
    #[error("comparison superseded by a newer run")]
    Superseded,
}

/// Visible state of the most recent run.
#[derive(Debug, Clone)]
pub enum RunState {
    /// No run has been started.
    Idle,
    /// A run is in flight.
    Running { generation: u64 },
    /// The latest run produced a complete result.
    Succeeded {
        generation: u64,
        result: Arc<ComparisonResult>,
    },
    /// The latest run failed; no result is visible.
    Failed { generation: u64, reason: String },
}

impl RunState {
    /// Result of the latest run, if it succeeded.
    #[must_use]
    pub fn result(&self) -> Option<&Arc<ComparisonResult>> {
        match self {
            Self::Succeeded { result, .. } => Some(result),
            _ => None,
        }
    }
}

struct Inner {
    scenario_a: ScenarioConfig,
    scenario_b: ScenarioConfig,
    generation: u64,
    run_state: RunState,
    in_flight: Option<CancellationToken>,
}

/// Everything a run needs, captured under the lock when it starts.
struct RunTicket {
    generation: u64,
    scenario_a: ScenarioConfig,
    scenario_b: ScenarioConfig,
    cancel: CancellationToken,
}

/// Compares two scenarios by running both analyses for each concurrently.
pub struct ComparisonOrchestrator<B> {
    backend: B,
    inner: Mutex<Inner>,
}

impl<B: SimulationBackend> ComparisonOrchestrator<B> {
    /// Create an orchestrator with default scenarios on both sides.
    pub fn new(backend: B) -> Self {
        Self::with_scenarios(backend, ScenarioConfig::default(), ScenarioConfig::default())
    }

    /// Create an orchestrator with the given live scenarios.
    pub fn with_scenarios(backend: B, scenario_a: ScenarioConfig, scenario_b: ScenarioConfig) -> Self {
        Self {
            backend,
            inner: Mutex::new(Inner {
                scenario_a,
                scenario_b,
                generation: 0,
                run_state: RunState::Idle,
                in_flight: None,
            }),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Current live configuration of one scenario.
    pub fn scenario(&self, label: ScenarioLabel) -> ScenarioConfig {
        let inner = self.inner.lock();
        match label {
            ScenarioLabel::A => inner.scenario_a.clone(),
            ScenarioLabel::B => inner.scenario_b.clone(),
        }
    }

    /// Replace one live scenario. A run already in flight keeps its snapshot.
    pub fn set_scenario(&self, label: ScenarioLabel, config: ScenarioConfig) {
        let mut inner = self.inner.lock();
        match label {
            ScenarioLabel::A => inner.scenario_a = config,
            ScenarioLabel::B => inner.scenario_b = config,
        }
    }

    pub fn run_state(&self) -> RunState {
        self.inner.lock().run_state.clone()
    }

    /// Result of the latest run, if it succeeded.
    pub fn last_result(&self) -> Option<Arc<ComparisonResult>> {
        self.inner.lock().run_state.result().cloned()
    }

    /// Cancel the run in flight, if any. Returns whether one was running.
    pub fn cancel(&self) -> bool {
        let inner = self.inner.lock();
        match &inner.in_flight {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }

    /// Replace both live scenarios and compare them.
    pub async fn compare(
        &self,
        scenario_a: ScenarioConfig,
        scenario_b: ScenarioConfig,
    ) -> Result<Arc<ComparisonResult>, ComparisonError> {
        let ticket = self.begin(Some((scenario_a, scenario_b)));
        self.drive(ticket).await
    }

    /// Compare the current live scenarios.
    pub async fn run(&self) -> Result<Arc<ComparisonResult>, ComparisonError> {
        let ticket = self.begin(None);
        self.drive(ticket).await
    }

    fn begin(&self, replacement: Option<(ScenarioConfig, ScenarioConfig)>) -> RunTicket {
        let mut inner = self.inner.lock();
        if let Some((a, b)) = replacement {
            inner.scenario_a = a;
            inner.scenario_b = b;
        }
        if let Some(previous) = inner.in_flight.take() {
            debug!(superseded = inner.generation, "cancelling in-flight comparison");
            previous.cancel();
        }

        inner.generation += 1;
        let generation = inner.generation;
        let cancel = CancellationToken::new();
        inner.in_flight = Some(cancel.clone());
        inner.run_state = RunState::Running { generation };

        RunTicket {
            generation,
            scenario_a: inner.scenario_a.clone(),
            scenario_b: inner.scenario_b.clone(),
            cancel,
        }
    }

    async fn drive(&self, ticket: RunTicket) -> Result<Arc<ComparisonResult>, ComparisonError> {
        let guard = AbandonGuard {
            inner: &self.inner,
            generation: Some(ticket.generation),
        };
        let span = tracing::info_span!("comparison", generation = ticket.generation);
        let outcome = self
            .execute(&ticket.scenario_a, &ticket.scenario_b, &ticket.cancel)
            .instrument(span)
            .await;
        guard.disarm();
        self.finish(ticket.generation, outcome)
    }

    async fn execute(
        &self,
        scenario_a: &ScenarioConfig,
        scenario_b: &ScenarioConfig,
        cancel: &CancellationToken,
    ) -> Result<ComparisonResult, ComparisonError> {
        validate(ScenarioLabel::A, scenario_a)?;
        validate(ScenarioLabel::B, scenario_b)?;

        info!("starting comparison");
        let backend = &self.backend;
        let joined = async {
            tokio::try_join!(
                tagged(AnalysisKind::Dynamic, ScenarioLabel::A, backend.run_dynamic(scenario_a)),
                tagged(AnalysisKind::Dynamic, ScenarioLabel::B, backend.run_dynamic(scenario_b)),
                tagged(AnalysisKind::Aggregate, ScenarioLabel::A, backend.run_aggregate(scenario_a)),
                tagged(AnalysisKind::Aggregate, ScenarioLabel::B, backend.run_aggregate(scenario_b)),
            )
        };

        let (dynamic_a, dynamic_b, aggregate_a, aggregate_b) = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(ComparisonError::Cancelled),
            joined = joined => joined?,
        };

        Ok(ComparisonResult {
            dynamic_a,
            dynamic_b,
            aggregate_a,
            aggregate_b,
        })
    }

    /// Publish the outcome of run `generation` unless a newer run exists.
    fn finish(
        &self,
        generation: u64,
        outcome: Result<ComparisonResult, ComparisonError>,
    ) -> Result<Arc<ComparisonResult>, ComparisonError> {
        let mut inner = self.inner.lock();
        if inner.generation != generation {
            debug!(generation, latest = inner.generation, "discarding superseded comparison");
            return Err(ComparisonError::Superseded);
        }
        inner.in_flight = None;

        match outcome {
            Ok(result) => {
                let result = Arc::new(result);
                info!(generation, "comparison succeeded");
                inner.run_state = RunState::Succeeded {
                    generation,
                    result: Arc::clone(&result),
                };
                Ok(result)
            }
            Err(err) => {
                let reason = error_chain(&err);
                warn!(generation, error = %reason, "comparison failed");
                inner.run_state = RunState::Failed { generation, reason };
                Err(err)
            }
        }
    }
}

/// Fails the run if its future is dropped before `finish` runs.
struct AbandonGuard<'a> {
    inner: &'a Mutex<Inner>,
    generation: Option<u64>,
}

impl AbandonGuard<'_> {
    fn disarm(mut self) {
        self.generation = None;
    }
}

impl Drop for AbandonGuard<'_> {
    fn drop(&mut self) {
        let Some(generation) = self.generation.take() else {
            return;
        };
        let mut inner = self.inner.lock();
        if inner.generation != generation {
            return;
        }
        if let Some(token) = inner.in_flight.take() {
            token.cancel();
        }
        warn!(generation, "comparison abandoned by its caller");
        inner.run_state = RunState::Failed {
            generation,
            reason: ComparisonError::Cancelled.to_string(),
        };
    }
}

/// `err` and its sources joined with `": "`.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn validate(scenario: ScenarioLabel, config: &ScenarioConfig) -> Result<(), ComparisonError> {
    config
        .validate()
        .map_err(|source| ComparisonError::InvalidScenario { scenario, source })
}

async fn tagged<T>(
    kind: AnalysisKind,
    scenario: ScenarioLabel,
    call: impl Future<Output = Result<T, SimulationError>>,
) -> Result<T, ComparisonError> {
    let value = call.await.map_err(|source| {
        warn!(%kind, %scenario, error = %source, "simulation call failed");
        ComparisonError::Simulation {
            kind,
            scenario,
            source,
        }
    })?;
    debug!(%kind, %scenario, "simulation call completed");
    Ok(value)
}
