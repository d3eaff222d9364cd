//! Simulation backend trait and its error type.
//!
//! `SimulationBackend` is the seam between orchestration and I/O. The HTTP
//! client implements it; tests substitute deterministic stubs.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::results::{AggregateResult, DynamicResult};
use crate::scenario::ScenarioConfig;

/// The two analyses requested per scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnalysisKind {
    /// Time-domain run over a single moving interferer.
    Dynamic,
    /// Statistical run over an interferer population.
    Aggregate,
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dynamic => f.write_str("dynamic"),
            Self::Aggregate => f.write_str("aggregate"),
        }
    }
}

/// Error type for a single backend call.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    /// The request never produced a response (connection, DNS, I/O).
    #[error("transport failure: {0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    #[error("backend returned HTTP {status}: {body}")]
    Backend { status: u16, body: String },

    /// The backend answered 2xx with a body of the wrong shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The call exceeded its configured timeout.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
}

impl SimulationError {
    /// Whether retrying the same request could succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) | Self::Timeout(_) => true,
            Self::Backend { status, .. } => *status >= 500,
            Self::MalformedResponse(_) => false,
        }
    }
}

/// A simulation backend able to run both analyses for one scenario.
///
/// Each call is an independent request: implementations keep no state
/// between calls that could change their result.
pub trait SimulationBackend: Send + Sync {
    /// Run the time-domain analysis.
    fn run_dynamic(
        &self,
        scenario: &ScenarioConfig,
    ) -> impl Future<Output = Result<DynamicResult, SimulationError>> + Send;

    /// Run the aggregate statistical analysis.
    fn run_aggregate(
        &self,
        scenario: &ScenarioConfig,
    ) -> impl Future<Output = Result<AggregateResult, SimulationError>> + Send;
}
