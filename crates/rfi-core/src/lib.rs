//! # rfi-core
//!
//! Core types for comparing two RFI scenarios against ITU compliance limits:
//! scenario configuration, normalized simulation results, compliance
//! verdicts, and the `SimulationBackend` trait consumed by orchestration.

pub mod backend;
pub mod band;
pub mod cancel;
pub mod compliance;
pub mod constants;
pub mod results;
pub mod scenario;

// Re-exports
pub use backend::{AnalysisKind, SimulationBackend, SimulationError};
pub use band::Band;
pub use cancel::CancellationToken;
pub use compliance::{ComplianceStatus, ComplianceVerdict};
pub use constants::exit_codes;
pub use results::{AggregateResult, CcdfCurve, DynamicResult};
pub use scenario::{ConfigError, InterfererParams, LinkParams, ScenarioConfig, ScenarioLabel};
