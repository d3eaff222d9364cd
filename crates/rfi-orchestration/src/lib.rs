//! # rfi-orchestration
//!
//! Runs the four simulations of a two-scenario comparison concurrently,
//! joins them all-or-nothing, and keeps only the latest run's outcome.

pub mod interfaces;
pub mod orchestrator;

pub use interfaces::{ComparisonPresenter, ComparisonResult};
pub use orchestrator::{ComparisonError, ComparisonOrchestrator, RunState};
