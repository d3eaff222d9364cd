//! Error handling and exit codes.

use rfi_core::exit_codes;
use rfi_core::{ConfigError, SimulationError};
use rfi_orchestration::ComparisonError;

/// Exit code for a failed comparison.
#[must_use]
pub fn handle_error(err: &ComparisonError) -> i32 {
    match err {
        ComparisonError::InvalidScenario { .. } => exit_codes::ERROR_CONFIG,
        ComparisonError::Simulation { source, .. } => match source {
            SimulationError::Timeout(_) => exit_codes::ERROR_TIMEOUT,
            SimulationError::MalformedResponse(_) => exit_codes::ERROR_MALFORMED,
            SimulationError::Transport(_) | SimulationError::Backend { .. } => {
                exit_codes::ERROR_GENERIC
            }
        },
        ComparisonError::Cancelled => exit_codes::ERROR_CANCELED,
        ComparisonError::Superseded => exit_codes::ERROR_GENERIC,
    }
}

/// Exit code for any application error.
#[must_use]
pub fn exit_code(err: &anyhow::Error) -> i32 {
    if let Some(err) = err.downcast_ref::<ComparisonError>() {
        handle_error(err)
    } else if err.downcast_ref::<ConfigError>().is_some() {
        exit_codes::ERROR_CONFIG
    } else {
        exit_codes::ERROR_GENERIC
    }
}
