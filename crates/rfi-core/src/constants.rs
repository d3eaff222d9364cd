//! Fixed request parameters, reference thresholds, and defaults.

/// Service classification sent with every simulation request.
pub const SERVICE_TYPE: &str = "deep-space";

/// Log-normal spread (dB) of the single aggregate interferer descriptor.
pub const AGGREGATE_SIGMA_DB: f64 = 4.0;

/// Duty cycle of the single aggregate interferer descriptor.
pub const AGGREGATE_DUTY_CYCLE: f64 = 1.0;

/// Number of statistical samples requested from the aggregate run.
pub const AGGREGATE_TIME_SAMPLES: u32 = 10_000;

/// Backend path of the time-domain simulation.
pub const DYNAMIC_PATH: &str = "/simulate/dynamic";

/// Backend path of the aggregate statistical simulation.
pub const AGGREGATE_PATH: &str = "/simulate/aggregate";

/// Default simulation backend base URL.
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";

/// Geostationary slant range used by the band presets (km).
pub const GEO_DISTANCE_KM: f64 = 35_786.0;

/// SNR-loss levels (dB) at which CCDF curves are compared in reports.
pub const CCDF_REFERENCE_THRESHOLDS_DB: [f64; 3] = [1.0, 3.0, 6.0];

/// Tolerance used when checking monotonicity of backend curves.
pub const MONOTONIC_TOLERANCE: f64 = 1e-12;

/// Default base delay for exponential backoff between retries (ms).
pub const DEFAULT_BACKOFF_MS: u64 = 250;

/// Process exit codes.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;
    /// Backend or transport failure.
    pub const ERROR_GENERIC: i32 = 1;
    /// A backend call exceeded its timeout.
    pub const ERROR_TIMEOUT: i32 = 2;
    /// The backend answered with data that does not have the expected shape.
    pub const ERROR_MALFORMED: i32 = 3;
    /// Invalid scenario or command-line configuration.
    pub const ERROR_CONFIG: i32 = 4;
    /// Comparison cancelled by user (Ctrl+C).
    pub const ERROR_CANCELED: i32 = 130;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregate_descriptor_constants() {
        assert!((AGGREGATE_SIGMA_DB - 4.0).abs() < f64::EPSILON);
        assert!((AGGREGATE_DUTY_CYCLE - 1.0).abs() < f64::EPSILON);
        assert_eq!(AGGREGATE_TIME_SAMPLES, 10_000);
    }

    #[test]
    fn reference_thresholds_ascending() {
        assert!(CCDF_REFERENCE_THRESHOLDS_DB.windows(2).all(|w| w[0] < w[1]));
    }
}
