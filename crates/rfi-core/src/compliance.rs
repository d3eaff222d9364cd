//! ITU compliance verdicts as reported by the simulation backend.
//!
//! Verdicts are passed through unmodified: `status` is the backend's
//! decision and is never recomputed here.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Binary compliance state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplianceStatus {
    Compliant,
    NonCompliant,
}

impl fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compliant => f.write_str("COMPLIANT"),
            Self::NonCompliant => f.write_str("NON_COMPLIANT"),
        }
    }
}

/// Pass/fail determination against a regulatory time-fraction limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceVerdict {
    /// Recommendation the verdict was evaluated against, e.g. `ITU-R SA.1157`.
    #[serde(rename = "standard", alias = "standard_name")]
    pub standard_name: String,
    pub status: ComplianceStatus,
    /// Percentage of time the SNR loss exceeded `threshold_db`.
    pub observed_time_fraction_pct: f64,
    /// Maximum percentage of time the standard allows.
    pub max_time_fraction_pct: f64,
    /// SNR-loss level (dB) the time fraction refers to.
    pub threshold_db: f64,
}

impl ComplianceVerdict {
    #[must_use]
    pub fn is_compliant(&self) -> bool {
        self.status == ComplianceStatus::Compliant
    }

    /// Whether `status` agrees with the reported percentages.
    ///
    /// The backend guarantees `COMPLIANT` iff observed <= max. This only
    /// detects violations for logging; the status is still taken as is.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let within_limit = self.observed_time_fraction_pct <= self.max_time_fraction_pct;
        within_limit == self.is_compliant()
    }

    /// Check that the numeric fields are finite and the percentages lie in [0, 100].
    pub fn check_ranges(&self) -> Result<(), String> {
        for (name, value) in [
            ("observed_time_fraction_pct", self.observed_time_fraction_pct),
            ("max_time_fraction_pct", self.max_time_fraction_pct),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(format!("verdict {name} out of [0, 100]: {value}"));
            }
        }
        if !self.threshold_db.is_finite() {
            return Err(format!("verdict threshold_db not finite: {}", self.threshold_db));
        }
        Ok(())
    }
}
