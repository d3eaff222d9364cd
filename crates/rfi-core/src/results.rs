//! Normalized simulation results.
//!
//! Both result types are only constructed through `new`, which checks the
//! shape the rest of the pipeline relies on: equal-length series, ascending
//! axes, probabilities in [0, 1]. Anything else is a malformed response.

use serde::Serialize;

use crate::compliance::ComplianceVerdict;
use crate::constants::MONOTONIC_TOLERANCE;

/// Time-domain SNR-loss trace from a single moving interferer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DynamicResult {
    time_s: Vec<f64>,
    snr_loss_db: Vec<f64>,
    compliance_verdict: ComplianceVerdict,
}

impl DynamicResult {
    /// Build a trace, rejecting series that are not well formed.
    pub fn new(
        time_s: Vec<f64>,
        snr_loss_db: Vec<f64>,
        compliance_verdict: ComplianceVerdict,
    ) -> Result<Self, String> {
        if time_s.is_empty() {
            return Err("dynamic trace is empty".into());
        }
        if time_s.len() != snr_loss_db.len() {
            return Err(format!(
                "dynamic trace length mismatch: {} time samples, {} SNR-loss samples",
                time_s.len(),
                snr_loss_db.len()
            ));
        }
        if let Some(i) = time_s.iter().position(|t| !t.is_finite()) {
            return Err(format!("time_s[{i}] is not finite"));
        }
        if let Some(i) = snr_loss_db.iter().position(|v| !v.is_finite()) {
            return Err(format!("snr_loss_db[{i}] is not finite"));
        }
        if time_s[0].abs() > MONOTONIC_TOLERANCE {
            return Err(format!("time axis starts at {} instead of 0", time_s[0]));
        }
        if let Some(i) = first_non_ascending(&time_s) {
            return Err(format!("time axis not strictly ascending at index {i}"));
        }
        compliance_verdict.check_ranges()?;

        Ok(Self {
            time_s,
            snr_loss_db,
            compliance_verdict,
        })
    }

    /// Sample times in seconds, ascending from 0.
    #[must_use]
    pub fn time_s(&self) -> &[f64] {
        &self.time_s
    }

    /// SNR loss in dB at each sample time.
    #[must_use]
    pub fn snr_loss_db(&self) -> &[f64] {
        &self.snr_loss_db
    }

    #[must_use]
    pub fn compliance_verdict(&self) -> &ComplianceVerdict {
        &self.compliance_verdict
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.time_s.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.time_s.is_empty()
    }

    /// Largest SNR loss over the trace.
    #[must_use]
    pub fn peak_snr_loss_db(&self) -> f64 {
        self.snr_loss_db
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Percentage of samples whose SNR loss is strictly above `threshold_db`.
    ///
    /// Display aid only; the compliance decision is the backend's.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percent_above(&self, threshold_db: f64) -> f64 {
        if self.snr_loss_db.is_empty() {
            return 0.0;
        }
        let above = self.snr_loss_db.iter().filter(|&&v| v > threshold_db).count();
        above as f64 / self.snr_loss_db.len() as f64 * 100.0
    }
}

/// Complementary CDF of SNR loss: `ccdf[i] = P(loss > snr_loss_db[i])`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CcdfCurve {
    snr_loss_db: Vec<f64>,
    ccdf: Vec<f64>,
}

impl CcdfCurve {
    /// Build a curve, rejecting grids that are not ascending or
    /// probabilities that are out of range or increasing.
    pub fn new(snr_loss_db: Vec<f64>, ccdf: Vec<f64>) -> Result<Self, String> {
        if snr_loss_db.is_empty() {
            return Err("CCDF curve is empty".into());
        }
        if snr_loss_db.len() != ccdf.len() {
            return Err(format!(
                "CCDF length mismatch: {} SNR-loss points, {} probabilities",
                snr_loss_db.len(),
                ccdf.len()
            ));
        }
        if let Some(i) = snr_loss_db.iter().position(|v| !v.is_finite()) {
            return Err(format!("ccdf.snr_loss_db[{i}] is not finite"));
        }
        if let Some(i) = first_non_ascending(&snr_loss_db) {
            return Err(format!("CCDF SNR-loss axis not strictly ascending at index {i}"));
        }
        if let Some(i) = ccdf.iter().position(|p| !(0.0..=1.0).contains(p)) {
            return Err(format!("ccdf[{i}] = {} outside [0, 1]", ccdf[i]));
        }
        if let Some(i) = ccdf
            .windows(2)
            .position(|w| w[1] > w[0] + MONOTONIC_TOLERANCE)
        {
            return Err(format!("CCDF increases at index {}", i + 1));
        }

        Ok(Self { snr_loss_db, ccdf })
    }

    #[must_use]
    pub fn snr_loss_db(&self) -> &[f64] {
        &self.snr_loss_db
    }

    #[must_use]
    pub fn ccdf(&self) -> &[f64] {
        &self.ccdf
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ccdf.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ccdf.is_empty()
    }

    /// P(SNR loss > `x_db`), linearly interpolated between grid points and
    /// clamped to the end values outside the grid.
    #[must_use]
    pub fn exceedance_at(&self, x_db: f64) -> f64 {
        let (xs, ps) = (&self.snr_loss_db, &self.ccdf);
        let (Some(&first), Some(&last)) = (xs.first(), xs.last()) else {
            return 0.0;
        };
        if x_db <= first {
            return ps[0];
        }
        if x_db >= last {
            return ps[ps.len() - 1];
        }
        // First grid point strictly above x; exists because x < last.
        let hi = xs.partition_point(|&v| v <= x_db);
        let lo = hi - 1;
        let t = (x_db - xs[lo]) / (xs[hi] - xs[lo]);
        ps[lo] + t * (ps[hi] - ps[lo])
    }
}

/// Statistical result over an interferer population.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateResult {
    ccdf: CcdfCurve,
    compliance_verdict: ComplianceVerdict,
}

impl AggregateResult {
    pub fn new(ccdf: CcdfCurve, compliance_verdict: ComplianceVerdict) -> Result<Self, String> {
        compliance_verdict.check_ranges()?;
        Ok(Self {
            ccdf,
            compliance_verdict,
        })
    }

    #[must_use]
    pub fn ccdf(&self) -> &CcdfCurve {
        &self.ccdf
    }

    #[must_use]
    pub fn compliance_verdict(&self) -> &ComplianceVerdict {
        &self.compliance_verdict
    }
}

fn first_non_ascending(values: &[f64]) -> Option<usize> {
    values.windows(2).position(|w| w[1] <= w[0]).map(|i| i + 1)
}
