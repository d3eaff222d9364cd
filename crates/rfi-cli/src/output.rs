//! Report formatting and JSON output.

use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use serde::Serialize;

use rfi_core::constants::CCDF_REFERENCE_THRESHOLDS_DB;
use rfi_core::{ComplianceVerdict, ScenarioLabel};
use rfi_orchestration::ComparisonResult;

/// Format a dB value with two decimals.
#[must_use]
pub fn format_db(value: f64) -> String {
    format!("{value:.2} dB")
}

/// Format a time percentage. Small fractions keep more digits so ITU
/// limits like 0.01 % stay readable.
#[must_use]
pub fn format_pct(value: f64) -> String {
    if value != 0.0 && value.abs() < 0.1 {
        format!("{value:.4}%")
    } else {
        format!("{value:.2}%")
    }
}

/// Format an exceedance probability.
#[must_use]
pub fn format_probability(p: f64) -> String {
    if p != 0.0 && p < 1e-3 {
        format!("{p:.2e}")
    } else {
        format!("{p:.4}")
    }
}

/// Format a duration for display.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 1.0 {
        format!("{:.0}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{secs:.2}s")
    } else {
        let mins = (secs / 60.0).floor() as u64;
        let remaining = secs - (mins as f64 * 60.0);
        format!("{mins}m{remaining:.1}s")
    }
}

/// One line of the verdict summary: `observed 2.50% / allowed 0.0100%`.
#[must_use]
pub fn format_fractions(verdict: &ComplianceVerdict) -> String {
    format!(
        "observed {} / allowed {}",
        format_pct(verdict.observed_time_fraction_pct),
        format_pct(verdict.max_time_fraction_pct)
    )
}

/// Exceedance probability of both scenarios at one SNR-loss level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CcdfRow {
    pub snr_loss_db: f64,
    pub scenario_a: f64,
    pub scenario_b: f64,
}

/// CCDF of A and B sampled at the reference thresholds.
#[must_use]
pub fn ccdf_rows(result: &ComparisonResult) -> Vec<CcdfRow> {
    CCDF_REFERENCE_THRESHOLDS_DB
        .iter()
        .map(|&x| CcdfRow {
            snr_loss_db: x,
            scenario_a: result.aggregate(ScenarioLabel::A).ccdf().exceedance_at(x),
            scenario_b: result.aggregate(ScenarioLabel::B).ccdf().exceedance_at(x),
        })
        .collect()
}

/// Per-scenario digest of a time-domain trace.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TraceSummary {
    pub samples: usize,
    pub peak_snr_loss_db: f64,
    pub percent_above_threshold: f64,
}

#[must_use]
pub fn trace_summary(result: &ComparisonResult, scenario: ScenarioLabel) -> TraceSummary {
    let trace = result.dynamic(scenario);
    TraceSummary {
        samples: trace.len(),
        peak_snr_loss_db: trace.peak_snr_loss_db(),
        percent_above_threshold: trace.percent_above(result.time_domain_threshold_db()),
    }
}

/// Machine-readable report: the full result plus what the views show.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub time_domain_verdict: &'a ComplianceVerdict,
    pub time_domain_threshold_db: f64,
    pub ccdf_verdict: &'a ComplianceVerdict,
    pub ccdf_reference: Vec<CcdfRow>,
    pub result: &'a ComparisonResult,
}

impl<'a> JsonReport<'a> {
    #[must_use]
    pub fn new(result: &'a ComparisonResult) -> Self {
        Self {
            time_domain_verdict: result.time_domain_verdict(),
            time_domain_threshold_db: result.time_domain_threshold_db(),
            ccdf_verdict: result.ccdf_verdict(),
            ccdf_reference: ccdf_rows(result),
            result,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Write the JSON report to a file.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be created or written.
pub fn write_json_report(path: &Path, result: &ComparisonResult) -> io::Result<()> {
    let json = JsonReport::new(result).to_json().map_err(io::Error::other)?;
    let mut file = std::fs::File::create(path)?;
    writeln!(file, "{json}")?;
    Ok(())
}
