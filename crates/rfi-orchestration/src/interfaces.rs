//! Orchestration interfaces: the comparison result and its presenter.

use serde::Serialize;

use rfi_core::{
    AggregateResult, AnalysisKind, ComplianceVerdict, DynamicResult, ScenarioLabel,
};

/// Outcome of one successful comparison run. All four analyses are present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    pub dynamic_a: DynamicResult,
    pub dynamic_b: DynamicResult,
    pub aggregate_a: AggregateResult,
    pub aggregate_b: AggregateResult,
}

impl ComparisonResult {
    #[must_use]
    pub fn dynamic(&self, scenario: ScenarioLabel) -> &DynamicResult {
        match scenario {
            ScenarioLabel::A => &self.dynamic_a,
            ScenarioLabel::B => &self.dynamic_b,
        }
    }

    #[must_use]
    pub fn aggregate(&self, scenario: ScenarioLabel) -> &AggregateResult {
        match scenario {
            ScenarioLabel::A => &self.aggregate_a,
            ScenarioLabel::B => &self.aggregate_b,
        }
    }

    /// Verdict of any of the four analyses.
    #[must_use]
    pub fn verdict(&self, kind: AnalysisKind, scenario: ScenarioLabel) -> &ComplianceVerdict {
        match kind {
            AnalysisKind::Dynamic => self.dynamic(scenario).compliance_verdict(),
            AnalysisKind::Aggregate => self.aggregate(scenario).compliance_verdict(),
        }
    }

    /// Verdict shown with the time-domain comparison: scenario A's dynamic run.
    #[must_use]
    pub fn time_domain_verdict(&self) -> &ComplianceVerdict {
        self.dynamic_a.compliance_verdict()
    }

    /// Threshold line of the time-domain comparison, taken from the same
    /// verdict as `time_domain_verdict`.
    #[must_use]
    pub fn time_domain_threshold_db(&self) -> f64 {
        self.time_domain_verdict().threshold_db
    }

    /// Verdict shown with the CCDF comparison: scenario B's aggregate run.
    #[must_use]
    pub fn ccdf_verdict(&self) -> &ComplianceVerdict {
        self.aggregate_b.compliance_verdict()
    }
}

/// Trait for presenting comparison outcomes to the user.
pub trait ComparisonPresenter: Send + Sync {
    /// Present a completed comparison.
    fn present_comparison(&self, result: &ComparisonResult);

    /// Present a failed comparison. Only the message is available.
    fn present_error(&self, error: &str);
}
