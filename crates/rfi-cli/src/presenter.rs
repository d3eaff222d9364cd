//! Terminal presenter for comparison results.

use std::fmt::Write as _;

use rfi_core::{AnalysisKind, ComplianceVerdict, ScenarioLabel};
use rfi_orchestration::{ComparisonPresenter, ComparisonResult};

use crate::output::{
    ccdf_rows, format_db, format_fractions, format_probability, trace_summary,
};
use crate::ui::{badge, print_error};

/// Prints the time-domain and CCDF sections of a comparison.
pub struct CliComparisonPresenter {
    verbose: bool,
    quiet: bool,
    color: bool,
}

impl CliComparisonPresenter {
    /// Plain-text presenter; see `with_color`.
    #[must_use]
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            color: false,
        }
    }

    /// Style the compliance badges.
    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    fn verdict_line(&self, verdict: &ComplianceVerdict) -> String {
        format!(
            "{} {} ({})",
            badge(verdict.status, self.color),
            verdict.standard_name,
            format_fractions(verdict)
        )
    }

    /// Render the report as text.
    #[must_use]
    pub fn render(&self, result: &ComparisonResult) -> String {
        let mut out = String::new();
        if self.quiet {
            let _ = writeln!(out, "time-domain {}", badge(result.time_domain_verdict().status, false));
            let _ = writeln!(out, "ccdf {}", badge(result.ccdf_verdict().status, false));
            return out;
        }

        let threshold = result.time_domain_threshold_db();
        let _ = writeln!(out, "Time domain (threshold {})", format_db(threshold));
        let _ = writeln!(out, "  {}", self.verdict_line(result.time_domain_verdict()));
        for label in ScenarioLabel::BOTH {
            let summary = trace_summary(result, label);
            let _ = writeln!(
                out,
                "  Scenario {label}: {} samples, peak {}, {:.2}% above threshold",
                summary.samples,
                format_db(summary.peak_snr_loss_db),
                summary.percent_above_threshold
            );
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "CCDF");
        let _ = writeln!(out, "  {}", self.verdict_line(result.ccdf_verdict()));
        let _ = writeln!(out, "  {:>10} {:>12} {:>12}", "loss", "P(A)", "P(B)");
        for row in ccdf_rows(result) {
            let _ = writeln!(
                out,
                "  {:>10} {:>12} {:>12}",
                format!("> {:.0} dB", row.snr_loss_db),
                format_probability(row.scenario_a),
                format_probability(row.scenario_b)
            );
        }

        if self.verbose {
            let _ = writeln!(out);
            let _ = writeln!(out, "All verdicts");
            for kind in [AnalysisKind::Dynamic, AnalysisKind::Aggregate] {
                for label in ScenarioLabel::BOTH {
                    let verdict = result.verdict(kind, label);
                    let _ = writeln!(
                        out,
                        "  {kind:<9} {label}: {} threshold {}",
                        self.verdict_line(verdict),
                        format_db(verdict.threshold_db)
                    );
                }
            }
        }
        out
    }
}

impl ComparisonPresenter for CliComparisonPresenter {
    fn present_comparison(&self, result: &ComparisonResult) {
        print!("{}", self.render(result));
    }

    fn present_error(&self, error: &str) {
        print_error(error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::tests::sample_result;

    fn plain(verbose: bool, quiet: bool) -> CliComparisonPresenter {
        CliComparisonPresenter::new(verbose, quiet)
    }

    #[test]
    fn report_shows_selected_badges() {
        let text = plain(false, false).render(&sample_result());
        let (time, ccdf) = text.split_once("CCDF").unwrap();

        assert!(time.contains("threshold 1.00 dB"));
        assert!(time.contains("[FAIL] ITU-R SA.1157 (observed 2.50% / allowed 0.0100%)"));
        assert!(ccdf.contains("[PASS]"));
        assert!(!ccdf.contains("[FAIL]"));
    }

    #[test]
    fn report_summarizes_both_traces() {
        let text = plain(false, false).render(&sample_result());
        assert!(text.contains("Scenario A: 4 samples, peak 2.50 dB, 50.00% above threshold"));
        assert!(text.contains("Scenario B: 4 samples, peak 0.40 dB, 0.00% above threshold"));
    }

    #[test]
    fn report_tabulates_reference_levels() {
        let text = plain(false, false).render(&sample_result());
        assert!(text.contains("> 1 dB"));
        assert!(text.contains("> 3 dB"));
        assert!(text.contains("> 6 dB"));
        assert!(text.contains("0.7500"));
    }

    #[test]
    fn quiet_prints_badges_only() {
        let text = plain(false, true).render(&sample_result());
        assert_eq!(text, "time-domain [FAIL]\nccdf [PASS]\n");
    }

    #[test]
    fn verbose_lists_all_four_verdicts() {
        let text = plain(true, false).render(&sample_result());
        assert!(text.contains("All verdicts"));
        assert_eq!(text.matches("ITU-R SA.1157").count(), 6);
    }

    #[test]
    fn colored_report_keeps_badge_labels() {
        let text = plain(false, false).with_color(true).render(&sample_result());
        assert!(text.contains("[FAIL]"));
        assert!(text.contains("[PASS]"));
        assert!(text.contains("ITU-R SA.1157 (observed 2.50% / allowed 0.0100%)"));
    }

    #[test]
    fn present_error_does_not_panic() {
        plain(false, false).present_error("dynamic simulation of scenario A failed");
    }
}
