//! UI helpers for CLI display.

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use rfi_core::ComplianceStatus;

/// Check if color output is disabled via `NO_COLOR` env var.
#[must_use]
pub fn is_color_disabled() -> bool {
    std::env::var_os("NO_COLOR").is_some()
}

/// Print an error message.
pub fn print_error(text: &str) {
    if is_color_disabled() {
        eprintln!("[ERROR] {text}");
    } else {
        eprintln!("{} {text}", style("[ERROR]").red().bold());
    }
}

/// Binary compliance badge: `[PASS]` or `[FAIL]`.
#[must_use]
pub fn badge(status: ComplianceStatus, color: bool) -> String {
    let label = match status {
        ComplianceStatus::Compliant => "[PASS]",
        ComplianceStatus::NonCompliant => "[FAIL]",
    };
    if !color {
        return label.to_string();
    }
    match status {
        ComplianceStatus::Compliant => style(label).green().bold().to_string(),
        ComplianceStatus::NonCompliant => style(label).red().bold().to_string(),
    }
}

/// Spinner shown on stderr while a comparison is in flight.
///
/// Hidden when stderr is not a terminal or when `hidden` is set.
pub struct RunSpinner {
    bar: ProgressBar,
}

impl RunSpinner {
    #[must_use]
    pub fn start(message: &str, hidden: bool) -> Self {
        let bar = if hidden {
            ProgressBar::hidden()
        } else {
            ProgressBar::new_spinner()
        };
        if let Ok(spinner_style) = ProgressStyle::with_template("{spinner:.cyan} {msg} [{elapsed}]") {
            bar.set_style(spinner_style);
        }
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    pub fn set_message(&self, message: &str) {
        self.bar.set_message(message.to_string());
    }

    /// Elapsed time since the spinner started.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.bar.elapsed()
    }

    /// Remove the spinner line.
    pub fn finish(self) {
        self.bar.finish_and_clear();
    }
}
