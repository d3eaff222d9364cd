//! Application configuration from CLI flags and environment.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use rfi_client::RequestPolicy;
use rfi_core::constants::{DEFAULT_BACKEND_URL, DEFAULT_BACKOFF_MS};
use rfi_core::{Band, ConfigError, ScenarioConfig, ScenarioLabel};

/// Compare two RFI scenarios against ITU compliance limits.
///
/// Runs the dynamic and aggregate simulations for scenarios A and B
/// concurrently on the simulation backend and reports both verdicts.
#[derive(Parser, Debug)]
#[command(name = "rfi-compare", version, about)]
pub struct AppConfig {
    /// Base URL of the simulation backend.
    #[arg(long, env = "RFI_BACKEND_URL", default_value = DEFAULT_BACKEND_URL)]
    pub backend_url: String,

    /// Scenario A as a JSON file (defaults to the band preset).
    #[arg(long, value_name = "FILE")]
    pub scenario_a: Option<PathBuf>,

    /// Scenario B as a JSON file (defaults to the band preset).
    #[arg(long, value_name = "FILE")]
    pub scenario_b: Option<PathBuf>,

    /// Link preset: S, X, Ku, K or Ka. Replaces the link of both scenarios.
    #[arg(long)]
    pub band: Option<Band>,

    /// Interferer EIRP for scenario A, in dBW.
    #[arg(long, value_name = "DBW", allow_negative_numbers = true)]
    pub eirp_a: Option<f64>,

    /// Interferer EIRP for scenario B, in dBW.
    #[arg(long, value_name = "DBW", allow_negative_numbers = true)]
    pub eirp_b: Option<f64>,

    /// Per-request timeout (e.g., "500ms", "30s", "5m"). No timeout if unset.
    #[arg(long, env = "RFI_TIMEOUT", value_parser = parse_duration)]
    pub timeout: Option<Duration>,

    /// Retries per request on transport errors, timeouts and 5xx responses.
    #[arg(long, default_value = "0", env = "RFI_RETRIES")]
    pub retries: u32,

    /// Initial retry backoff, doubled on each retry.
    #[arg(long, value_parser = parse_duration)]
    pub backoff: Option<Duration>,

    /// Print the JSON report to stdout instead of the text report.
    #[arg(long)]
    pub json: bool,

    /// Also write the JSON report to this file.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Verbose output (all four verdicts).
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet mode (only the two badges).
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Generate shell completion.
    #[arg(long, value_enum)]
    pub completion: Option<clap_complete::Shell>,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Build one scenario: file or band preset, then the CLI overrides.
    pub fn scenario(&self, label: ScenarioLabel) -> Result<ScenarioConfig, ConfigError> {
        let (file, eirp) = match label {
            ScenarioLabel::A => (&self.scenario_a, self.eirp_a),
            ScenarioLabel::B => (&self.scenario_b, self.eirp_b),
        };

        let mut scenario = match file {
            Some(path) => ScenarioConfig::from_json_file(path)?,
            None => ScenarioConfig::for_band(self.band.unwrap_or_default()),
        };
        if let (Some(band), Some(_)) = (self.band, file) {
            scenario.link = band.link_params();
        }
        if let Some(eirp_dbw) = eirp {
            scenario.interferer.eirp_dbw = eirp_dbw;
        }
        scenario.validate()?;
        Ok(scenario)
    }

    /// Request policy from the hardening flags.
    #[must_use]
    pub fn request_policy(&self) -> RequestPolicy {
        RequestPolicy {
            timeout: self.timeout,
            max_retries: self.retries,
            initial_backoff: self
                .backoff
                .unwrap_or(Duration::from_millis(DEFAULT_BACKOFF_MS)),
        }
    }
}

/// Parse a duration string like "500ms", "30s", "5m", "1h". A bare number is seconds.
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    let invalid = || format!("invalid duration '{s}' (expected e.g. 500ms, 30s, 5m, 1h)");
    let (digits, scale): (&str, fn(u64) -> Duration) = if let Some(ms) = s.strip_suffix("ms") {
        (ms, Duration::from_millis)
    } else if let Some(secs) = s.strip_suffix('s') {
        (secs, Duration::from_secs)
    } else if let Some(mins) = s.strip_suffix('m') {
        (mins, |n| Duration::from_secs(n.saturating_mul(60)))
    } else if let Some(hours) = s.strip_suffix('h') {
        (hours, |n| Duration::from_secs(n.saturating_mul(3600)))
    } else {
        (s, Duration::from_secs)
    };
    let n: u64 = digits.trim().parse().map_err(|_| invalid())?;
    Ok(scale(n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn config(args: &[&str]) -> AppConfig {
        let mut argv = vec!["rfi-compare"];
        argv.extend_from_slice(args);
        AppConfig::try_parse_from(argv).unwrap()
    }

    #[test]
    fn parse_duration_formats() {
        assert_eq!(parse_duration("5m"), Ok(Duration::from_secs(300)));
        assert_eq!(parse_duration("1h"), Ok(Duration::from_secs(3600)));
        assert_eq!(parse_duration("30s"), Ok(Duration::from_secs(30)));
        assert_eq!(parse_duration("45"), Ok(Duration::from_secs(45)));
    }

    #[test]
    fn parse_duration_ms() {
        assert_eq!(parse_duration("1ms"), Ok(Duration::from_millis(1)));
        assert_eq!(parse_duration("500ms"), Ok(Duration::from_millis(500)));
    }

    #[test]
    fn parse_duration_rejects_garbage() {
        assert!(parse_duration("soon").is_err());
        assert!(parse_duration("-5s").is_err());
        assert!(parse_duration("").is_err());
    }

    #[test]
    fn defaults_match_reference_scenario() {
        let cfg = config(&[]);
        assert_eq!(cfg.backend_url, DEFAULT_BACKEND_URL);
        assert_eq!(cfg.request_policy(), RequestPolicy::default());

        let a = cfg.scenario(ScenarioLabel::A).unwrap();
        assert_eq!(a, ScenarioConfig::default());
        assert_eq!(a.expected_samples(), 601);
    }

    #[test]
    fn eirp_overrides_apply_per_scenario() {
        let cfg = config(&["--eirp-a", "25", "--eirp-b", "-3.5"]);
        let a = cfg.scenario(ScenarioLabel::A).unwrap();
        let b = cfg.scenario(ScenarioLabel::B).unwrap();
        assert!((a.interferer.eirp_dbw - 25.0).abs() < f64::EPSILON);
        assert!((b.interferer.eirp_dbw + 3.5).abs() < f64::EPSILON);
    }

    #[test]
    fn band_selects_link_preset() {
        let cfg = config(&["--band", "ka"]);
        let a = cfg.scenario(ScenarioLabel::A).unwrap();
        assert_eq!(a.link, Band::Ka.link_params());
    }

    #[test]
    fn scenario_file_with_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"duration_s": 60, "interferer": {{"eirp_dbw": 12.0}}}}"#).unwrap();
        let path = file.path().to_str().unwrap();

        let cfg = config(&["--scenario-b", path, "--band", "S"]);
        let b = cfg.scenario(ScenarioLabel::B).unwrap();
        assert_eq!(b.duration_s, 60);
        assert!((b.interferer.eirp_dbw - 12.0).abs() < f64::EPSILON);
        assert_eq!(b.link, Band::S.link_params());
    }

    #[test]
    fn invalid_scenario_file_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"time_step_s": 0}}"#).unwrap();
        let path = file.path().to_str().unwrap();

        let cfg = config(&["--scenario-a", path]);
        assert!(matches!(
            cfg.scenario(ScenarioLabel::A),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn hardening_flags_build_policy() {
        let cfg = config(&["--timeout", "2s", "--retries", "3", "--backoff", "100ms"]);
        let policy = cfg.request_policy();
        assert_eq!(policy.timeout, Some(Duration::from_secs(2)));
        assert_eq!(policy.max_retries, 3);
        assert_eq!(policy.initial_backoff, Duration::from_millis(100));
    }

    #[test]
    fn unknown_band_rejected() {
        let argv = ["rfi-compare", "--band", "L"];
        assert!(AppConfig::try_parse_from(argv).is_err());
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(AppConfig::try_parse_from(["rfi-compare", "-q", "-v"]).is_err());
    }
}
