//! Scenario configuration: the physical parameters of one RFI scenario.
//!
//! A `ScenarioConfig` is plain data. The orchestrator snapshots it at
//! trigger time, so values can be edited freely while a run is in flight.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::band::Band;

/// Error type for scenario configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The scenario file could not be read.
    #[error("cannot read scenario file {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The scenario file is not a valid scenario document.
    #[error("cannot parse scenario file {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A field violates the scenario invariants.
    #[error("invalid scenario: {0}")]
    Invalid(String),

    /// The requested band preset does not exist.
    #[error("unknown band preset: {0}")]
    UnknownBand(String),
}

/// Which of the two compared scenarios a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScenarioLabel {
    A,
    B,
}

impl ScenarioLabel {
    /// Both labels, in display order.
    pub const BOTH: [ScenarioLabel; 2] = [ScenarioLabel::A, ScenarioLabel::B];
}

impl fmt::Display for ScenarioLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => f.write_str("A"),
            Self::B => f.write_str("B"),
        }
    }
}

/// Victim receiver link geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkParams {
    /// Carrier frequency in GHz.
    pub carrier_frequency_ghz: f64,
    /// Link distance in km.
    pub distance_km: f64,
    /// Wanted-signal EIRP in dBW.
    pub eirp_dbw: f64,
    /// Receive antenna peak gain in dB.
    pub rx_gain_db: f64,
    /// Receive antenna 3 dB beamwidth in degrees.
    pub beamwidth_deg: f64,
}

impl Default for LinkParams {
    fn default() -> Self {
        Band::default().link_params()
    }
}

/// Interferer motion and emission parameters.
///
/// The dynamic run uses every field; the aggregate run only uses EIRP,
/// range, and off-axis angle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterfererParams {
    /// Interferer EIRP in dBW.
    pub eirp_dbw: f64,
    /// Initial range to the receiver in km.
    pub range_km: f64,
    /// Radial velocity in km/s.
    pub velocity_km_s: f64,
    /// Initial off-axis angle in degrees.
    pub off_axis_angle_deg: f64,
    /// Off-axis angular rate in degrees per second.
    pub angular_rate_deg_s: f64,
}

impl Default for InterfererParams {
    fn default() -> Self {
        Self {
            eirp_dbw: 20.0,
            range_km: 500.0,
            velocity_km_s: 0.2,
            off_axis_angle_deg: 1.0,
            angular_rate_deg_s: 0.05,
        }
    }
}

/// Complete description of one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub link: LinkParams,
    pub interferer: InterfererParams,
    /// Dynamic-run horizon in seconds.
    pub duration_s: u32,
    /// Dynamic-run sampling step in seconds.
    pub time_step_s: u32,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            link: LinkParams::default(),
            interferer: InterfererParams::default(),
            duration_s: 600,
            time_step_s: 1,
        }
    }
}

impl ScenarioConfig {
    /// Default scenario using the link of the given band preset.
    #[must_use]
    pub fn for_band(band: Band) -> Self {
        Self {
            link: band.link_params(),
            ..Self::default()
        }
    }

    /// Load a scenario from a JSON document. Missing fields take their
    /// default values.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let scenario: Self = serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded scenario file");
        Ok(scenario)
    }

    /// Number of samples a dynamic run over this horizon produces when the
    /// duration is a multiple of the step.
    #[must_use]
    pub fn expected_samples(&self) -> usize {
        if self.time_step_s == 0 {
            return 0;
        }
        (self.duration_s / self.time_step_s) as usize + 1
    }

    /// Check the scenario invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let link = &self.link;
        require_positive("link.carrier_frequency_ghz", link.carrier_frequency_ghz)?;
        require_positive("link.distance_km", link.distance_km)?;
        require_finite("link.eirp_dbw", link.eirp_dbw)?;
        require_finite("link.rx_gain_db", link.rx_gain_db)?;
        require_positive("link.beamwidth_deg", link.beamwidth_deg)?;

        let interferer = &self.interferer;
        require_finite("interferer.eirp_dbw", interferer.eirp_dbw)?;
        require_positive("interferer.range_km", interferer.range_km)?;
        require_finite("interferer.velocity_km_s", interferer.velocity_km_s)?;
        if interferer.velocity_km_s < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "interferer.velocity_km_s must be >= 0, got {}",
                interferer.velocity_km_s
            )));
        }
        require_finite("interferer.off_axis_angle_deg", interferer.off_axis_angle_deg)?;
        require_finite("interferer.angular_rate_deg_s", interferer.angular_rate_deg_s)?;

        if self.duration_s == 0 {
            return Err(ConfigError::Invalid("duration_s must be > 0".into()));
        }
        if self.time_step_s == 0 {
            return Err(ConfigError::Invalid("time_step_s must be > 0".into()));
        }
        if self.time_step_s > self.duration_s {
            return Err(ConfigError::Invalid(format!(
                "time_step_s ({}) must not exceed duration_s ({})",
                self.time_step_s, self.duration_s
            )));
        }
        Ok(())
    }
}

fn require_finite(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{field} must be finite, got {value}")))
    }
}

fn require_positive(field: &str, value: f64) -> Result<(), ConfigError> {
    require_finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{field} must be > 0, got {value}")))
    }
}
