//! Receiver link presets for the common space-service bands.

use std::fmt;
use std::str::FromStr;

use crate::constants::GEO_DISTANCE_KM;
use crate::scenario::{ConfigError, LinkParams};

/// Frequency band presets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Band {
    S,
    #[default]
    X,
    Ku,
    K,
    Ka,
}

impl Band {
    /// All presets in ascending frequency order.
    pub const ALL: [Band; 5] = [Band::S, Band::X, Band::Ku, Band::K, Band::Ka];

    /// Display name, e.g. `"X-band"`.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::S => "S-band",
            Self::X => "X-band",
            Self::Ku => "Ku-band",
            Self::K => "K-band",
            Self::Ka => "Ka-band",
        }
    }

    /// Link parameters of the preset.
    #[must_use]
    pub fn link_params(self) -> LinkParams {
        let (f_ghz, eirp, gain, beamwidth) = match self {
            Self::S => (2.25, 26.0, 30.0, 2.0),
            Self::X => (8.0, 30.0, 35.0, 1.5),
            Self::Ku => (14.25, 45.0, 40.0, 1.0),
            Self::K => (20.0, 50.0, 45.0, 0.8),
            Self::Ka => (30.0, 55.0, 50.0, 0.6),
        };
        LinkParams {
            carrier_frequency_ghz: f_ghz,
            distance_km: GEO_DISTANCE_KM,
            eirp_dbw: eirp,
            rx_gain_db: gain,
            beamwidth_deg: beamwidth,
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Band {
    type Err = ConfigError;

    /// Accepts `"x"`, `"X"`, `"x-band"`, `"X-band"` and so on.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let key = lower.strip_suffix("-band").unwrap_or(&lower);
        match key {
            "s" => Ok(Self::S),
            "x" => Ok(Self::X),
            "ku" => Ok(Self::Ku),
            "k" => Ok(Self::K),
            "ka" => Ok(Self::Ka),
            _ => Err(ConfigError::UnknownBand(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_short_and_long_names() {
        assert_eq!("x".parse::<Band>().unwrap(), Band::X);
        assert_eq!("Ka-band".parse::<Band>().unwrap(), Band::Ka);
        assert_eq!(" KU ".parse::<Band>().unwrap(), Band::Ku);
    }

    #[test]
    fn parse_unknown_band() {
        assert!(matches!(
            "L-band".parse::<Band>(),
            Err(ConfigError::UnknownBand(_))
        ));
    }

    #[test]
    fn display_roundtrips_through_parse() {
        for band in Band::ALL {
            assert_eq!(band.to_string().parse::<Band>().unwrap(), band);
        }
    }

    #[test]
    fn presets_ascend_in_frequency() {
        let freqs: Vec<f64> = Band::ALL
            .iter()
            .map(|b| b.link_params().carrier_frequency_ghz)
            .collect();
        assert!(freqs.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn x_band_is_deep_space_reference() {
        let link = Band::X.link_params();
        assert!((link.carrier_frequency_ghz - 8.0).abs() < f64::EPSILON);
        assert!((link.distance_km - GEO_DISTANCE_KM).abs() < f64::EPSILON);
    }
}
