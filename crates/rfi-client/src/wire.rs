//! JSON wire format of the simulation backend.
//!
//! Field names follow the backend exactly, including its mixed-case keys.
//! Requests are built from a `ScenarioConfig`; responses are converted into
//! the validated result types of `rfi-core`.

use serde::{Deserialize, Serialize};

use rfi_core::constants::{
    AGGREGATE_DUTY_CYCLE, AGGREGATE_SIGMA_DB, AGGREGATE_TIME_SAMPLES, SERVICE_TYPE,
};
use rfi_core::{
    AggregateResult, CcdfCurve, ComplianceVerdict, DynamicResult, LinkParams, ScenarioConfig,
};

/// Link parameters as the backend names them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandParams {
    pub f_ghz: f64,
    pub d_km: f64,
    #[serde(rename = "EIRP_dbw")]
    pub eirp_dbw: f64,
    #[serde(rename = "G_rx_db")]
    pub g_rx_db: f64,
    pub theta_3db: f64,
}

impl From<&LinkParams> for BandParams {
    fn from(link: &LinkParams) -> Self {
        Self {
            f_ghz: link.carrier_frequency_ghz,
            d_km: link.distance_km,
            eirp_dbw: link.eirp_dbw,
            g_rx_db: link.rx_gain_db,
            theta_3db: link.beamwidth_deg,
        }
    }
}

/// Kinematic descriptor of the single moving interferer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingInterferer {
    #[serde(rename = "EIRP_int_dbw")]
    pub eirp_int_dbw: f64,
    pub d0_km: f64,
    pub v_km_s: f64,
    pub theta0_deg: f64,
    pub omega_deg_s: f64,
}

/// Body of `POST /simulate/dynamic`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DynamicRequest {
    pub band_params: BandParams,
    pub interferer: MovingInterferer,
    pub service_type: String,
    pub duration_s: u32,
    pub time_step_s: u32,
}

impl From<&ScenarioConfig> for DynamicRequest {
    fn from(scenario: &ScenarioConfig) -> Self {
        let i = &scenario.interferer;
        Self {
            band_params: BandParams::from(&scenario.link),
            interferer: MovingInterferer {
                eirp_int_dbw: i.eirp_dbw,
                d0_km: i.range_km,
                v_km_s: i.velocity_km_s,
                theta0_deg: i.off_axis_angle_deg,
                omega_deg_s: i.angular_rate_deg_s,
            },
            service_type: SERVICE_TYPE.to_string(),
            duration_s: scenario.duration_s,
            time_step_s: scenario.time_step_s,
        }
    }
}

/// Statistical descriptor of one member of an interferer population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticalInterferer {
    #[serde(rename = "EIRP_int_dbw")]
    pub eirp_int_dbw: f64,
    pub d_km: f64,
    pub theta_off_axis_deg: f64,
    pub sigma_db: f64,
    pub duty_cycle: f64,
}

/// Body of `POST /simulate/aggregate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRequest {
    pub band_params: BandParams,
    pub interferers: Vec<StatisticalInterferer>,
    pub service_type: String,
    pub time_samples: u32,
}

impl From<&ScenarioConfig> for AggregateRequest {
    /// The population is always the scenario's single interferer with
    /// fixed spread and duty cycle.
    fn from(scenario: &ScenarioConfig) -> Self {
        let i = &scenario.interferer;
        Self {
            band_params: BandParams::from(&scenario.link),
            interferers: vec![StatisticalInterferer {
                eirp_int_dbw: i.eirp_dbw,
                d_km: i.range_km,
                theta_off_axis_deg: i.off_axis_angle_deg,
                sigma_db: AGGREGATE_SIGMA_DB,
                duty_cycle: AGGREGATE_DUTY_CYCLE,
            }],
            service_type: SERVICE_TYPE.to_string(),
            time_samples: AGGREGATE_TIME_SAMPLES,
        }
    }
}

/// Success body of `POST /simulate/dynamic`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DynamicResponse {
    pub time_s: Vec<f64>,
    pub snr_loss_db: Vec<f64>,
    pub overall_compliance: ComplianceVerdict,
}

impl DynamicResponse {
    /// Validate and convert into a `DynamicResult`.
    pub fn into_result(self) -> Result<DynamicResult, String> {
        DynamicResult::new(self.time_s, self.snr_loss_db, self.overall_compliance)
    }
}

/// CCDF block of the aggregate response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CcdfPayload {
    pub snr_loss_db: Vec<f64>,
    pub ccdf: Vec<f64>,
}

/// Success body of `POST /simulate/aggregate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateResponse {
    pub ccdf: CcdfPayload,
    pub overall_compliance: ComplianceVerdict,
}

impl AggregateResponse {
    /// Validate and convert into an `AggregateResult`.
    pub fn into_result(self) -> Result<AggregateResult, String> {
        let curve = CcdfCurve::new(self.ccdf.snr_loss_db, self.ccdf.ccdf)?;
        AggregateResult::new(curve, self.overall_compliance)
    }
}
