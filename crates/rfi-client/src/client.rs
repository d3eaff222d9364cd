//! HTTP implementation of `SimulationBackend`.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use rfi_core::constants::{AGGREGATE_PATH, DYNAMIC_PATH};
use rfi_core::{
    AggregateResult, AnalysisKind, ComplianceVerdict, DynamicResult, ScenarioConfig,
    SimulationBackend, SimulationError,
};

use crate::policy::RequestPolicy;
use crate::wire::{AggregateRequest, AggregateResponse, DynamicRequest, DynamicResponse};

/// Longest backend error body kept in a `SimulationError::Backend`.
const MAX_ERROR_BODY: usize = 512;

/// Client for the simulation backend's JSON endpoints.
///
/// Holds no per-request state: every call is a fresh POST.
#[derive(Debug, Clone)]
pub struct HttpSimulationClient {
    http: reqwest::Client,
    base_url: String,
    policy: RequestPolicy,
}

impl HttpSimulationClient {
    /// Create a client with the default policy (one attempt, no timeout).
    pub fn new(base_url: impl Into<String>) -> Result<Self, SimulationError> {
        Self::with_policy(base_url, RequestPolicy::default())
    }

    /// Create a client with an explicit timeout/retry policy.
    pub fn with_policy(
        base_url: impl Into<String>,
        policy: RequestPolicy,
    ) -> Result<Self, SimulationError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| SimulationError::Transport(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            policy,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn policy(&self) -> &RequestPolicy {
        &self.policy
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// POST `body` to `path`, retrying retryable failures per the policy.
    async fn post_json<Req, Resp>(
        &self,
        kind: AnalysisKind,
        path: &str,
        body: &Req,
    ) -> Result<Resp, SimulationError>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let url = self.endpoint(path);
        let attempts = self.policy.attempts();
        let mut retry = 0;
        loop {
            debug!(%kind, %url, attempt = retry + 1, attempts, "sending simulation request");
            match self.attempt(&url, body).await {
                Ok(response) => return Ok(response),
                Err(err) if err.is_retryable() && retry + 1 < attempts => {
                    let delay = self.policy.backoff(retry);
                    warn!(%kind, error = %err, ?delay, "simulation request failed, retrying");
                    tokio::time::sleep(delay).await;
                    retry += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn attempt<Req, Resp>(&self, url: &str, body: &Req) -> Result<Resp, SimulationError>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let request = async {
            let response = self
                .http
                .post(url)
                .json(body)
                .send()
                .await
                .map_err(transport_error)?;

            let status = response.status();
            if !status.is_success() {
                let mut text = match response.text().await {
                    Ok(body) => body,
                    Err(e) => format!("<unreadable body: {e}>"),
                };
                truncate_utf8(&mut text, MAX_ERROR_BODY);
                return Err(SimulationError::Backend {
                    status: status.as_u16(),
                    body: text,
                });
            }

            let bytes = response.bytes().await.map_err(transport_error)?;
            serde_json::from_slice::<Resp>(&bytes)
                .map_err(|e| SimulationError::MalformedResponse(e.to_string()))
        };

        match self.policy.timeout {
            Some(limit) => tokio::time::timeout(limit, request)
                .await
                .map_err(|_| SimulationError::Timeout(limit))?,
            None => request.await,
        }
    }
}

impl SimulationBackend for HttpSimulationClient {
    async fn run_dynamic(&self, scenario: &ScenarioConfig) -> Result<DynamicResult, SimulationError> {
        let request = DynamicRequest::from(scenario);
        let response: DynamicResponse = self
            .post_json(AnalysisKind::Dynamic, DYNAMIC_PATH, &request)
            .await?;
        let result = response
            .into_result()
            .map_err(SimulationError::MalformedResponse)?;
        check_verdict(AnalysisKind::Dynamic, result.compliance_verdict());
        Ok(result)
    }

    async fn run_aggregate(
        &self,
        scenario: &ScenarioConfig,
    ) -> Result<AggregateResult, SimulationError> {
        let request = AggregateRequest::from(scenario);
        let response: AggregateResponse = self
            .post_json(AnalysisKind::Aggregate, AGGREGATE_PATH, &request)
            .await?;
        let result = response
            .into_result()
            .map_err(SimulationError::MalformedResponse)?;
        check_verdict(AnalysisKind::Aggregate, result.compliance_verdict());
        Ok(result)
    }
}

fn transport_error(err: reqwest::Error) -> SimulationError {
    SimulationError::Transport(err.to_string())
}

/// The verdict is used as reported; a contradiction is only logged.
fn check_verdict(kind: AnalysisKind, verdict: &ComplianceVerdict) {
    if !verdict.is_consistent() {
        warn!(
            %kind,
            standard = %verdict.standard_name,
            status = %verdict.status,
            observed = verdict.observed_time_fraction_pct,
            max = verdict.max_time_fraction_pct,
            "backend verdict status disagrees with its time fractions"
        );
    }
}

fn truncate_utf8(text: &mut String, max: usize) {
    if text.len() <= max {
        return;
    }
    let mut cut = max;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    text.truncate(cut);
}
