//! HTTP layer for the CardioPredict prediction service.

pub mod types;

pub use types::{PredictionRequest, PredictionResponse, RiskAssessment, RiskCategory};

use crate::errors::{PredictError, Result};
use crate::profile::HealthProfile;
use reqwest::Client;
use std::time::Duration;

/// Default public endpoint of the prediction service
pub const DEFAULT_ENDPOINT: &str =
    "https://heart-disease-prediction-using-machine-d7ti.onrender.com/predict";

/// Default request timeout in seconds.
///
/// The service runs on a free tier that cold-starts, so this is generous.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// HTTP client for the prediction endpoint.
///
/// One POST per assessment, no retries. Failures come back as distinct
/// [`PredictError`] variants rather than a collapsed "no result".
pub struct PredictionClient {
    client: Client,
    endpoint: String,
    timeout_secs: u64,
}

impl PredictionClient {
    /// Create a client against `endpoint` with the given request timeout
    pub fn new(endpoint: impl Into<String>, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| PredictError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(PredictionClient {
            client,
            endpoint: endpoint.into(),
            timeout_secs,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Submit one fully populated profile and await the classification.
    ///
    /// Exactly one request; the caller owns resubmission policy.
    pub async fn predict(&self, profile: &HealthProfile) -> Result<RiskAssessment> {
        let request = PredictionRequest::from(profile);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| PredictError::from_request_error(e, self.timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PredictError::Status {
                code: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| PredictError::from_request_error(e, self.timeout_secs))?;

        parse_prediction(&body)
    }

    /// Probe whether the service answers at all.
    ///
    /// Short timeout on purpose; used by the `check` subcommand.
    pub async fn is_available(&self) -> bool {
        self.client
            .post(&self.endpoint)
            .timeout(Duration::from_secs(5))
            .json(&serde_json::json!({}))
            .send()
            .await
            .is_ok()
    }
}

impl Default for PredictionClient {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS)
            .expect("default client configuration must build")
    }
}

/// Map a response body to an assessment, rejecting anything malformed
fn parse_prediction(body: &str) -> Result<RiskAssessment> {
    let response: PredictionResponse = serde_json::from_str(body)
        .map_err(|e| PredictError::MalformedResponse(e.to_string()))?;

    if !(0.0..=1.0).contains(&response.probability) {
        return Err(PredictError::MalformedResponse(format!(
            "probability {} outside [0, 1]",
            response.probability
        )));
    }

    Ok(RiskAssessment::from(response))
}
