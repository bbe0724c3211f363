//! HTTP client for the hosted explanation model.
//!
//! Sends the validated coded payload to a generateContent endpoint and
//! maps transport and status failures onto [`ProviderError`] variants
//! so the service layer can record what actually went wrong.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::ExplainConfig;

use super::types::{
    ExplanationPayload, ExplanationProvider, ExplanationSource, ProviderError, ScenarioExplanation,
};

pub struct VertexExplanationClient {
    endpoint: String,
    api_key: String,
    model: String,
    client: reqwest::blocking::Client,
}

impl VertexExplanationClient {
    pub fn new(config: &ExplainConfig) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            client,
        }
    }

    pub fn with_timeout(config: &ExplainConfig, timeout: Duration) -> Self {
        let mut config = config.clone();
        config.timeout = timeout;
        Self::new(&config)
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    scenario: &'a ExplanationPayload,
}

#[derive(Deserialize)]
struct GenerateResponse {
    short_explanation: String,
    #[serde(default)]
    detailed_points: Vec<String>,
    #[serde(default)]
    confidence_label: String,
}

impl ExplanationProvider for VertexExplanationClient {
    fn generate_content(
        &self,
        payload: &ExplanationPayload,
    ) -> Result<ScenarioExplanation, ProviderError> {
        let url = format!(
            "{}/v1/models/{}:generateContent",
            self.endpoint, self.model
        );
        let request = GenerateRequest {
            model: &self.model,
            scenario: payload,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout
                } else if e.is_connect() {
                    ProviderError::Other(format!("Cannot reach explanation endpoint: {e}"))
                } else {
                    ProviderError::Other(e.to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimited);
        }
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(ProviderError::Auth);
        }
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ProviderError::Other(format!(
                "Endpoint returned {}: {}",
                status.as_u16(),
                body
            )));
        }

        let parsed: GenerateResponse = response
            .json()
            .map_err(|e| ProviderError::Other(format!("Response did not parse: {e}")))?;

        Ok(ScenarioExplanation {
            short_explanation: parsed.short_explanation,
            detailed_points: parsed.detailed_points,
            confidence_label: parsed.confidence_label,
            source: ExplanationSource::VertexAi,
        })
    }
}

/// Scriptable test double for the provider seam.
pub struct MockExplanationProvider {
    result: Result<ScenarioExplanation, ProviderError>,
}

impl MockExplanationProvider {
    /// Provider that answers every request with the given summary.
    pub fn succeeding(short_explanation: &str) -> Self {
        Self {
            result: Ok(ScenarioExplanation {
                short_explanation: short_explanation.to_string(),
                detailed_points: vec!["Scripted supporting point".to_string()],
                confidence_label: "High confidence".to_string(),
                source: ExplanationSource::VertexAi,
            }),
        }
    }

    /// Provider that fails every request the given way.
    pub fn failing(error: ProviderError) -> Self {
        Self { result: Err(error) }
    }
}

impl ExplanationProvider for MockExplanationProvider {
    fn generate_content(
        &self,
        _payload: &ExplanationPayload,
    ) -> Result<ScenarioExplanation, ProviderError> {
        self.result.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axes::ScenarioAxis;
    use crate::profile::{ConfidenceLevel, EpisodeType, NeedsCluster};
    use std::collections::BTreeMap;

    fn payload_fixture() -> ExplanationPayload {
        ExplanationPayload {
            patient_ref: "a3f9c2d4e5b60718".to_string(),
            scenario_ref: "0718a3f9c2d4e5b6".to_string(),
            axis: ScenarioAxis::SafetyStability,
            axis_score: 55,
            axis_reasons: vec!["Falls risk rated 3 of 5".to_string()],
            confidence: ConfidenceLevel::Medium,
            completeness_pct: 80.0,
            needs_cluster: NeedsCluster::PhysicalAssist,
            episode_type: EpisodeType::LongStayChronic,
            service_categories: Vec::new(),
            weekly_visits: 9.0,
            weekly_hours: 7.5,
            cap_utilization_pct: 52.0,
            algorithm_scores: BTreeMap::new(),
        }
    }

    #[test]
    fn constructor_trims_trailing_slash() {
        let config = ExplainConfig {
            provider_enabled: true,
            endpoint: "https://generation.internal/".to_string(),
            api_key: "key".to_string(),
            model: "gemini-1.5-flash".to_string(),
            timeout: Duration::from_secs(5),
        };

        let client = VertexExplanationClient::new(&config);

        assert_eq!(client.endpoint, "https://generation.internal");
        assert_eq!(client.model, "gemini-1.5-flash");
    }

    #[test]
    fn with_timeout_overrides_the_configured_bound() {
        let config = ExplainConfig::default();
        let client = VertexExplanationClient::with_timeout(&config, Duration::from_secs(1));

        assert_eq!(client.model, config.model);
    }

    #[test]
    fn mock_returns_the_scripted_explanation() {
        let mock = MockExplanationProvider::succeeding("Scripted summary");

        let explanation = mock.generate_content(&payload_fixture()).unwrap();

        assert_eq!(explanation.short_explanation, "Scripted summary");
        assert_eq!(explanation.source, ExplanationSource::VertexAi);
    }

    #[test]
    fn mock_returns_the_scripted_failure() {
        let mock = MockExplanationProvider::failing(ProviderError::Timeout);

        let result = mock.generate_content(&payload_fixture());

        assert_eq!(result, Err(ProviderError::Timeout));
    }
}
