//! Value types and the provider seam for scenario explanations.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::axes::ScenarioAxis;
use crate::enums::str_enum;
use crate::profile::{ConfidenceLevel, EpisodeType, NeedsCluster};
use crate::scenario::ServiceCategory;

str_enum!(
    /// Where an explanation text came from. Recorded on every
    /// explanation and in the audit trail.
    ExplanationSource {
        VertexAi => "vertex_ai",
        RulesBased => "rules_based",
    }
);

/// Plain-language rationale attached to one bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioExplanation {
    /// One-paragraph summary a coordinator can read aloud.
    pub short_explanation: String,
    pub detailed_points: Vec<String>,
    pub confidence_label: String,
    pub source: ExplanationSource,
}

/// Categorized failure from the external provider. Each variant maps
/// to a distinct audit status so outages stay diagnosable.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    #[error("Provider request timed out")]
    Timeout,

    #[error("Provider rate limit reached")]
    RateLimited,

    #[error("Provider authentication failed")]
    Auth,

    #[error("Provider request failed: {0}")]
    Other(String),
}

/// Everything a provider is allowed to see about one scenario: coded
/// enums, scores and derived aggregates. Assembly and the outbound
/// scan live in [`prompt`](super::prompt).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplanationPayload {
    pub patient_ref: String,
    pub scenario_ref: String,
    pub axis: ScenarioAxis,
    pub axis_score: i32,
    pub axis_reasons: Vec<String>,
    pub confidence: ConfidenceLevel,
    pub completeness_pct: f64,
    pub needs_cluster: NeedsCluster,
    pub episode_type: EpisodeType,
    pub service_categories: Vec<ServiceCategory>,
    pub weekly_visits: f64,
    pub weekly_hours: f64,
    pub cap_utilization_pct: f64,
    pub algorithm_scores: BTreeMap<String, i32>,
}

/// Generation backend. Implementations must be callable from multiple
/// request threads at once.
pub trait ExplanationProvider: Send + Sync {
    fn generate_content(
        &self,
        payload: &ExplanationPayload,
    ) -> Result<ScenarioExplanation, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_tags_are_stable() {
        assert_eq!(ExplanationSource::VertexAi.as_str(), "vertex_ai");
        assert_eq!(ExplanationSource::RulesBased.as_str(), "rules_based");
        assert_eq!(
            "rules_based".parse::<ExplanationSource>().unwrap(),
            ExplanationSource::RulesBased
        );
    }

    #[test]
    fn explanation_round_trips_through_json() {
        let explanation = ScenarioExplanation {
            short_explanation: "Plan fits documented safety needs.".to_string(),
            detailed_points: vec!["Falls risk rated 3 of 5".to_string()],
            confidence_label: "High confidence".to_string(),
            source: ExplanationSource::RulesBased,
        };

        let json = serde_json::to_string(&explanation).unwrap();
        let back: ScenarioExplanation = serde_json::from_str(&json).unwrap();

        assert_eq!(back, explanation);
        assert!(json.contains("\"rules_based\""));
    }
}
