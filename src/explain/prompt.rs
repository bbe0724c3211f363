//! Outbound payload assembly and the protected-data boundary.
//!
//! Everything sent to an explanation provider is built here from coded
//! enums, algorithm scores and derived aggregates, then re-serialized
//! and scanned before it may leave the process. A scan hit aborts the
//! request: it means assembly picked up a field it never should have.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::algorithms::AlgorithmScores;
use crate::audit::ReferenceHasher;
use crate::axes::AxisEvaluation;
use crate::profile::PatientNeedsProfile;
use crate::scenario::{ScenarioBundle, ServiceCategory};

use super::types::ExplanationPayload;
use super::ExplainError;

/// Field-name fragments that must never appear as a key anywhere in an
/// outbound payload. Matched case-insensitively against key names only;
/// clinical vocabulary in values ("nursing") is not a hit.
pub const FORBIDDEN_KEY_FRAGMENTS: &[&str] = &[
    "first_name",
    "last_name",
    "full_name",
    "email",
    "phone",
    "address",
    "postal_code",
    "street",
    "city_of_residence",
    "latitude",
    "longitude",
    "health_card",
    "health_card_number",
    "date_of_birth",
    "dob",
    "sin",
];

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("email pattern compiles")
});

static TEN_DIGIT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{10}\b").expect("ten-digit pattern compiles"));

/// Assembles provider payloads. Holds the hasher so raw identifiers
/// stop at this seam.
pub struct PromptBuilder {
    hasher: ReferenceHasher,
}

impl PromptBuilder {
    pub fn new(hasher: ReferenceHasher) -> Self {
        Self { hasher }
    }

    /// Builds the payload for one bundle and validates it. The bundle's
    /// recorded risk factors carry the scoring reasons; the evaluation,
    /// when present, contributes the axis score.
    pub fn build(
        &self,
        profile: &PatientNeedsProfile,
        bundle: &ScenarioBundle,
        evaluation: Option<&AxisEvaluation>,
        scores: &AlgorithmScores,
    ) -> Result<ExplanationPayload, ExplainError> {
        let mut service_categories: Vec<ServiceCategory> = Vec::new();
        for line in &bundle.service_lines {
            if !service_categories.contains(&line.category) {
                service_categories.push(line.category);
            }
        }

        let algorithm_scores: BTreeMap<String, i32> = scores
            .entries()
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect();

        let payload = ExplanationPayload {
            patient_ref: self.hasher.patient_ref(&profile.patient_id),
            scenario_ref: self.hasher.scenario_ref(&bundle.scenario_id),
            axis: bundle.primary_axis,
            axis_score: evaluation.map(|e| e.score).unwrap_or(0),
            axis_reasons: bundle.risks_addressed.clone(),
            confidence: profile.confidence,
            completeness_pct: (f64::from(profile.completeness) * 100.0).round(),
            needs_cluster: profile.needs_cluster,
            episode_type: profile.episode_type,
            service_categories,
            weekly_visits: bundle.metrics.total_weekly_visits,
            weekly_hours: bundle.metrics.total_weekly_hours,
            cap_utilization_pct: bundle.cost.cap_utilization_pct,
            algorithm_scores,
        };

        validate_no_phi_pii(&payload)?;
        Ok(payload)
    }
}

/// Re-serializes a value and scans it for protected data: forbidden
/// fragments against every key in the JSON tree, email and ten-digit
/// patterns against the full serialized text.
pub fn validate_no_phi_pii<T: Serialize>(payload: &T) -> Result<(), ExplainError> {
    let value = serde_json::to_value(payload)
        .map_err(|e| ExplainError::SafetyViolation(format!("payload not inspectable: {e}")))?;

    let mut keys = Vec::new();
    collect_keys(&value, &mut keys);
    for key in &keys {
        let lowered = key.to_lowercase();
        for fragment in FORBIDDEN_KEY_FRAGMENTS {
            if lowered.contains(fragment) {
                return Err(ExplainError::SafetyViolation(format!(
                    "field '{key}' matches forbidden fragment '{fragment}'"
                )));
            }
        }
    }

    let serialized = value.to_string();
    if EMAIL_PATTERN.is_match(&serialized) {
        return Err(ExplainError::SafetyViolation(
            "email address pattern found in payload".to_string(),
        ));
    }
    if TEN_DIGIT_PATTERN.is_match(&serialized) {
        return Err(ExplainError::SafetyViolation(
            "10-digit number pattern found in payload".to_string(),
        ));
    }

    Ok(())
}

fn collect_keys(value: &serde_json::Value, keys: &mut Vec<String>) {
    match value {
        serde_json::Value::Object(map) => {
            for (key, nested) in map {
                keys.push(key.clone());
                collect_keys(nested, keys);
            }
        }
        serde_json::Value::Array(items) => {
            for item in items {
                collect_keys(item, keys);
            }
        }
        _ => {}
    }
}
