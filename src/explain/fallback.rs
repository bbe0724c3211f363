//! Deterministic explanation wording built from scoring evidence.
//!
//! Always available and always succeeds; every provider outage lands
//! here. Output is a pure function of the payload, so identical inputs
//! produce identical explanations.

use crate::profile::ConfidenceLevel;

use super::types::{ExplanationPayload, ExplanationSource, ScenarioExplanation};

/// Reasons carried into the detailed points before the operational
/// summary line.
const MAX_REASON_POINTS: usize = 5;

pub struct RuleBasedExplainer;

impl RuleBasedExplainer {
    pub fn explain(&self, payload: &ExplanationPayload) -> ScenarioExplanation {
        let axis_label = payload.axis.label();

        let short_explanation = if payload.axis_reasons.is_empty() {
            format!(
                "{axis_label} is offered as a reasonable starting plan; \
                 the assessment data did not single out one dominant care need."
            )
        } else {
            format!(
                "{axis_label} fits this patient's assessed needs: {} documented {} support it, led by {}.",
                payload.axis_reasons.len(),
                if payload.axis_reasons.len() == 1 { "factor" } else { "factors" },
                lowercase_first(&payload.axis_reasons[0]),
            )
        };

        let mut detailed_points: Vec<String> = payload
            .axis_reasons
            .iter()
            .take(MAX_REASON_POINTS)
            .cloned()
            .collect();
        detailed_points.push(format!(
            "The plan schedules {:.0} visits per week across {} service {} ({:.0}% of the reference service level).",
            payload.weekly_visits,
            payload.service_categories.len(),
            if payload.service_categories.len() == 1 { "type" } else { "types" },
            payload.cap_utilization_pct,
        ));

        ScenarioExplanation {
            short_explanation,
            detailed_points,
            confidence_label: confidence_label(payload.confidence).to_string(),
            source: ExplanationSource::RulesBased,
        }
    }
}

fn confidence_label(confidence: ConfidenceLevel) -> &'static str {
    match confidence {
        ConfidenceLevel::High => "High confidence",
        ConfidenceLevel::Medium => "Moderate confidence",
        ConfidenceLevel::Low => "Low confidence, limited assessment data",
    }
}

fn lowercase_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axes::ScenarioAxis;
    use crate::profile::{EpisodeType, NeedsCluster};
    use crate::scenario::ServiceCategory;
    use std::collections::BTreeMap;

    fn payload_with_reasons(reasons: Vec<&str>) -> ExplanationPayload {
        ExplanationPayload {
            patient_ref: "a3f9c2d4e5b60718".to_string(),
            scenario_ref: "0718a3f9c2d4e5b6".to_string(),
            axis: ScenarioAxis::SafetyStability,
            axis_score: 55,
            axis_reasons: reasons.into_iter().map(String::from).collect(),
            confidence: ConfidenceLevel::Medium,
            completeness_pct: 80.0,
            needs_cluster: NeedsCluster::PhysicalAssist,
            episode_type: EpisodeType::LongStayChronic,
            service_categories: vec![ServiceCategory::Nursing, ServiceCategory::PersonalSupport],
            weekly_visits: 9.0,
            weekly_hours: 7.5,
            cap_utilization_pct: 52.0,
            algorithm_scores: BTreeMap::new(),
        }
    }

    #[test]
    fn output_is_deterministic() {
        let payload = payload_with_reasons(vec!["Falls risk rated 3 of 5"]);
        let explainer = RuleBasedExplainer;

        assert_eq!(explainer.explain(&payload), explainer.explain(&payload));
    }

    #[test]
    fn leading_reason_is_woven_into_the_summary() {
        let payload = payload_with_reasons(vec![
            "Falls risk rated 3 of 5",
            "Health instability rated 4 of 5",
        ]);

        let explanation = RuleBasedExplainer.explain(&payload);

        assert!(explanation
            .short_explanation
            .contains("led by falls risk rated 3 of 5"));
        assert!(explanation.short_explanation.contains("2 documented factors"));
        assert_eq!(explanation.source, ExplanationSource::RulesBased);
    }

    #[test]
    fn no_evidence_yields_the_neutral_summary() {
        let payload = payload_with_reasons(Vec::new());

        let explanation = RuleBasedExplainer.explain(&payload);

        assert!(explanation.short_explanation.contains("reasonable starting plan"));
        // Only the operational summary point remains.
        assert_eq!(explanation.detailed_points.len(), 1);
    }

    #[test]
    fn detailed_points_are_capped() {
        let payload = payload_with_reasons(vec![
            "Reason one", "Reason two", "Reason three", "Reason four", "Reason five",
            "Reason six", "Reason seven",
        ]);

        let explanation = RuleBasedExplainer.explain(&payload);

        // Five reasons plus the operational summary line.
        assert_eq!(explanation.detailed_points.len(), 6);
    }

    #[test]
    fn operational_point_reports_visits_and_utilization() {
        let payload = payload_with_reasons(vec!["Falls risk rated 3 of 5"]);

        let explanation = RuleBasedExplainer.explain(&payload);

        let last = explanation.detailed_points.last().unwrap();
        assert!(last.contains("9 visits per week"));
        assert!(last.contains("2 service types"));
        assert!(last.contains("52% of the reference service level"));
    }

    #[test]
    fn confidence_labels_follow_profile_confidence() {
        let mut payload = payload_with_reasons(vec!["Falls risk rated 3 of 5"]);

        payload.confidence = ConfidenceLevel::High;
        assert_eq!(
            RuleBasedExplainer.explain(&payload).confidence_label,
            "High confidence"
        );

        payload.confidence = ConfidenceLevel::Low;
        assert_eq!(
            RuleBasedExplainer.explain(&payload).confidence_label,
            "Low confidence, limited assessment data"
        );
    }
}
