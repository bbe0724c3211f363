//! Independent clinical scoring algorithms over raw assessment items.
//!
//! Each named algorithm runs its own threshold tree against a remapped
//! item set. Evaluation never aborts as a batch: a failing algorithm
//! logs a warning and takes its documented default so the siblings
//! still score.

pub mod decision;
pub mod mapping;

pub use decision::DecisionNode;
pub use mapping::{derive_missing, remap_items, RemappedItems, ITEM_CODE_MAP};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::assessments::AssessmentItems;

#[derive(Debug, Error)]
pub enum AlgorithmError {
    #[error("decision input '{0}' is missing from the remapped item set")]
    MissingItem(&'static str),
}

/// Side information the derivation fallbacks consult when the raw item
/// set is incomplete.
#[derive(Debug, Clone, Default)]
pub struct EvaluationContext {
    pub recent_hospitalization: bool,
    pub urgent_referral: bool,
}

/// One score per algorithm. The defaults are the documented safe
/// values each algorithm falls back to on failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmScores {
    pub self_reliance: bool,
    pub assessment_urgency: u8,
    pub service_urgency: u8,
    pub rehabilitation: u8,
    pub personal_support: u8,
    pub distressed_mood: u8,
    pub pain: u8,
    pub health_instability: u8,
}

impl Default for AlgorithmScores {
    fn default() -> Self {
        Self {
            self_reliance: false,
            assessment_urgency: 1,
            service_urgency: 1,
            rehabilitation: 0,
            personal_support: 0,
            distressed_mood: 0,
            pain: 0,
            health_instability: 0,
        }
    }
}

impl AlgorithmScores {
    /// Name and score pairs for logging and summary payloads.
    pub fn entries(&self) -> [(&'static str, i32); 8] {
        [
            ("self_reliance", self.self_reliance as i32),
            ("assessment_urgency", self.assessment_urgency as i32),
            ("service_urgency", self.service_urgency as i32),
            ("rehabilitation", self.rehabilitation as i32),
            ("personal_support", self.personal_support as i32),
            ("distressed_mood", self.distressed_mood as i32),
            ("pain", self.pain as i32),
            ("health_instability", self.health_instability as i32),
        ]
    }
}

/// Evaluates every algorithm against one item set.
pub fn evaluate_all(items: &AssessmentItems, context: &EvaluationContext) -> AlgorithmScores {
    let remapped = remap_items(items, context);

    AlgorithmScores {
        self_reliance: eval_or_default(&decision::SELF_RELIANCE_TREE, &remapped, "self_reliance", 0)
            != 0,
        assessment_urgency: eval_or_default(
            &decision::ASSESSMENT_URGENCY_TREE,
            &remapped,
            "assessment_urgency",
            1,
        ) as u8,
        service_urgency: eval_or_default(
            &decision::SERVICE_URGENCY_TREE,
            &remapped,
            "service_urgency",
            1,
        ) as u8,
        rehabilitation: eval_or_default(
            &decision::REHABILITATION_TREE,
            &remapped,
            "rehabilitation",
            0,
        ) as u8,
        personal_support: eval_or_default(
            &decision::PERSONAL_SUPPORT_TREE,
            &remapped,
            "personal_support",
            0,
        ) as u8,
        distressed_mood: eval_or_default(
            &decision::DISTRESSED_MOOD_TREE,
            &remapped,
            "distressed_mood",
            0,
        ) as u8,
        pain: eval_or_default(&decision::PAIN_TREE, &remapped, "pain", 0) as u8,
        health_instability: eval_or_default(
            &decision::HEALTH_INSTABILITY_TREE,
            &remapped,
            "health_instability",
            0,
        ) as u8,
    }
}

fn eval_or_default(tree: &DecisionNode, items: &RemappedItems, algorithm: &str, default: i32) -> i32 {
    match tree.evaluate(items) {
        Ok(score) => score,
        Err(e) => {
            tracing::warn!(algorithm, default, "Algorithm evaluation failed: {e}");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(pairs: &[(&str, i32)]) -> AssessmentItems {
        let mut items = AssessmentItems::default();
        for &(key, value) in pairs {
            items.set(key, value);
        }
        items
    }

    #[test]
    fn empty_item_set_yields_all_defaults() {
        let scores = evaluate_all(&feed(&[]), &EvaluationContext::default());

        assert_eq!(scores, AlgorithmScores::default());
    }

    #[test]
    fn full_item_set_scores_every_algorithm() {
        let items = feed(&[
            ("adl_hierarchy", 4),
            ("iadl_difficulty", 3),
            ("cognitive_performance", 1),
            ("mood_symptom_count", 2),
            ("pain_frequency", 2),
            ("pain_intensity", 3),
            ("dyspnea", 1),
            ("edema", 0),
            ("weight_loss", 1),
            ("dehydration", 0),
            ("self_rated_health", 2),
            ("falls_last_90", 1),
            ("function_decline", 1),
            ("caregiver_stress", 2),
        ]);

        let scores = evaluate_all(&items, &EvaluationContext::default());

        assert!(!scores.self_reliance);
        assert_eq!(scores.assessment_urgency, 5);
        assert_eq!(scores.service_urgency, 5);
        assert_eq!(scores.rehabilitation, 5);
        assert_eq!(scores.personal_support, 5);
        assert_eq!(scores.distressed_mood, 3);
        assert_eq!(scores.pain, 4);
        assert_eq!(scores.health_instability, 3);
    }

    #[test]
    fn one_failing_algorithm_does_not_block_siblings() {
        // Pain items are missing entirely; ADL-driven algorithms still run.
        let items = feed(&[
            ("adl_hierarchy", 4),
            ("iadl_difficulty", 1),
            ("caregiver_stress", 1),
        ]);

        let scores = evaluate_all(&items, &EvaluationContext::default());

        assert_eq!(scores.pain, 0);
        assert_eq!(scores.service_urgency, 5);
        assert_eq!(scores.personal_support, 4);
    }

    #[test]
    fn urgent_referral_context_raises_assessment_urgency() {
        let items = feed(&[
            ("adl_hierarchy", 0),
            ("iadl_difficulty", 0),
            ("cognitive_performance", 0),
            ("self_rated_health", 0),
            ("falls_last_90", 0),
        ]);

        let calm = evaluate_all(&items, &EvaluationContext::default());
        let urgent = evaluate_all(
            &items,
            &EvaluationContext {
                urgent_referral: true,
                ..EvaluationContext::default()
            },
        );

        assert_eq!(calm.assessment_urgency, 1);
        assert_eq!(urgent.assessment_urgency, 3);
    }

    #[test]
    fn entries_expose_every_algorithm_by_name() {
        let scores = AlgorithmScores::default();
        let entries = scores.entries();

        assert_eq!(entries.len(), 8);
        assert!(entries.iter().any(|&(name, v)| name == "assessment_urgency" && v == 1));
        assert!(entries.iter().any(|&(name, v)| name == "pain" && v == 0));
    }
}
