//! Bridge between the assessment feed's item keys and the decision
//! tables' input codes.
//!
//! Two independent coding schemes meet here. The translation table and
//! the derivation fallbacks both change clinical scoring when touched,
//! so they are public and tested rather than buried in the evaluator.

use std::collections::HashMap;

use crate::assessments::AssessmentItems;

use super::EvaluationContext;

/// Decision-table input codes.
pub mod codes {
    pub const ADL_HIERARCHY: &str = "ADL_H";
    pub const IADL_DIFFICULTY: &str = "IADL_D";
    pub const COGNITIVE_PERFORMANCE: &str = "COG_P";
    pub const MOOD_SYMPTOMS: &str = "MOOD_S";
    pub const PAIN_FREQUENCY: &str = "PAIN_F";
    pub const PAIN_INTENSITY: &str = "PAIN_I";
    pub const DYSPNEA: &str = "DYSPNEA";
    pub const EDEMA: &str = "EDEMA";
    pub const WEIGHT_LOSS: &str = "WT_LOSS";
    pub const DEHYDRATION: &str = "DEHYD";
    pub const SELF_RATED_HEALTH: &str = "SRH";
    pub const FALLS: &str = "FALLS";
    pub const FUNCTION_DECLINE: &str = "FUNC_DECLINE";
    pub const CAREGIVER_STRESS: &str = "CG_STRESS";
    pub const URGENT_REFERRAL: &str = "REF_URG";
}

/// Feed item key to decision-table code, direct translations only.
/// Codes with no direct source are filled by [`derive_missing`].
pub const ITEM_CODE_MAP: &[(&str, &str)] = &[
    ("adl_hierarchy", codes::ADL_HIERARCHY),
    ("iadl_difficulty", codes::IADL_DIFFICULTY),
    ("cognitive_performance", codes::COGNITIVE_PERFORMANCE),
    ("mood_symptom_count", codes::MOOD_SYMPTOMS),
    ("pain_frequency", codes::PAIN_FREQUENCY),
    ("pain_intensity", codes::PAIN_INTENSITY),
    ("dyspnea", codes::DYSPNEA),
    ("edema", codes::EDEMA),
    ("weight_loss", codes::WEIGHT_LOSS),
    ("dehydration", codes::DEHYDRATION),
    ("self_rated_health", codes::SELF_RATED_HEALTH),
    ("falls_last_90", codes::FALLS),
    ("function_decline", codes::FUNCTION_DECLINE),
    ("caregiver_stress", codes::CAREGIVER_STRESS),
];

/// Item set in the decision tables' coding scheme.
#[derive(Debug, Clone, Default)]
pub struct RemappedItems {
    values: HashMap<&'static str, i32>,
}

impl RemappedItems {
    pub fn get(&self, code: &str) -> Option<i32> {
        self.values.get(code).copied()
    }

    pub fn insert(&mut self, code: &'static str, value: i32) {
        self.values.insert(code, value);
    }

    pub fn contains(&self, code: &str) -> bool {
        self.values.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Translates the raw feed items and fills the derivable gaps.
pub fn remap_items(items: &AssessmentItems, context: &EvaluationContext) -> RemappedItems {
    let mut remapped = RemappedItems::default();
    for &(raw, code) in ITEM_CODE_MAP {
        if let Some(value) = items.get(raw) {
            remapped.insert(code, value);
        }
    }
    derive_missing(&mut remapped, items, context);
    remapped
}

/// Fallback rules for codes the direct translation could not fill.
pub fn derive_missing(
    remapped: &mut RemappedItems,
    items: &AssessmentItems,
    context: &EvaluationContext,
) {
    // The urgent-referral flag has no feed item; it comes from the
    // request context.
    remapped.insert(codes::URGENT_REFERRAL, context.urgent_referral as i32);

    // A recent-fall flag stands in when the 90-day falls count was not
    // collected.
    if !remapped.contains(codes::FALLS) {
        if let Some(flag) = items.get("recent_fall") {
            remapped.insert(codes::FALLS, flag);
        }
    }

    // Self-rated health is rarely collected directly; approximate it
    // from the count of positive instability indicators, else 0.
    if !remapped.contains(codes::SELF_RATED_HEALTH) {
        let indicators = [
            codes::DYSPNEA,
            codes::EDEMA,
            codes::WEIGHT_LOSS,
            codes::DEHYDRATION,
        ]
        .into_iter()
        .filter(|code| remapped.get(code).unwrap_or(0) >= 1)
        .count() as i32;
        remapped.insert(codes::SELF_RATED_HEALTH, indicators);
    }

    // A recent fall or hospitalization marks functional decline when
    // the item itself is absent.
    if !remapped.contains(codes::FUNCTION_DECLINE) {
        let declined = context.recent_hospitalization
            || remapped.get(codes::FALLS).unwrap_or(0) >= 1;
        remapped.insert(codes::FUNCTION_DECLINE, declined as i32);
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
    fn direct_translations_carry_over() {
        let items = feed(&[("adl_hierarchy", 4), ("pain_frequency", 2)]);

        let remapped = remap_items(&items, &EvaluationContext::default());

        assert_eq!(remapped.get(codes::ADL_HIERARCHY), Some(4));
        assert_eq!(remapped.get(codes::PAIN_FREQUENCY), Some(2));
    }

    #[test]
    fn unknown_feed_keys_are_ignored() {
        let items = feed(&[("shoe_size", 42)]);

        let remapped = remap_items(&items, &EvaluationContext::default());

        assert!(!remapped.contains("shoe_size"));
        assert_eq!(remapped.get("shoe_size"), None);
    }

    #[test]
    fn self_rated_health_derives_from_indicator_count() {
        let items = feed(&[("dyspnea", 1), ("edema", 1), ("weight_loss", 0)]);

        let remapped = remap_items(&items, &EvaluationContext::default());

        assert_eq!(remapped.get(codes::SELF_RATED_HEALTH), Some(2));
    }

    #[test]
    fn directly_collected_self_rated_health_wins() {
        let items = feed(&[("self_rated_health", 3), ("dyspnea", 1)]);

        let remapped = remap_items(&items, &EvaluationContext::default());

        assert_eq!(remapped.get(codes::SELF_RATED_HEALTH), Some(3));
    }

    #[test]
    fn recent_fall_flag_backfills_missing_falls_count() {
        let items = feed(&[("recent_fall", 1)]);

        let remapped = remap_items(&items, &EvaluationContext::default());

        assert_eq!(remapped.get(codes::FALLS), Some(1));
        // The backfilled fall also marks functional decline.
        assert_eq!(remapped.get(codes::FUNCTION_DECLINE), Some(1));
    }

    #[test]
    fn hospitalization_context_marks_decline() {
        let context = EvaluationContext {
            recent_hospitalization: true,
            urgent_referral: true,
        };

        let remapped = remap_items(&feed(&[]), &context);

        assert_eq!(remapped.get(codes::FUNCTION_DECLINE), Some(1));
        assert_eq!(remapped.get(codes::URGENT_REFERRAL), Some(1));
    }

    #[test]
    fn empty_feed_still_fills_derivable_codes() {
        let remapped = remap_items(&feed(&[]), &EvaluationContext::default());

        assert_eq!(remapped.get(codes::SELF_RATED_HEALTH), Some(0));
        assert_eq!(remapped.get(codes::FUNCTION_DECLINE), Some(0));
        assert_eq!(remapped.get(codes::URGENT_REFERRAL), Some(0));
        assert_eq!(remapped.get(codes::ADL_HIERARCHY), None);
    }
}
