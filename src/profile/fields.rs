//! Field keys and the merge draft for needs-profile construction.
//!
//! Every profile field that a mapper can contribute has a canonical key
//! here. The keys double as audit identifiers: the `missing_fields` list
//! on a finished profile uses them verbatim.

use std::collections::HashMap;

// ─── Field keys ──────────────────────────────────────────────────────────

// Functional
pub const ADL_SUPPORT_LEVEL: &str = "adl_support_level";
pub const IADL_SUPPORT_LEVEL: &str = "iadl_support_level";
pub const MOBILITY_LEVEL: &str = "mobility_level";
pub const FALLS_RISK_LEVEL: &str = "falls_risk_level";
pub const REHAB_POTENTIAL: &str = "rehab_potential";
pub const USES_MOBILITY_AID: &str = "uses_mobility_aid";
pub const RECENT_FALL: &str = "recent_fall";

// Cognitive / behavioural
pub const COGNITIVE_COMPLEXITY: &str = "cognitive_complexity";
pub const COMMUNICATION_LEVEL: &str = "communication_level";
pub const WANDERING_RISK: &str = "wandering_risk";
pub const BEHAVIOURAL_SYMPTOMS: &str = "behavioural_symptoms";
pub const MOOD_DECLINE: &str = "mood_decline";

// Clinical risk
pub const HEALTH_INSTABILITY: &str = "health_instability";
pub const PAIN_LEVEL: &str = "pain_level";
pub const PRESSURE_ULCER_RISK: &str = "pressure_ulcer_risk";
pub const RECENT_HOSPITALIZATION: &str = "recent_hospitalization";
pub const SWALLOWING_DIFFICULTY: &str = "swallowing_difficulty";
pub const ACTIVE_CONDITIONS: &str = "active_conditions";

// Treatment
pub const REQUIRES_EXTENSIVE_SERVICES: &str = "requires_extensive_services";
pub const EXTENSIVE_SERVICES: &str = "extensive_services";
pub const WOUND_CARE: &str = "wound_care";
pub const OXYGEN_THERAPY: &str = "oxygen_therapy";
pub const INJECTION_SUPPORT: &str = "injection_support";
pub const CATHETER_CARE: &str = "catheter_care";

// Support network
pub const CAREGIVER_AVAILABLE: &str = "caregiver_available";
pub const LIVES_ALONE: &str = "lives_alone";
pub const CAREGIVER_STRESS_LEVEL: &str = "caregiver_stress_level";
pub const SOCIAL_SUPPORT_LEVEL: &str = "social_support_level";

// Technology
pub const TECH_READINESS_LEVEL: &str = "tech_readiness_level";
pub const HAS_INTERNET: &str = "has_internet";
pub const USES_MONITORING_DEVICES: &str = "uses_monitoring_devices";
pub const COMFORTABLE_WITH_VIDEO: &str = "comfortable_with_video";

// Home environment
pub const HOME_SAFETY_LEVEL: &str = "home_safety_level";
pub const STAIRS_PRESENT: &str = "stairs_present";
pub const BATHROOM_ADAPTED: &str = "bathroom_adapted";
pub const RURAL_ISOLATED: &str = "rural_isolated";

// Case-mix classification
pub const CASE_MIX_GROUP: &str = "case_mix_group";
pub const CASE_MIX_CATEGORY: &str = "case_mix_category";
pub const CASE_MIX_RANK: &str = "case_mix_rank";

/// Denominator of the completeness score. Kept deliberately small so a
/// solid intake assessment alone can reach a usable score.
pub const REQUIRED_CORE_FIELDS: [&str; 10] = [
    ADL_SUPPORT_LEVEL,
    IADL_SUPPORT_LEVEL,
    MOBILITY_LEVEL,
    FALLS_RISK_LEVEL,
    COGNITIVE_COMPLEXITY,
    HEALTH_INSTABILITY,
    PAIN_LEVEL,
    CAREGIVER_AVAILABLE,
    LIVES_ALONE,
    HOME_SAFETY_LEVEL,
];

/// Superset used for the `missing_fields` list on the finished profile.
pub const REQUIRED_EXTENDED_FIELDS: [&str; 17] = [
    ADL_SUPPORT_LEVEL,
    IADL_SUPPORT_LEVEL,
    MOBILITY_LEVEL,
    FALLS_RISK_LEVEL,
    COGNITIVE_COMPLEXITY,
    HEALTH_INSTABILITY,
    PAIN_LEVEL,
    CAREGIVER_AVAILABLE,
    LIVES_ALONE,
    HOME_SAFETY_LEVEL,
    REHAB_POTENTIAL,
    COMMUNICATION_LEVEL,
    PRESSURE_ULCER_RISK,
    CAREGIVER_STRESS_LEVEL,
    SOCIAL_SUPPORT_LEVEL,
    TECH_READINESS_LEVEL,
    CASE_MIX_GROUP,
];

// ─── Merge draft ─────────────────────────────────────────────────────────

/// One contributed field value. Zero, false and empty count as unset so
/// that lower-priority sources may still fill them.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Int(i64),
    Flag(bool),
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    pub fn is_unset_or_zero(&self) -> bool {
        match self {
            FieldValue::Int(n) => *n == 0,
            FieldValue::Flag(b) => !b,
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::List(items) => items.is_empty(),
        }
    }
}

/// How a source's fields land on the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyMode {
    /// Set only fields that are still unset (or zero / false / empty).
    Fill,
    /// Replace whatever is there. Used by the behavioural screener, which
    /// is narrower but more specialized than the broad assessments.
    Overlay,
}

/// Accumulates field contributions from mappers in priority order.
/// Purely in-memory; the builder assembles the final profile from it.
#[derive(Debug, Clone, Default)]
pub struct ProfileDraft {
    values: HashMap<&'static str, FieldValue>,
    max_weight: f64,
}

impl ProfileDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one source's contributions and returns how many fields
    /// landed. Fill skips incoming unset-or-zero values (the assembled
    /// profile defaults to zero anyway, and a skipped zero must not count
    /// as populated). Overlay writes everything it is given: a screener's
    /// recorded `false` clears an earlier `true`.
    pub fn apply(
        &mut self,
        weight: f64,
        mode: ApplyMode,
        fields: &[(&'static str, FieldValue)],
    ) -> usize {
        let mut applied = 0;
        for (key, value) in fields {
            let take = match mode {
                ApplyMode::Overlay => true,
                ApplyMode::Fill => {
                    !value.is_unset_or_zero()
                        && self
                            .values
                            .get(key)
                            .map_or(true, |existing| existing.is_unset_or_zero())
                }
            };
            if take {
                self.values.insert(key, value.clone());
                applied += 1;
            }
        }
        if applied > 0 && weight > self.max_weight {
            self.max_weight = weight;
        }
        applied
    }

    /// Highest confidence weight among sources that landed at least one
    /// field.
    pub fn max_weight(&self) -> f64 {
        self.max_weight
    }

    pub fn populated(&self, key: &str) -> bool {
        self.values
            .get(key)
            .is_some_and(|value| !value.is_unset_or_zero())
    }

    pub fn populated_count(&self, keys: &[&str]) -> usize {
        keys.iter().filter(|key| self.populated(key)).count()
    }

    pub fn missing(&self, keys: &[&str]) -> Vec<String> {
        keys.iter()
            .filter(|key| !self.populated(key))
            .map(|key| key.to_string())
            .collect()
    }

    /// Severity level accessor, clamped to the 0..=5 scale every
    /// sub-profile uses.
    pub fn level(&self, key: &str) -> u8 {
        self.int(key).clamp(0, 5) as u8
    }

    pub fn int(&self, key: &str) -> i64 {
        match self.values.get(key) {
            Some(FieldValue::Int(n)) => *n,
            _ => 0,
        }
    }

    pub fn flag(&self, key: &str) -> bool {
        match self.values.get(key) {
            Some(FieldValue::Flag(b)) => *b,
            _ => false,
        }
    }

    pub fn text(&self, key: &str) -> Option<String> {
        match self.values.get(key) {
            Some(FieldValue::Text(s)) if !s.is_empty() => Some(s.clone()),
            _ => None,
        }
    }

    pub fn list(&self, key: &str) -> Vec<String> {
        match self.values.get(key) {
            Some(FieldValue::List(items)) => items.clone(),
            _ => Vec::new(),
        }
    }
}
