//! Raw assessment records as they arrive from upstream intake systems.
//!
//! These structs are deliberately dumb: no derivation logic lives here.
//! Mappers in `profile::mappers` read them and contribute fields to the
//! needs profile draft; `algorithms` reads the coded item map.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::enums::str_enum;

str_enum!(ReferralSource {
    Hospital => "hospital",
    PrimaryCare => "primary_care",
    Community => "community",
    SelfReferral => "self_referral",
});

/// Coded assessment items keyed by item code (e.g. `"C1"`, `"J2a"`).
///
/// Scores are raw instrument values; interpretation belongs to the
/// clinical algorithms, not to this container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentItems(HashMap<String, i32>);

impl AssessmentItems {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    pub fn get(&self, code: &str) -> Option<i32> {
        self.0.get(code).copied()
    }

    pub fn set(&mut self, code: impl Into<String>, score: i32) {
        self.0.insert(code.into(), score);
    }

    /// True when the item is present (a recorded zero still counts).
    pub fn has(&self, code: &str) -> bool {
        self.0.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl From<HashMap<String, i32>> for AssessmentItems {
    fn from(map: HashMap<String, i32>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, i32)> for AssessmentItems {
    fn from_iter<I: IntoIterator<Item = (String, i32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Case-mix classification attached to a completed home-care assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseMixClassification {
    /// Group code, e.g. `"RB2"`.
    pub group: String,
    /// Human-readable category, e.g. `"Rehabilitation"`.
    pub category: String,
    /// Relative resource-intensity rank within the classification system.
    pub rank: i32,
}

/// Full in-home assessment. The richest source: every severity scale and
/// flag the needs profile carries has a counterpart here.
///
/// Severity scales run 0..=5 unless noted; 0 means no observed need.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HomeCareAssessment {
    pub patient_id: Uuid,
    pub assessed_on: NaiveDate,

    // Functional
    pub adl_support: u8,
    pub iadl_support: u8,
    pub mobility: u8,
    pub falls_risk: u8,
    pub rehab_potential: u8,
    pub uses_mobility_aid: bool,
    pub recent_fall: bool,

    // Cognitive / behavioural
    pub cognitive_complexity: u8,
    pub communication: u8,
    pub wandering_risk: bool,
    pub behavioural_symptoms: bool,
    pub mood_decline: bool,

    // Clinical
    pub health_instability: u8,
    pub pain: u8,
    pub pressure_ulcer_risk: u8,
    pub recent_hospitalization: bool,
    pub swallowing_difficulty: bool,
    pub active_conditions: Vec<String>,

    // Treatments
    pub requires_extensive_services: bool,
    pub extensive_services: Vec<String>,
    pub wound_care: bool,
    pub oxygen_therapy: bool,
    pub injection_support: bool,
    pub catheter_care: bool,

    // Support network
    pub caregiver_available: bool,
    pub lives_alone: bool,
    pub caregiver_stress: u8,
    pub social_support: u8,

    // Technology
    pub tech_readiness: u8,
    pub has_internet: bool,
    pub uses_monitoring_devices: bool,
    pub comfortable_with_video: bool,

    // Home environment (higher = more hazardous)
    pub home_safety: u8,
    pub stairs_present: bool,
    pub bathroom_adapted: bool,
    pub rural_isolated: bool,

    pub case_mix: Option<CaseMixClassification>,
    pub items: AssessmentItems,
}

/// Shorter intake assessment taken over the phone or at first contact.
/// Carries a subset of the home-care scales at lower fidelity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactAssessment {
    pub patient_id: Uuid,
    pub assessed_on: NaiveDate,

    pub adl_support: u8,
    pub iadl_support: u8,
    pub mobility: u8,
    pub falls_risk: u8,

    pub cognitive_complexity: u8,
    pub communication: u8,

    pub health_instability: u8,
    pub pain: u8,
    pub recent_hospitalization: bool,

    pub lives_alone: bool,
    pub caregiver_available: bool,

    pub reported_conditions: Vec<String>,
    pub items: AssessmentItems,
}

/// Mood and behaviour screener. Narrow but specialized: when present it
/// overrides the corresponding flags from broader assessments.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BehaviouralScreener {
    pub patient_id: Uuid,
    pub screened_on: NaiveDate,

    pub mood_decline: bool,
    pub behavioural_symptoms: bool,
    pub wandering_risk: bool,
    /// 0..=5, higher is more concerning.
    pub cognitive_concern: u8,
    /// 0..=5 distressed-mood scale.
    pub distressed_mood: u8,
}

/// Referral paperwork. The thinnest source: only preliminary flags, no
/// measured scales.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferralRecord {
    pub patient_id: Uuid,
    pub referred_on: NaiveDate,
    pub source: ReferralSource,

    pub urgent: bool,
    pub requested_supports: Vec<String>,
    pub lives_alone: Option<bool>,
    pub caregiver_available: Option<bool>,
}

/// Everything on file for one patient, fetched up front so profile
/// building never touches a store mid-derivation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssessmentSnapshot {
    pub patient_id: Uuid,
    pub home_care: Option<HomeCareAssessment>,
    pub contact: Option<ContactAssessment>,
    pub screener: Option<BehaviouralScreener>,
    pub referral: Option<ReferralRecord>,
}

impl AssessmentSnapshot {
    pub fn empty(patient_id: Uuid) -> Self {
        Self {
            patient_id,
            ..Self::default()
        }
    }

    /// True when no source of any kind is on file.
    pub fn is_empty(&self) -> bool {
        self.home_care.is_none()
            && self.contact.is_none()
            && self.screener.is_none()
            && self.referral.is_none()
    }

    /// Drops sources dated more than `cutoff_days` before `today`.
    /// Stale data is worse than missing data for planning purposes.
    pub fn without_stale(mut self, today: NaiveDate, cutoff_days: i64) -> Self {
        let stale = |date: NaiveDate| (today - date).num_days() > cutoff_days;

        if self.home_care.as_ref().is_some_and(|a| stale(a.assessed_on)) {
            self.home_care = None;
        }
        if self.contact.as_ref().is_some_and(|a| stale(a.assessed_on)) {
            self.contact = None;
        }
        if self.screener.as_ref().is_some_and(|s| stale(s.screened_on)) {
            self.screener = None;
        }
        if self.referral.as_ref().is_some_and(|r| stale(r.referred_on)) {
            self.referral = None;
        }
        self
    }
}
