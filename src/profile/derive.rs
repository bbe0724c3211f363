//! Derived profile attributes, computed after the source merge.
//!
//! Pure functions over the merged sub-profiles. Thresholds live here as
//! named constants; nothing in this module touches a store.

use crate::assessments::{ReferralRecord, ReferralSource};

use super::types::{
    ClinicalRiskProfile, CognitiveProfile, ConfidenceLevel, EpisodeType, FunctionalProfile,
    NeedsCluster, TreatmentProfile,
};

const COMPLEX_INSTABILITY_MIN: u8 = 4;
const REHAB_POTENTIAL_MIN: u8 = 3;
const REHAB_IMPAIRMENT_MIN: u8 = 2;
const COGNITIVE_CLUSTER_MIN: u8 = 3;
const PHYSICAL_ASSIST_MIN: u8 = 3;
const CHRONIC_CONDITION_COUNT: usize = 3;
const CHRONIC_ADL_MIN: u8 = 3;
const MAINTENANCE_INSTABILITY_MAX: u8 = 2;

const CONFIDENCE_HIGH_MIN_WEIGHT: f64 = 1.0;
const CONFIDENCE_MEDIUM_MIN_WEIGHT: f64 = 0.7;

/// Coarse needs cluster. Checked in decreasing order of care intensity,
/// so a patient matching several lands in the heaviest one.
pub fn derive_needs_cluster(
    functional: &FunctionalProfile,
    cognitive: &CognitiveProfile,
    clinical: &ClinicalRiskProfile,
    treatment: &TreatmentProfile,
) -> NeedsCluster {
    if treatment.requires_extensive_services
        || clinical.health_instability >= COMPLEX_INSTABILITY_MIN
    {
        return NeedsCluster::MedicalComplex;
    }
    if functional.rehab_potential >= REHAB_POTENTIAL_MIN
        && (functional.mobility_level >= REHAB_IMPAIRMENT_MIN
            || functional.adl_support_level >= REHAB_IMPAIRMENT_MIN)
    {
        return NeedsCluster::Rehabilitation;
    }
    if cognitive.cognitive_complexity >= COGNITIVE_CLUSTER_MIN
        || cognitive.wandering_risk
        || cognitive.behavioural_symptoms
    {
        return NeedsCluster::CognitiveBehavioural;
    }
    if functional.adl_support_level >= PHYSICAL_ASSIST_MIN
        || functional.mobility_level >= PHYSICAL_ASSIST_MIN
    {
        return NeedsCluster::PhysicalAssist;
    }
    NeedsCluster::Stable
}

/// Episode classification. Maintenance requires at least some recorded
/// functional need, so an empty profile stays unclassified.
pub fn derive_episode_type(
    functional: &FunctionalProfile,
    clinical: &ClinicalRiskProfile,
    treatment: &TreatmentProfile,
    referral: Option<&ReferralRecord>,
) -> EpisodeType {
    let hospital_referral =
        referral.is_some_and(|r| r.source == ReferralSource::Hospital);

    if (clinical.recent_hospitalization || hospital_referral)
        && functional.rehab_potential >= REHAB_POTENTIAL_MIN
    {
        return EpisodeType::ShortStayRecovery;
    }
    if treatment.requires_extensive_services
        || clinical.health_instability >= COMPLEX_INSTABILITY_MIN
        || (clinical.active_conditions.len() >= CHRONIC_CONDITION_COUNT
            && functional.adl_support_level >= CHRONIC_ADL_MIN)
    {
        return EpisodeType::LongStayChronic;
    }
    if (functional.adl_support_level >= 1 || functional.iadl_support_level >= 1)
        && clinical.health_instability <= MAINTENANCE_INSTABILITY_MAX
        && !clinical.recent_hospitalization
    {
        return EpisodeType::Maintenance;
    }
    EpisodeType::Unclassified
}

/// Estimates rehab potential when no assessor rated it directly.
/// Recent acute events plus moderate (not total) impairment are the
/// strongest recovery signals.
pub fn derive_rehab_potential(
    functional: &FunctionalProfile,
    clinical: &ClinicalRiskProfile,
    referral: Option<&ReferralRecord>,
) -> u8 {
    let mut score: u8 = 0;

    if clinical.recent_hospitalization {
        score += 2;
    }
    if referral.is_some_and(|r| r.urgent || r.source == ReferralSource::Hospital) {
        score += 1;
    }
    if (1..=3).contains(&functional.mobility_level) {
        score += 1;
    }
    if (1..=3).contains(&functional.adl_support_level) {
        score += 1;
    }

    score.min(5)
}

/// Confidence from the merge outcome: only the strongest contributing
/// source and the presence of the full primary assessment count.
pub fn derive_confidence(max_weight: f64, primary_contributed: bool) -> ConfidenceLevel {
    if max_weight >= CONFIDENCE_HIGH_MIN_WEIGHT && primary_contributed {
        ConfidenceLevel::High
    } else if max_weight >= CONFIDENCE_MEDIUM_MIN_WEIGHT {
        ConfidenceLevel::Medium
    } else {
        ConfidenceLevel::Low
    }
}
