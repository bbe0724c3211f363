//! Axis scoring policy.
//!
//! This is the single source of truth for which care emphases apply to a
//! patient. Every contribution is an additive integer gated on profile
//! fields, and every gate and weight is a named constant below. Nothing
//! else in the crate re-scores axes; downstream consumers work from the
//! [`AxisEvaluation`] records this module produces.

use serde::{Deserialize, Serialize};

use crate::profile::{EpisodeType, PatientNeedsProfile};

use super::ScenarioAxis;

// ─── Selection policy constants ──────────────────────────────────────────

/// An axis applies when its total score reaches this floor.
pub const AXIS_SCORE_THRESHOLD: i32 = 40;
/// Balanced is always applicable at this fixed score, so at least one
/// candidate exists for every patient.
pub const BALANCED_SCORE: i32 = 50;

// Recovery & rehabilitation
const REHAB_POTENTIAL_MIN: u8 = 3;
const REHAB_POTENTIAL_POINTS: i32 = 40;
const REHAB_HOSPITALIZATION_POINTS: i32 = 20;
const REHAB_EPISODE_POINTS: i32 = 15;
const REHAB_MOBILITY_POINTS: i32 = 10;

// Safety & stability
const SAFETY_FALLS_MODERATE_MIN: u8 = 2;
const SAFETY_FALLS_MODERATE_POINTS: i32 = 25;
const SAFETY_FALLS_HIGH_MIN: u8 = 3;
const SAFETY_FALLS_HIGH_POINTS: i32 = 20;
const SAFETY_RECENT_FALL_POINTS: i32 = 15;
const SAFETY_HAZARD_MIN: u8 = 3;
const SAFETY_HAZARD_POINTS: i32 = 15;
const SAFETY_ALONE_POINTS: i32 = 15;
const SAFETY_INSTABILITY_MIN: u8 = 3;
const SAFETY_INSTABILITY_POINTS: i32 = 10;
const SAFETY_ULCER_MIN: u8 = 3;
const SAFETY_ULCER_POINTS: i32 = 10;

// Technology-enabled
const TECH_READINESS_MIN: u8 = 3;
const TECH_READINESS_POINTS: i32 = 30;
const TECH_DEVICES_POINTS: i32 = 20;
const TECH_VIDEO_POINTS: i32 = 15;
const TECH_RURAL_POINTS: i32 = 15;
const TECH_INTERNET_POINTS: i32 = 10;
const TECH_MONITORABLE_INSTABILITY: std::ops::RangeInclusive<u8> = 1..=3;
const TECH_MONITORABLE_POINTS: i32 = 10;

// Caregiver relief
const RELIEF_STRESS_MIN: u8 = 3;
const RELIEF_STRESS_POINTS: i32 = 35;
const RELIEF_STRESS_HIGH_MIN: u8 = 4;
const RELIEF_STRESS_HIGH_POINTS: i32 = 15;
const RELIEF_BURDEN_ADL_MIN: u8 = 3;
const RELIEF_BURDEN_POINTS: i32 = 20;
const RELIEF_BEHAVIOUR_POINTS: i32 = 15;

// Medical-intensive
const MEDICAL_INSTABILITY_MIN: u8 = 3;
const MEDICAL_INSTABILITY_POINTS: i32 = 35;
const MEDICAL_INSTABILITY_HIGH_MIN: u8 = 4;
const MEDICAL_INSTABILITY_HIGH_POINTS: i32 = 15;
const MEDICAL_EXTENSIVE_POINTS: i32 = 40;
const MEDICAL_TREATMENT_POINTS: i32 = 15;
const MEDICAL_HOSPITALIZATION_POINTS: i32 = 10;
const MEDICAL_SWALLOWING_POINTS: i32 = 10;

// Cognitive & behavioural support
const COGNITIVE_COMPLEXITY_MIN: u8 = 3;
const COGNITIVE_COMPLEXITY_POINTS: i32 = 35;
const COGNITIVE_COMPLEXITY_HIGH_MIN: u8 = 4;
const COGNITIVE_COMPLEXITY_HIGH_POINTS: i32 = 15;
const COGNITIVE_WANDERING_POINTS: i32 = 25;
const COGNITIVE_BEHAVIOUR_POINTS: i32 = 20;
const COGNITIVE_MOOD_POINTS: i32 = 10;
const COGNITIVE_COMMUNICATION_MIN: u8 = 3;
const COGNITIVE_COMMUNICATION_POINTS: i32 = 10;

// Community-integrated
const COMMUNITY_ALONE_POINTS: i32 = 20;
const COMMUNITY_THIN_NETWORK_MAX: u8 = 2;
const COMMUNITY_THIN_NETWORK_POINTS: i32 = 20;
const COMMUNITY_MOOD_POINTS: i32 = 15;
const COMMUNITY_ABLE_MAX: u8 = 2;
const COMMUNITY_ABLE_POINTS: i32 = 15;

/// Outcome of scoring one axis against a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisEvaluation {
    pub axis: ScenarioAxis,
    pub score: i32,
    pub reasons: Vec<String>,
    pub applicable: bool,
}

/// Scores every axis in a fixed order. Balanced is last and always
/// applicable.
pub fn detailed_evaluation(profile: &PatientNeedsProfile) -> Vec<AxisEvaluation> {
    ScenarioAxis::ALL
        .iter()
        .map(|&axis| evaluate_axis(axis, profile))
        .collect()
}

/// Ranked applicable axes, best first, at most `max_axes`. Ties keep the
/// evaluation order (the sort is stable).
pub fn applicable_axes(profile: &PatientNeedsProfile, max_axes: usize) -> Vec<ScenarioAxis> {
    let mut candidates: Vec<AxisEvaluation> = detailed_evaluation(profile)
        .into_iter()
        .filter(|evaluation| evaluation.applicable)
        .collect();
    candidates.sort_by(|a, b| b.score.cmp(&a.score));
    candidates.truncate(max_axes);
    candidates.into_iter().map(|evaluation| evaluation.axis).collect()
}

fn evaluate_axis(axis: ScenarioAxis, profile: &PatientNeedsProfile) -> AxisEvaluation {
    let (score, reasons) = match axis {
        ScenarioAxis::RecoveryRehab => score_recovery_rehab(profile),
        ScenarioAxis::SafetyStability => score_safety_stability(profile),
        ScenarioAxis::TechEnabled => score_tech_enabled(profile),
        ScenarioAxis::CaregiverRelief => score_caregiver_relief(profile),
        ScenarioAxis::MedicalIntensive => score_medical_intensive(profile),
        ScenarioAxis::CognitiveSupport => score_cognitive_support(profile),
        ScenarioAxis::CommunityIntegrated => score_community_integrated(profile),
        ScenarioAxis::Balanced => (
            BALANCED_SCORE,
            vec!["A balanced option is offered to every patient".to_string()],
        ),
    };

    let applicable = axis == ScenarioAxis::Balanced || score >= AXIS_SCORE_THRESHOLD;
    AxisEvaluation {
        axis,
        score,
        reasons,
        applicable,
    }
}

fn score_recovery_rehab(profile: &PatientNeedsProfile) -> (i32, Vec<String>) {
    let mut score = 0;
    let mut reasons = Vec::new();

    if profile.functional.rehab_potential >= REHAB_POTENTIAL_MIN {
        score += REHAB_POTENTIAL_POINTS;
        reasons.push(format!(
            "Rehabilitation potential rated {} of 5",
            profile.functional.rehab_potential
        ));
    }
    if profile.clinical.recent_hospitalization {
        score += REHAB_HOSPITALIZATION_POINTS;
        reasons.push("Recently discharged from hospital".to_string());
    }
    if profile.episode_type == EpisodeType::ShortStayRecovery {
        score += REHAB_EPISODE_POINTS;
        reasons.push("Short-stay recovery episode".to_string());
    }
    if (1..=3).contains(&profile.functional.mobility_level) {
        score += REHAB_MOBILITY_POINTS;
        reasons.push("Mobility impairment amenable to therapy".to_string());
    }

    (score, reasons)
}

fn score_safety_stability(profile: &PatientNeedsProfile) -> (i32, Vec<String>) {
    let mut score = 0;
    let mut reasons = Vec::new();

    if profile.functional.falls_risk_level >= SAFETY_FALLS_MODERATE_MIN {
        score += SAFETY_FALLS_MODERATE_POINTS;
        reasons.push(format!(
            "Falls risk rated {} of 5",
            profile.functional.falls_risk_level
        ));
    }
    if profile.functional.falls_risk_level >= SAFETY_FALLS_HIGH_MIN {
        score += SAFETY_FALLS_HIGH_POINTS;
        reasons.push("High falls risk warrants structured supervision".to_string());
    }
    if profile.functional.recent_fall {
        score += SAFETY_RECENT_FALL_POINTS;
        reasons.push("Fall recorded in the recent history".to_string());
    }
    if profile.environment.home_safety_level >= SAFETY_HAZARD_MIN {
        score += SAFETY_HAZARD_POINTS;
        reasons.push("Home environment carries hazards".to_string());
    }
    if profile.support.lives_alone && !profile.support.caregiver_available {
        score += SAFETY_ALONE_POINTS;
        reasons.push("Lives alone without an available caregiver".to_string());
    }
    if profile.clinical.health_instability >= SAFETY_INSTABILITY_MIN {
        score += SAFETY_INSTABILITY_POINTS;
        reasons.push("Health instability adds supervision need".to_string());
    }
    if profile.clinical.pressure_ulcer_risk >= SAFETY_ULCER_MIN {
        score += SAFETY_ULCER_POINTS;
        reasons.push("Elevated pressure ulcer risk".to_string());
    }

    (score, reasons)
}

fn score_tech_enabled(profile: &PatientNeedsProfile) -> (i32, Vec<String>) {
    let mut score = 0;
    let mut reasons = Vec::new();

    if profile.technology.tech_readiness_level >= TECH_READINESS_MIN {
        score += TECH_READINESS_POINTS;
        reasons.push("Comfortable with technology".to_string());
    }
    if profile.technology.uses_monitoring_devices {
        score += TECH_DEVICES_POINTS;
        reasons.push("Already uses monitoring devices".to_string());
    }
    if profile.technology.comfortable_with_video {
        score += TECH_VIDEO_POINTS;
        reasons.push("Comfortable with video visits".to_string());
    }
    if profile.environment.rural_isolated {
        score += TECH_RURAL_POINTS;
        reasons.push("Remote location favours virtual care".to_string());
    }
    if profile.technology.has_internet {
        score += TECH_INTERNET_POINTS;
        reasons.push("Reliable internet at home".to_string());
    }
    if TECH_MONITORABLE_INSTABILITY.contains(&profile.clinical.health_instability) {
        score += TECH_MONITORABLE_POINTS;
        reasons.push("Condition suited to remote monitoring".to_string());
    }

    (score, reasons)
}

fn score_caregiver_relief(profile: &PatientNeedsProfile) -> (i32, Vec<String>) {
    let mut score = 0;
    let mut reasons = Vec::new();

    // Without a caregiver in the picture there is nobody to relieve.
    if !profile.support.caregiver_available {
        return (score, reasons);
    }

    if profile.support.caregiver_stress_level >= RELIEF_STRESS_MIN {
        score += RELIEF_STRESS_POINTS;
        reasons.push(format!(
            "Caregiver stress rated {} of 5",
            profile.support.caregiver_stress_level
        ));
    }
    if profile.support.caregiver_stress_level >= RELIEF_STRESS_HIGH_MIN {
        score += RELIEF_STRESS_HIGH_POINTS;
        reasons.push("Caregiver at risk of burnout".to_string());
    }
    if profile.functional.adl_support_level >= RELIEF_BURDEN_ADL_MIN {
        score += RELIEF_BURDEN_POINTS;
        reasons.push("Heavy daily care burden falls on the caregiver".to_string());
    }
    if profile.cognitive.behavioural_symptoms {
        score += RELIEF_BEHAVIOUR_POINTS;
        reasons.push("Responsive behaviours add to caregiver load".to_string());
    }

    (score, reasons)
}

fn score_medical_intensive(profile: &PatientNeedsProfile) -> (i32, Vec<String>) {
    let mut score = 0;
    let mut reasons = Vec::new();

    if profile.clinical.health_instability >= MEDICAL_INSTABILITY_MIN {
        score += MEDICAL_INSTABILITY_POINTS;
        reasons.push(format!(
            "Health instability rated {} of 5",
            profile.clinical.health_instability
        ));
    }
    if profile.clinical.health_instability >= MEDICAL_INSTABILITY_HIGH_MIN {
        score += MEDICAL_INSTABILITY_HIGH_POINTS;
        reasons.push("Condition requires close clinical oversight".to_string());
    }
    if profile.treatment.requires_extensive_services {
        score += MEDICAL_EXTENSIVE_POINTS;
        reasons.push("Extensive clinical services required".to_string());
    }
    if profile.treatment.wound_care
        || profile.treatment.oxygen_therapy
        || profile.treatment.injection_support
        || profile.treatment.catheter_care
    {
        score += MEDICAL_TREATMENT_POINTS;
        reasons.push("Active clinical treatments delivered at home".to_string());
    }
    if profile.clinical.recent_hospitalization {
        score += MEDICAL_HOSPITALIZATION_POINTS;
        reasons.push("Recent hospitalization".to_string());
    }
    if profile.clinical.swallowing_difficulty {
        score += MEDICAL_SWALLOWING_POINTS;
        reasons.push("Swallowing difficulty needs clinical management".to_string());
    }

    (score, reasons)
}

fn score_cognitive_support(profile: &PatientNeedsProfile) -> (i32, Vec<String>) {
    let mut score = 0;
    let mut reasons = Vec::new();

    if profile.cognitive.cognitive_complexity >= COGNITIVE_COMPLEXITY_MIN {
        score += COGNITIVE_COMPLEXITY_POINTS;
        reasons.push(format!(
            "Cognitive complexity rated {} of 5",
            profile.cognitive.cognitive_complexity
        ));
    }
    if profile.cognitive.cognitive_complexity >= COGNITIVE_COMPLEXITY_HIGH_MIN {
        score += COGNITIVE_COMPLEXITY_HIGH_POINTS;
        reasons.push("Advanced cognitive impairment".to_string());
    }
    if profile.cognitive.wandering_risk {
        score += COGNITIVE_WANDERING_POINTS;
        reasons.push("Wandering risk identified".to_string());
    }
    if profile.cognitive.behavioural_symptoms {
        score += COGNITIVE_BEHAVIOUR_POINTS;
        reasons.push("Responsive behaviours present".to_string());
    }
    if profile.cognitive.mood_decline {
        score += COGNITIVE_MOOD_POINTS;
        reasons.push("Mood decline noted".to_string());
    }
    if profile.cognitive.communication_level >= COGNITIVE_COMMUNICATION_MIN {
        score += COGNITIVE_COMMUNICATION_POINTS;
        reasons.push("Communication difficulties".to_string());
    }

    (score, reasons)
}

fn score_community_integrated(profile: &PatientNeedsProfile) -> (i32, Vec<String>) {
    let mut score = 0;
    let mut reasons = Vec::new();

    if profile.support.lives_alone {
        score += COMMUNITY_ALONE_POINTS;
        reasons.push("Lives alone".to_string());
    }
    if profile.support.social_support_level <= COMMUNITY_THIN_NETWORK_MAX {
        score += COMMUNITY_THIN_NETWORK_POINTS;
        reasons.push("Thin social support network".to_string());
    }
    if profile.cognitive.mood_decline {
        score += COMMUNITY_MOOD_POINTS;
        reasons.push("Mood decline noted".to_string());
    }
    if profile.cognitive.cognitive_complexity <= COMMUNITY_ABLE_MAX
        && profile.functional.adl_support_level <= COMMUNITY_ABLE_MAX
    {
        score += COMMUNITY_ABLE_POINTS;
        reasons.push("Well enough to take part in community programs".to_string());
    }

    (score, reasons)
}
