use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::PROFILE_SCHEMA_VERSION;
use crate::enums::str_enum;
use crate::profile::fields::REQUIRED_EXTENDED_FIELDS;
use crate::stores::StoreError;

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("Assessment store failure: {0}")]
    Store(#[from] StoreError),

    #[error("No usable assessment data on file for patient")]
    NoData,
}

str_enum!(ProfileSource {
    HomeCare => "home_care",
    Contact => "contact",
    BehaviouralScreener => "behavioural_screener",
    Referral => "referral",
});

str_enum!(ConfidenceLevel {
    Low => "low",
    Medium => "medium",
    High => "high",
});

str_enum!(
    /// Coarse grouping used for template resolution when no case-mix
    /// classification is on file.
    NeedsCluster {
        Rehabilitation => "rehabilitation",
        MedicalComplex => "medical_complex",
        CognitiveBehavioural => "cognitive_behavioural",
        PhysicalAssist => "physical_assist",
        Stable => "stable",
    }
);

str_enum!(EpisodeType {
    ShortStayRecovery => "short_stay_recovery",
    LongStayChronic => "long_stay_chronic",
    Maintenance => "maintenance",
    Unclassified => "unclassified",
});

/// Whether a source contributed to the profile, and when it was taken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceMark {
    pub contributed: bool,
    pub assessed_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceProvenance {
    pub home_care: SourceMark,
    pub contact: SourceMark,
    pub behavioural_screener: SourceMark,
    pub referral: SourceMark,
}

impl SourceProvenance {
    pub fn mark(&mut self, source: ProfileSource, assessed_on: Option<NaiveDate>) {
        let mark = SourceMark {
            contributed: true,
            assessed_on,
        };
        match source {
            ProfileSource::HomeCare => self.home_care = mark,
            ProfileSource::Contact => self.contact = mark,
            ProfileSource::BehaviouralScreener => self.behavioural_screener = mark,
            ProfileSource::Referral => self.referral = mark,
        }
    }

    pub fn contributing_sources(&self) -> Vec<ProfileSource> {
        [
            (ProfileSource::HomeCare, self.home_care),
            (ProfileSource::Contact, self.contact),
            (ProfileSource::BehaviouralScreener, self.behavioural_screener),
            (ProfileSource::Referral, self.referral),
        ]
        .into_iter()
        .filter(|(_, mark)| mark.contributed)
        .map(|(source, _)| source)
        .collect()
    }
}

// Sub-profiles. Severity scales run 0..=5; every field defaults to
// 0/false so downstream scoring never branches on absence.

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionalProfile {
    pub adl_support_level: u8,
    pub iadl_support_level: u8,
    pub mobility_level: u8,
    pub falls_risk_level: u8,
    pub rehab_potential: u8,
    pub uses_mobility_aid: bool,
    pub recent_fall: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CognitiveProfile {
    pub cognitive_complexity: u8,
    pub communication_level: u8,
    pub wandering_risk: bool,
    pub behavioural_symptoms: bool,
    pub mood_decline: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClinicalRiskProfile {
    pub health_instability: u8,
    pub pain_level: u8,
    pub pressure_ulcer_risk: u8,
    pub recent_hospitalization: bool,
    pub swallowing_difficulty: bool,
    pub active_conditions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TreatmentProfile {
    pub requires_extensive_services: bool,
    pub extensive_services: Vec<String>,
    pub wound_care: bool,
    pub oxygen_therapy: bool,
    pub injection_support: bool,
    pub catheter_care: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupportProfile {
    pub caregiver_available: bool,
    pub lives_alone: bool,
    pub caregiver_stress_level: u8,
    pub social_support_level: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TechnologyProfile {
    pub tech_readiness_level: u8,
    pub has_internet: bool,
    pub uses_monitoring_devices: bool,
    pub comfortable_with_video: bool,
}

/// Home environment. `home_safety_level` is a hazard scale: higher means
/// a more dangerous home.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentProfile {
    pub home_safety_level: u8,
    pub stairs_present: bool,
    pub bathroom_adapted: bool,
    pub rural_isolated: bool,
}

/// The unified needs profile handed to axis selection and generation.
///
/// Built once from merged sources and read-only afterward. Downstream
/// stages never see a partially constructed profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientNeedsProfile {
    pub patient_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub schema_version: u32,

    pub provenance: SourceProvenance,
    pub completeness: f32,
    pub confidence: ConfidenceLevel,
    pub quality_notes: Vec<String>,
    pub missing_fields: Vec<String>,

    pub case_mix_group: Option<String>,
    pub case_mix_category: Option<String>,
    pub case_mix_rank: i32,
    pub needs_cluster: NeedsCluster,
    pub episode_type: EpisodeType,

    pub functional: FunctionalProfile,
    pub cognitive: CognitiveProfile,
    pub clinical: ClinicalRiskProfile,
    pub treatment: TreatmentProfile,
    pub support: SupportProfile,
    pub technology: TechnologyProfile,
    pub environment: EnvironmentProfile,
}

impl PatientNeedsProfile {
    /// All-defaults fallback profile. Downstream generation must never
    /// block on missing clinical data, so profile building fails soft
    /// into this.
    pub fn minimal(patient_id: Uuid) -> Self {
        Self {
            patient_id,
            generated_at: Utc::now(),
            schema_version: PROFILE_SCHEMA_VERSION,
            provenance: SourceProvenance::default(),
            completeness: 0.0,
            confidence: ConfidenceLevel::Low,
            quality_notes: vec![
                "No usable assessment data on file; default profile applied".to_string(),
            ],
            missing_fields: REQUIRED_EXTENDED_FIELDS
                .iter()
                .map(|key| key.to_string())
                .collect(),
            case_mix_group: None,
            case_mix_category: None,
            case_mix_rank: 0,
            needs_cluster: NeedsCluster::Stable,
            episode_type: EpisodeType::Unclassified,
            functional: FunctionalProfile::default(),
            cognitive: CognitiveProfile::default(),
            clinical: ClinicalRiskProfile::default(),
            treatment: TreatmentProfile::default(),
            support: SupportProfile::default(),
            technology: TechnologyProfile::default(),
            environment: EnvironmentProfile::default(),
        }
    }
}
