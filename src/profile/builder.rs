//! Needs-profile construction: fetch, merge, derive, cache.
//!
//! The public surface fails soft. Downstream scenario generation must
//! never block on missing clinical data, so any internal failure
//! degrades to a minimal default profile instead of propagating.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::assessments::AssessmentSnapshot;
use crate::config::IngestionConfig;
use crate::stores::{AssessmentStore, ProfileCache};

use super::derive::{
    derive_confidence, derive_episode_type, derive_needs_cluster, derive_rehab_potential,
};
use super::fields::*;
use super::mappers::{default_mappers, AssessmentMapper};
use super::types::{
    ClinicalRiskProfile, CognitiveProfile, EnvironmentProfile, FunctionalProfile,
    PatientNeedsProfile, ProfileError, ProfileSource, SourceProvenance, SupportProfile,
    TechnologyProfile, TreatmentProfile,
};

const LOW_COMPLETENESS_NOTE_THRESHOLD: f32 = 0.5;

pub fn profile_cache_key(patient_id: Uuid) -> String {
    format!("needs_profile:{patient_id}")
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileBuildOptions {
    /// Skip the cache read and overwrite whatever is cached.
    pub force_refresh: bool,
}

/// Builds unified needs profiles from whatever assessment data is on
/// file, most trusted source first.
pub struct NeedsProfileService {
    store: Arc<dyn AssessmentStore>,
    cache: Arc<dyn ProfileCache>,
    mappers: Vec<Box<dyn AssessmentMapper>>,
    config: IngestionConfig,
}

impl NeedsProfileService {
    pub fn new(
        store: Arc<dyn AssessmentStore>,
        cache: Arc<dyn ProfileCache>,
        config: IngestionConfig,
    ) -> Self {
        Self {
            store,
            cache,
            mappers: default_mappers(),
            config,
        }
    }

    /// Infallible build. Serves from cache within the TTL unless
    /// `force_refresh` is set; degrades to a minimal profile on any
    /// internal failure.
    pub fn build_profile(
        &self,
        patient_id: Uuid,
        options: &ProfileBuildOptions,
    ) -> PatientNeedsProfile {
        let cache_key = profile_cache_key(patient_id);

        if !options.force_refresh {
            match self.cache.get(&cache_key) {
                Ok(Some(cached)) => {
                    tracing::debug!(patient_id = %patient_id, "Needs profile served from cache");
                    return cached;
                }
                Ok(None) => {}
                Err(e) => tracing::warn!("Profile cache read failed: {e}"),
            }
        }

        let profile = match self.try_build(patient_id) {
            Ok(profile) => profile,
            Err(ProfileError::NoData) => {
                tracing::info!(patient_id = %patient_id, "No assessment data; minimal profile");
                PatientNeedsProfile::minimal(patient_id)
            }
            Err(e) => {
                tracing::warn!("Profile build failed, using minimal default: {e}");
                PatientNeedsProfile::minimal(patient_id)
            }
        };

        if let Err(e) = self
            .cache
            .put(&cache_key, profile.clone(), self.config.cache_ttl)
        {
            tracing::warn!("Profile cache write failed: {e}");
        }

        profile
    }

    /// Drops the cached profile so the next build recomputes. Called when
    /// source data for the patient changes.
    pub fn invalidate(&self, patient_id: Uuid) {
        if let Err(e) = self.cache.forget(&profile_cache_key(patient_id)) {
            tracing::warn!("Profile cache invalidation failed: {e}");
        }
    }

    fn try_build(&self, patient_id: Uuid) -> Result<PatientNeedsProfile, ProfileError> {
        // Step 1: latest record per source type, then drop stale ones.
        let snapshot = self.fetch_snapshot(patient_id)?;
        let today = Utc::now().date_naive();
        let snapshot = snapshot.without_stale(today, self.config.recency_cutoff_days);
        if snapshot.is_empty() {
            return Err(ProfileError::NoData);
        }

        // Step 2: merge sources in priority order.
        let mut draft = ProfileDraft::new();
        let mut provenance = SourceProvenance::default();
        let mut primary_contributed = false;
        for mapper in &self.mappers {
            let Some(mapped) = mapper.map(&snapshot) else {
                continue;
            };
            let applied = draft.apply(mapper.weight(), mapper.mode(), &mapped.fields);
            if applied > 0 {
                provenance.mark(mapper.source(), mapped.assessed_on);
                if mapper.source() == ProfileSource::HomeCare {
                    primary_contributed = true;
                }
                tracing::debug!(
                    source = %mapper.source(),
                    fields = applied,
                    "Assessment source merged"
                );
            }
        }

        // Step 3: case-mix fallback from the standalone classification.
        // Optional lookup, so a failure here must not sink the build.
        let mut case_mix_group = draft.text(CASE_MIX_GROUP);
        let mut case_mix_category = draft.text(CASE_MIX_CATEGORY);
        let mut case_mix_rank = draft.int(CASE_MIX_RANK) as i32;
        if case_mix_group.is_none() {
            match self.store.case_mix_classification(patient_id) {
                Ok(Some(classification)) => {
                    tracing::debug!(
                        group = %classification.group,
                        "Standalone case-mix classification applied"
                    );
                    case_mix_group = Some(classification.group);
                    case_mix_category = Some(classification.category);
                    case_mix_rank = classification.rank;
                }
                Ok(None) => {}
                Err(e) => tracing::warn!("Case-mix classification fetch failed: {e}"),
            }
        }

        // Step 4: assemble sub-profiles from the merged draft.
        let mut functional = FunctionalProfile {
            adl_support_level: draft.level(ADL_SUPPORT_LEVEL),
            iadl_support_level: draft.level(IADL_SUPPORT_LEVEL),
            mobility_level: draft.level(MOBILITY_LEVEL),
            falls_risk_level: draft.level(FALLS_RISK_LEVEL),
            rehab_potential: draft.level(REHAB_POTENTIAL),
            uses_mobility_aid: draft.flag(USES_MOBILITY_AID),
            recent_fall: draft.flag(RECENT_FALL),
        };
        let cognitive = CognitiveProfile {
            cognitive_complexity: draft.level(COGNITIVE_COMPLEXITY),
            communication_level: draft.level(COMMUNICATION_LEVEL),
            wandering_risk: draft.flag(WANDERING_RISK),
            behavioural_symptoms: draft.flag(BEHAVIOURAL_SYMPTOMS),
            mood_decline: draft.flag(MOOD_DECLINE),
        };
        let clinical = ClinicalRiskProfile {
            health_instability: draft.level(HEALTH_INSTABILITY),
            pain_level: draft.level(PAIN_LEVEL),
            pressure_ulcer_risk: draft.level(PRESSURE_ULCER_RISK),
            recent_hospitalization: draft.flag(RECENT_HOSPITALIZATION),
            swallowing_difficulty: draft.flag(SWALLOWING_DIFFICULTY),
            active_conditions: draft.list(ACTIVE_CONDITIONS),
        };
        let treatment = TreatmentProfile {
            requires_extensive_services: draft.flag(REQUIRES_EXTENSIVE_SERVICES),
            extensive_services: draft.list(EXTENSIVE_SERVICES),
            wound_care: draft.flag(WOUND_CARE),
            oxygen_therapy: draft.flag(OXYGEN_THERAPY),
            injection_support: draft.flag(INJECTION_SUPPORT),
            catheter_care: draft.flag(CATHETER_CARE),
        };
        let support = SupportProfile {
            caregiver_available: draft.flag(CAREGIVER_AVAILABLE),
            lives_alone: draft.flag(LIVES_ALONE),
            caregiver_stress_level: draft.level(CAREGIVER_STRESS_LEVEL),
            social_support_level: draft.level(SOCIAL_SUPPORT_LEVEL),
        };
        let technology = TechnologyProfile {
            tech_readiness_level: draft.level(TECH_READINESS_LEVEL),
            has_internet: draft.flag(HAS_INTERNET),
            uses_monitoring_devices: draft.flag(USES_MONITORING_DEVICES),
            comfortable_with_video: draft.flag(COMFORTABLE_WITH_VIDEO),
        };
        let environment = EnvironmentProfile {
            home_safety_level: draft.level(HOME_SAFETY_LEVEL),
            stairs_present: draft.flag(STAIRS_PRESENT),
            bathroom_adapted: draft.flag(BATHROOM_ADAPTED),
            rural_isolated: draft.flag(RURAL_ISOLATED),
        };

        // Step 5: derived attributes against the merged field set.
        if functional.rehab_potential == 0 {
            functional.rehab_potential =
                derive_rehab_potential(&functional, &clinical, snapshot.referral.as_ref());
        }
        let needs_cluster = derive_needs_cluster(&functional, &cognitive, &clinical, &treatment);
        let episode_type =
            derive_episode_type(&functional, &clinical, &treatment, snapshot.referral.as_ref());
        let confidence = derive_confidence(draft.max_weight(), primary_contributed);

        // Step 6: completeness, missing fields, quality notes.
        let completeness =
            draft.populated_count(&REQUIRED_CORE_FIELDS) as f32 / REQUIRED_CORE_FIELDS.len() as f32;
        let missing_fields = draft.missing(&REQUIRED_EXTENDED_FIELDS);

        let mut quality_notes = Vec::new();
        if !provenance.home_care.contributed {
            quality_notes.push(
                "No full home-care assessment on file; profile built from secondary sources"
                    .to_string(),
            );
        }
        if completeness < LOW_COMPLETENESS_NOTE_THRESHOLD {
            quality_notes.push("Fewer than half of the core fields are populated".to_string());
        }

        tracing::info!(
            patient_id = %patient_id,
            completeness = completeness,
            confidence = %confidence,
            cluster = %needs_cluster,
            "Needs profile built"
        );

        Ok(PatientNeedsProfile {
            patient_id,
            generated_at: Utc::now(),
            schema_version: crate::config::PROFILE_SCHEMA_VERSION,
            provenance,
            completeness,
            confidence,
            quality_notes,
            missing_fields,
            case_mix_group,
            case_mix_category,
            case_mix_rank,
            needs_cluster,
            episode_type,
            functional,
            cognitive,
            clinical,
            treatment,
            support,
            technology,
            environment,
        })
    }

    /// A referral is optional context, so its fetch failure is swallowed;
    /// the other source reads propagate into the fail-soft catch.
    fn fetch_snapshot(&self, patient_id: Uuid) -> Result<AssessmentSnapshot, ProfileError> {
        let home_care = self.store.latest_home_care(patient_id)?;
        let contact = self.store.latest_contact(patient_id)?;
        let screener = self.store.latest_screener(patient_id)?;
        let referral = match self.store.latest_referral(patient_id) {
            Ok(referral) => referral,
            Err(e) => {
                tracing::warn!("Referral fetch failed, continuing without: {e}");
                None
            }
        };

        Ok(AssessmentSnapshot {
            patient_id,
            home_care,
            contact,
            screener,
            referral,
        })
    }
}
