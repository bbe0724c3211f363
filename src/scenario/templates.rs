//! Base service template resolution.
//!
//! Resolution chain: exact case-mix group, then case-mix category, then
//! the category implied by the needs cluster, then the store's default
//! template, and finally a built-in service set derived from profile
//! thresholds. The chain cannot come back empty, so generation always
//! has something to build on. A store failure at any step logs and
//! falls through to the next.

use crate::profile::{NeedsCluster, PatientNeedsProfile};
use crate::stores::{ServiceTemplate, TemplateService, TemplateStore};

use super::types::{
    DeliveryMode, Discipline, FrequencyPeriod, ServiceCategory, ServicePriority,
};

const FALLBACK_TEMPLATE_ID: &str = "builtin-essential";

// Thresholds for the built-in service set.
const NURSING_INSTABILITY_MIN: u8 = 2;
const NURSING_FREQUENT_INSTABILITY_MIN: u8 = 4;
const HOMEMAKING_IADL_MIN: u8 = 2;
const THERAPY_REHAB_MIN: u8 = 3;
const THERAPY_FALLS_MIN: u8 = 2;
const MONITORING_FALLS_MIN: u8 = 2;
const MONITORING_INSTABILITY_MIN: u8 = 2;
const SOCIAL_SUPPORT_THIN_MAX: u8 = 1;

/// Walks the resolution chain and returns the first template that
/// matches the profile's classification.
pub fn resolve_base_template(
    profile: &PatientNeedsProfile,
    store: &dyn TemplateStore,
) -> ServiceTemplate {
    if let Some(group) = &profile.case_mix_group {
        match store.template_for_group(group) {
            Ok(Some(template)) => {
                tracing::debug!(group = %group, template = %template.template_id, "Template matched by case-mix group");
                return template;
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("Template lookup by group failed: {e}"),
        }
    }

    if let Some(category) = &profile.case_mix_category {
        match store.template_for_category(category) {
            Ok(Some(template)) => {
                tracing::debug!(category = %category, template = %template.template_id, "Template matched by case-mix category");
                return template;
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("Template lookup by category failed: {e}"),
        }
    }

    if let Some(category) = cluster_category(profile.needs_cluster) {
        match store.template_for_category(category) {
            Ok(Some(template)) => {
                tracing::debug!(category = category, template = %template.template_id, "Template matched by needs cluster");
                return template;
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("Template lookup by cluster failed: {e}"),
        }
    }

    match store.default_template() {
        Ok(Some(template)) => {
            tracing::debug!(template = %template.template_id, "Store default template used");
            return template;
        }
        Ok(None) => {}
        Err(e) => tracing::warn!("Default template lookup failed: {e}"),
    }

    tracing::info!("No stored template matched; using built-in service set");
    builtin_template(profile)
}

/// Case-mix category a needs cluster maps onto for template lookup.
/// The stable cluster has no category of its own and goes straight to
/// the default template.
fn cluster_category(cluster: NeedsCluster) -> Option<&'static str> {
    match cluster {
        NeedsCluster::Rehabilitation => Some("Rehabilitation"),
        NeedsCluster::MedicalComplex => Some("Clinically Complex"),
        NeedsCluster::CognitiveBehavioural => Some("Impaired Cognition"),
        NeedsCluster::PhysicalAssist => Some("Reduced Physical Function"),
        NeedsCluster::Stable => None,
    }
}

/// Last-resort service set assembled directly from profile thresholds.
pub fn builtin_template(profile: &PatientNeedsProfile) -> ServiceTemplate {
    let mut services = Vec::new();

    // Personal support anchors every fallback plan.
    let psw_frequency = match profile.functional.adl_support_level {
        4..=5 => 7,
        3 => 5,
        1..=2 => 3,
        _ => 2,
    };
    services.push(TemplateService {
        category: ServiceCategory::PersonalSupport,
        name: "Personal support visit".to_string(),
        billing_code: None,
        frequency: psw_frequency,
        period: FrequencyPeriod::Week,
        duration_minutes: 45,
        discipline: Discipline::PersonalSupportWorker,
        delivery_mode: DeliveryMode::InPerson,
        priority: ServicePriority::Core,
        safety_critical: profile.functional.adl_support_level >= 4,
        rationale: "Assistance with daily activities and routine supervision".to_string(),
        goal: "independence".to_string(),
    });

    let clinical_treatments = profile.treatment.wound_care
        || profile.treatment.oxygen_therapy
        || profile.treatment.injection_support
        || profile.treatment.catheter_care;
    if profile.clinical.health_instability >= NURSING_INSTABILITY_MIN
        || profile.treatment.requires_extensive_services
        || clinical_treatments
    {
        let frequency =
            if profile.clinical.health_instability >= NURSING_FREQUENT_INSTABILITY_MIN {
                3
            } else {
                2
            };
        services.push(TemplateService {
            category: ServiceCategory::Nursing,
            name: "Nursing visit".to_string(),
            billing_code: None,
            frequency,
            period: FrequencyPeriod::Week,
            duration_minutes: 60,
            discipline: Discipline::RegisteredNurse,
            delivery_mode: DeliveryMode::InPerson,
            priority: ServicePriority::Core,
            safety_critical: true,
            rationale: "Clinical monitoring, medication oversight and treatments".to_string(),
            goal: "clinical_stability".to_string(),
        });
    }

    if profile.functional.rehab_potential >= THERAPY_REHAB_MIN
        || profile.functional.falls_risk_level >= THERAPY_FALLS_MIN
    {
        services.push(TemplateService {
            category: ServiceCategory::Physiotherapy,
            name: "Physiotherapy session".to_string(),
            billing_code: None,
            frequency: 1,
            period: FrequencyPeriod::Week,
            duration_minutes: 45,
            discipline: Discipline::Physiotherapist,
            delivery_mode: DeliveryMode::InPerson,
            priority: ServicePriority::Recommended,
            safety_critical: false,
            rationale: "Strength and balance work to reduce fall risk".to_string(),
            goal: "regain_mobility".to_string(),
        });
    }

    if profile.functional.iadl_support_level >= HOMEMAKING_IADL_MIN
        || profile.support.lives_alone
    {
        services.push(TemplateService {
            category: ServiceCategory::Homemaking,
            name: "Homemaking support".to_string(),
            billing_code: None,
            frequency: 1,
            period: FrequencyPeriod::Week,
            duration_minutes: 120,
            discipline: Discipline::PersonalSupportWorker,
            delivery_mode: DeliveryMode::InPerson,
            priority: ServicePriority::Recommended,
            safety_critical: false,
            rationale: "Household upkeep the patient can no longer manage alone".to_string(),
            goal: "safe_home".to_string(),
        });
    }

    if profile.functional.falls_risk_level >= MONITORING_FALLS_MIN
        || profile.clinical.health_instability >= MONITORING_INSTABILITY_MIN
    {
        services.push(TemplateService {
            category: ServiceCategory::RemoteMonitoring,
            name: "Daily wellness check".to_string(),
            billing_code: None,
            frequency: 1,
            period: FrequencyPeriod::Day,
            duration_minutes: 10,
            discipline: Discipline::TelehealthNurse,
            delivery_mode: DeliveryMode::Automated,
            priority: ServicePriority::Recommended,
            safety_critical: false,
            rationale: "Early warning between in-person visits".to_string(),
            goal: "early_warning".to_string(),
        });
    }

    if profile.cognitive.mood_decline
        || profile.support.social_support_level <= SOCIAL_SUPPORT_THIN_MAX
    {
        services.push(TemplateService {
            category: ServiceCategory::SocialWork,
            name: "Social work consultation".to_string(),
            billing_code: None,
            frequency: 1,
            period: FrequencyPeriod::Month,
            duration_minutes: 60,
            discipline: Discipline::SocialWorker,
            delivery_mode: DeliveryMode::InPerson,
            priority: ServicePriority::Optional,
            safety_critical: false,
            rationale: "Mood support and connection to community resources".to_string(),
            goal: "mood_support".to_string(),
        });
    }

    ServiceTemplate {
        template_id: FALLBACK_TEMPLATE_ID.to_string(),
        name: "Essential Home Support".to_string(),
        case_mix_groups: Vec::new(),
        case_mix_categories: Vec::new(),
        services,
    }
}
