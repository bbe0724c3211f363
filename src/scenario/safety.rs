//! Clinical safety review of an assembled service bundle.
//!
//! Each check runs independently and appends its finding, so one gap
//! never masks another. Errors mark the bundle unsafe to recommend as
//! composed; warnings flag gaps a coordinator should look at.

use crate::profile::PatientNeedsProfile;

use super::types::{SafetyCheck, SafetyFinding, SafetyReview, ServiceCategory, ServiceLine};

const NURSING_REQUIRED_INSTABILITY: u8 = 3;
const FALLS_MITIGATION_MIN_RISK: u8 = 2;
const SUPERVISION_MIN_COMPLEXITY: u8 = 4;
const HIGH_ADL_MIN: u8 = 4;
const HIGH_ADL_MIN_WEEKLY_HOURS: f64 = 10.0;

const FALLS_MITIGATING: [ServiceCategory; 4] = [
    ServiceCategory::Nursing,
    ServiceCategory::Physiotherapy,
    ServiceCategory::OccupationalTherapy,
    ServiceCategory::RemoteMonitoring,
];

const SUPERVISION_CAPABLE: [ServiceCategory; 4] = [
    ServiceCategory::PersonalSupport,
    ServiceCategory::Nursing,
    ServiceCategory::Respite,
    ServiceCategory::DayProgram,
];

/// Runs every safety check against the proposed service lines.
pub fn review_bundle(profile: &PatientNeedsProfile, lines: &[ServiceLine]) -> SafetyReview {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if profile.clinical.health_instability >= NURSING_REQUIRED_INSTABILITY
        && !has_any(lines, &[ServiceCategory::Nursing])
    {
        errors.push(SafetyFinding {
            check: SafetyCheck::NursingCoverage,
            message: format!(
                "Health instability {} of 5 requires scheduled nursing coverage",
                profile.clinical.health_instability
            ),
        });
    }

    if profile.treatment.requires_extensive_services
        && !has_any(lines, &[ServiceCategory::Nursing])
    {
        errors.push(SafetyFinding {
            check: SafetyCheck::ExtensiveServices,
            message: "Extensive clinical treatments are documented but no nursing service is scheduled".to_string(),
        });
    }

    if profile.functional.falls_risk_level >= FALLS_MITIGATION_MIN_RISK
        && !has_any(lines, &FALLS_MITIGATING)
    {
        warnings.push(SafetyFinding {
            check: SafetyCheck::FallsMitigation,
            message: format!(
                "Falls risk {} of 5 with no therapy, nursing or monitoring service to mitigate it",
                profile.functional.falls_risk_level
            ),
        });
    }

    if profile.cognitive.cognitive_complexity >= SUPERVISION_MIN_COMPLEXITY
        && !has_any(lines, &SUPERVISION_CAPABLE)
    {
        warnings.push(SafetyFinding {
            check: SafetyCheck::CognitiveSupervision,
            message: format!(
                "Cognitive complexity {} of 5 with no service able to provide supervision",
                profile.cognitive.cognitive_complexity
            ),
        });
    }

    if profile.functional.adl_support_level >= HIGH_ADL_MIN {
        let weekly_hours = lines.iter().map(ServiceLine::weekly_minutes).sum::<f64>() / 60.0;
        if weekly_hours < HIGH_ADL_MIN_WEEKLY_HOURS {
            warnings.push(SafetyFinding {
                check: SafetyCheck::SupportHours,
                message: format!(
                    "ADL support level {} of 5 but only {:.1} scheduled hours per week",
                    profile.functional.adl_support_level, weekly_hours
                ),
            });
        }
    }

    SafetyReview {
        passed: errors.is_empty(),
        errors,
        warnings,
    }
}

fn has_any(lines: &[ServiceLine], categories: &[ServiceCategory]) -> bool {
    lines.iter().any(|line| categories.contains(&line.category))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axes::ScenarioAxis;
    use crate::scenario::types::{
        DeliveryMode, Discipline, FrequencyPeriod, ServicePriority,
    };
    use uuid::Uuid;

    fn line(category: ServiceCategory, per_week: u32, minutes: u32) -> ServiceLine {
        ServiceLine {
            category,
            name: format!("{category} service"),
            billing_code: None,
            frequency: per_week,
            period: FrequencyPeriod::Week,
            duration_minutes: minutes,
            discipline: Discipline::PersonalSupportWorker,
            delivery_mode: DeliveryMode::InPerson,
            cost_per_visit: 65.0,
            weekly_cost: 0.0,
            priority: ServicePriority::Core,
            safety_critical: false,
            rationale: String::new(),
            supports_goal: String::new(),
            contributes_to: ScenarioAxis::Balanced,
        }
    }

    fn stable_profile() -> PatientNeedsProfile {
        PatientNeedsProfile::minimal(Uuid::new_v4())
    }

    // ====== CLEAN BUNDLES ======

    #[test]
    fn stable_profile_passes_with_any_lines() {
        let review = review_bundle(
            &stable_profile(),
            &[line(ServiceCategory::Homemaking, 1, 120)],
        );

        assert!(review.passed);
        assert!(review.errors.is_empty());
        assert!(review.warnings.is_empty());
    }

    #[test]
    fn nursing_satisfies_instability_requirement() {
        let mut profile = stable_profile();
        profile.clinical.health_instability = 4;

        let review = review_bundle(&profile, &[line(ServiceCategory::Nursing, 3, 60)]);

        assert!(review.passed);
        assert!(review.errors.is_empty());
    }

    // ====== ERRORS ======

    #[test]
    fn unstable_health_without_nursing_is_an_error() {
        let mut profile = stable_profile();
        profile.clinical.health_instability = 3;

        let review = review_bundle(&profile, &[line(ServiceCategory::PersonalSupport, 5, 45)]);

        assert!(!review.passed);
        assert_eq!(review.errors.len(), 1);
        assert_eq!(review.errors[0].check, SafetyCheck::NursingCoverage);
    }

    #[test]
    fn extensive_services_without_nursing_is_an_error() {
        let mut profile = stable_profile();
        profile.treatment.requires_extensive_services = true;

        let review = review_bundle(&profile, &[line(ServiceCategory::PersonalSupport, 5, 45)]);

        assert!(!review.passed);
        assert!(review
            .errors
            .iter()
            .any(|f| f.check == SafetyCheck::ExtensiveServices));
    }

    // ====== WARNINGS ======

    #[test]
    fn falls_risk_without_mitigation_is_a_warning() {
        let mut profile = stable_profile();
        profile.functional.falls_risk_level = 3;

        let review = review_bundle(&profile, &[line(ServiceCategory::Homemaking, 1, 120)]);

        assert!(review.passed);
        assert_eq!(review.warnings.len(), 1);
        assert_eq!(review.warnings[0].check, SafetyCheck::FallsMitigation);
    }

    #[test]
    fn remote_monitoring_counts_as_falls_mitigation() {
        let mut profile = stable_profile();
        profile.functional.falls_risk_level = 3;

        let review = review_bundle(&profile, &[line(ServiceCategory::RemoteMonitoring, 7, 10)]);

        assert!(review.warnings.is_empty());
    }

    #[test]
    fn high_cognitive_complexity_without_supervision_is_a_warning() {
        let mut profile = stable_profile();
        profile.cognitive.cognitive_complexity = 4;

        let review = review_bundle(&profile, &[line(ServiceCategory::Physiotherapy, 2, 45)]);

        assert!(review.passed);
        assert!(review
            .warnings
            .iter()
            .any(|f| f.check == SafetyCheck::CognitiveSupervision));
    }

    #[test]
    fn thin_hours_for_heavy_adl_needs_is_a_warning() {
        let mut profile = stable_profile();
        profile.functional.adl_support_level = 5;

        // 3 visits x 45 min = 2.25 hours per week.
        let review = review_bundle(&profile, &[line(ServiceCategory::PersonalSupport, 3, 45)]);

        assert!(review
            .warnings
            .iter()
            .any(|f| f.check == SafetyCheck::SupportHours));
    }

    #[test]
    fn ample_hours_for_heavy_adl_needs_is_clean() {
        let mut profile = stable_profile();
        profile.functional.adl_support_level = 5;

        // Daily 90 minute visits: 10.5 hours per week.
        let review = review_bundle(&profile, &[line(ServiceCategory::PersonalSupport, 7, 90)]);

        assert!(review.warnings.is_empty());
    }

    // ====== INDEPENDENCE ======

    #[test]
    fn findings_accumulate_across_checks() {
        let mut profile = stable_profile();
        profile.clinical.health_instability = 4;
        profile.functional.falls_risk_level = 3;
        profile.cognitive.cognitive_complexity = 5;
        profile.functional.adl_support_level = 4;

        let review = review_bundle(&profile, &[line(ServiceCategory::Nutrition, 1, 30)]);

        assert!(!review.passed);
        assert_eq!(review.errors.len(), 1);
        assert_eq!(review.warnings.len(), 3);
    }
}
