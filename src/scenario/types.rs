//! Scenario bundle value types.
//!
//! Bundles are immutable values: every "update" produces a new bundle
//! with the changed field, so scenarios stay comparable, loggable and
//! replayable without aliasing surprises.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::axes::ScenarioAxis;
use crate::enums::str_enum;
use crate::explain::ScenarioExplanation;
use crate::profile::ConfidenceLevel;

/// Average weeks per month used to normalize monthly frequencies.
pub const WEEKS_PER_MONTH: f64 = 4.33;

str_enum!(ServiceCategory {
    Nursing => "nursing",
    PersonalSupport => "personal_support",
    Physiotherapy => "physiotherapy",
    OccupationalTherapy => "occupational_therapy",
    RemoteMonitoring => "remote_monitoring",
    Homemaking => "homemaking",
    Respite => "respite",
    SocialWork => "social_work",
    Nutrition => "nutrition",
    DayProgram => "day_program",
});

str_enum!(Discipline {
    RegisteredNurse => "registered_nurse",
    PersonalSupportWorker => "personal_support_worker",
    Physiotherapist => "physiotherapist",
    OccupationalTherapist => "occupational_therapist",
    SocialWorker => "social_worker",
    Dietitian => "dietitian",
    RecreationTherapist => "recreation_therapist",
    TelehealthNurse => "telehealth_nurse",
});

str_enum!(FrequencyPeriod {
    Day => "day",
    Week => "week",
    Month => "month",
});

impl FrequencyPeriod {
    /// Normalizes a frequency count to visits per week.
    pub fn weekly_visits(&self, frequency: u32) -> f64 {
        match self {
            FrequencyPeriod::Day => frequency as f64 * 7.0,
            FrequencyPeriod::Week => frequency as f64,
            FrequencyPeriod::Month => frequency as f64 / WEEKS_PER_MONTH,
        }
    }
}

str_enum!(DeliveryMode {
    InPerson => "in_person",
    Virtual => "virtual",
    Automated => "automated",
});

str_enum!(ServicePriority {
    Core => "core",
    Recommended => "recommended",
    Optional => "optional",
});

str_enum!(CostStatus {
    WithinCap => "within_cap",
    NearCap => "near_cap",
    OverCap => "over_cap",
});

str_enum!(GenerationSource {
    RuleEngine => "rule_engine",
});

str_enum!(SafetyCheck {
    NursingCoverage => "nursing_coverage",
    FallsMitigation => "falls_mitigation",
    CognitiveSupervision => "cognitive_supervision",
    ExtensiveServices => "extensive_services",
    SupportHours => "support_hours",
});

/// One clinical or support service within a bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceLine {
    pub category: ServiceCategory,
    pub name: String,
    pub billing_code: Option<String>,
    pub frequency: u32,
    pub period: FrequencyPeriod,
    pub duration_minutes: u32,
    pub discipline: Discipline,
    pub delivery_mode: DeliveryMode,
    pub cost_per_visit: f64,
    pub weekly_cost: f64,
    pub priority: ServicePriority,
    pub safety_critical: bool,
    pub rationale: String,
    pub supports_goal: String,
    pub contributes_to: ScenarioAxis,
}

impl ServiceLine {
    pub fn weekly_visits(&self) -> f64 {
        self.period.weekly_visits(self.frequency)
    }

    pub fn weekly_minutes(&self) -> f64 {
        self.weekly_visits() * self.duration_minutes as f64
    }
}

/// Cost aggregates for a bundle, including the patient-facing narrative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostSummary {
    pub weekly_cost: f64,
    pub reference_cap: f64,
    pub cap_utilization_pct: f64,
    pub status: CostStatus,
    pub narrative: String,
}

impl Default for CostSummary {
    fn default() -> Self {
        Self {
            weekly_cost: 0.0,
            reference_cap: 0.0,
            cap_utilization_pct: 0.0,
            status: CostStatus::WithinCap,
            narrative: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperationalMetrics {
    pub total_weekly_hours: f64,
    pub total_weekly_visits: f64,
    pub in_person_pct: f64,
    pub virtual_pct: f64,
    pub discipline_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyFinding {
    pub check: SafetyCheck,
    pub message: String,
}

/// Outcome of the safety validation pass. `passed` is false only when a
/// hard error was found; warnings ride along without failing the bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyReview {
    pub passed: bool,
    pub errors: Vec<SafetyFinding>,
    pub warnings: Vec<SafetyFinding>,
}

impl Default for SafetyReview {
    fn default() -> Self {
        Self {
            passed: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleProvenance {
    pub source: GenerationSource,
    pub confidence: ConfidenceLevel,
    pub notes: Vec<String>,
}

/// A full care-bundle recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioBundle {
    pub scenario_id: Uuid,
    pub patient_id: Uuid,
    pub primary_axis: ScenarioAxis,
    pub secondary_axes: Vec<ScenarioAxis>,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub service_lines: Vec<ServiceLine>,
    pub cost: CostSummary,
    pub metrics: OperationalMetrics,
    pub benefits: Vec<String>,
    pub goals_supported: Vec<String>,
    pub risks_addressed: Vec<String>,
    pub safety: SafetyReview,
    pub provenance: BundleProvenance,
    pub explanation: Option<ScenarioExplanation>,
    pub display_order: u32,
    pub recommended: bool,
}

impl ScenarioBundle {
    pub fn with_cost(self, cost: CostSummary) -> Self {
        Self { cost, ..self }
    }

    pub fn with_metrics(self, metrics: OperationalMetrics) -> Self {
        Self { metrics, ..self }
    }

    pub fn with_safety_review(self, safety: SafetyReview) -> Self {
        Self { safety, ..self }
    }

    pub fn with_display_order(self, display_order: u32) -> Self {
        Self {
            display_order,
            ..self
        }
    }

    pub fn with_recommended(self, recommended: bool) -> Self {
        Self {
            recommended,
            ..self
        }
    }

    pub fn with_explanation(self, explanation: ScenarioExplanation) -> Self {
        Self {
            explanation: Some(explanation),
            ..self
        }
    }
}

/// Knobs for one generation run.
#[derive(Debug, Clone, Copy)]
pub struct GenerationOptions {
    pub min_scenarios: usize,
    pub max_scenarios: usize,
    pub include_balanced: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            min_scenarios: 3,
            max_scenarios: 5,
            include_balanced: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_line() -> ServiceLine {
        ServiceLine {
            category: ServiceCategory::Nursing,
            name: "Nursing visit".to_string(),
            billing_code: Some("NUR-01".to_string()),
            frequency: 2,
            period: FrequencyPeriod::Week,
            duration_minutes: 60,
            discipline: Discipline::RegisteredNurse,
            delivery_mode: DeliveryMode::InPerson,
            cost_per_visit: 120.0,
            weekly_cost: 240.0,
            priority: ServicePriority::Core,
            safety_critical: true,
            rationale: "Medication and wound oversight".to_string(),
            supports_goal: "clinical_stability".to_string(),
            contributes_to: ScenarioAxis::MedicalIntensive,
        }
    }

    fn sample_bundle() -> ScenarioBundle {
        ScenarioBundle {
            scenario_id: Uuid::new_v4(),
            patient_id: Uuid::new_v4(),
            primary_axis: ScenarioAxis::MedicalIntensive,
            secondary_axes: vec![ScenarioAxis::SafetyStability],
            title: "Medical-Intensive Support".to_string(),
            subtitle: "Clinical oversight first".to_string(),
            description: "Frequent nursing with tight symptom control".to_string(),
            service_lines: vec![sample_line()],
            cost: CostSummary::default(),
            metrics: OperationalMetrics::default(),
            benefits: vec!["Fewer emergency visits".to_string()],
            goals_supported: vec!["clinical_stability".to_string()],
            risks_addressed: vec!["readmission".to_string()],
            safety: SafetyReview::default(),
            provenance: BundleProvenance {
                source: GenerationSource::RuleEngine,
                confidence: ConfidenceLevel::High,
                notes: Vec::new(),
            },
            explanation: None,
            display_order: 0,
            recommended: false,
        }
    }

    // ====== Frequency normalization ======

    #[test]
    fn daily_frequency_multiplies_by_seven() {
        assert_eq!(FrequencyPeriod::Day.weekly_visits(1), 7.0);
        assert_eq!(FrequencyPeriod::Day.weekly_visits(2), 14.0);
    }

    #[test]
    fn weekly_frequency_passes_through() {
        assert_eq!(FrequencyPeriod::Week.weekly_visits(3), 3.0);
    }

    #[test]
    fn monthly_frequency_divides_by_average_weeks() {
        let weekly = FrequencyPeriod::Month.weekly_visits(2);
        assert!((weekly - 2.0 / 4.33).abs() < 1e-9);
    }

    #[test]
    fn weekly_minutes_follow_visits() {
        let line = sample_line();
        assert_eq!(line.weekly_visits(), 2.0);
        assert_eq!(line.weekly_minutes(), 120.0);
    }

    // ====== Immutable updates ======

    #[test]
    fn with_cost_changes_only_cost() {
        let bundle = sample_bundle();
        let original = bundle.clone();

        let annotated = bundle.with_cost(CostSummary {
            weekly_cost: 240.0,
            reference_cap: 1050.0,
            cap_utilization_pct: 22.9,
            status: CostStatus::WithinCap,
            narrative: "Comfortably within the reference budget".to_string(),
        });

        assert_eq!(annotated.scenario_id, original.scenario_id);
        assert_eq!(annotated.service_lines, original.service_lines);
        assert_eq!(annotated.safety, original.safety);
        assert_eq!(annotated.display_order, original.display_order);
        assert_ne!(annotated.cost, original.cost);
    }

    #[test]
    fn with_recommended_and_order_are_independent() {
        let bundle = sample_bundle();
        let reordered = bundle.clone().with_display_order(2).with_recommended(true);

        assert_eq!(reordered.display_order, 2);
        assert!(reordered.recommended);
        assert_eq!(reordered.title, bundle.title);
        assert_eq!(reordered.cost, bundle.cost);
    }

    #[test]
    fn default_safety_review_passes_clean() {
        let review = SafetyReview::default();
        assert!(review.passed);
        assert!(review.errors.is_empty());
        assert!(review.warnings.is_empty());
    }

    #[test]
    fn status_tags_are_stable() {
        assert_eq!(CostStatus::WithinCap.as_str(), "within_cap");
        assert_eq!(CostStatus::NearCap.as_str(), "near_cap");
        assert_eq!(CostStatus::OverCap.as_str(), "over_cap");
        assert_eq!(GenerationSource::RuleEngine.as_str(), "rule_engine");
    }
}
