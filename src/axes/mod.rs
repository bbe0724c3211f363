//! Scenario axes: the closed set of care emphases a bundle can lean
//! into, with their fixed domain metadata.
//!
//! Axis metadata is curated clinical knowledge, not derived at runtime.
//! The scoring policy that decides which axes apply to a patient lives
//! in [`selector`].

pub mod selector;

pub use selector::{applicable_axes, detailed_evaluation, AxisEvaluation};

use crate::enums::str_enum;
use crate::scenario::{ServiceCategory, ServicePriority};

str_enum!(ScenarioAxis {
    RecoveryRehab => "recovery_rehab",
    SafetyStability => "safety_stability",
    TechEnabled => "tech_enabled",
    CaregiverRelief => "caregiver_relief",
    MedicalIntensive => "medical_intensive",
    CognitiveSupport => "cognitive_support",
    CommunityIntegrated => "community_integrated",
    Balanced => "balanced",
});

/// Frequency / priority adjustment an axis applies to one service
/// category during generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryModifier {
    pub category: ServiceCategory,
    pub frequency_multiplier: f64,
    pub promote_to: Option<ServicePriority>,
}

/// Static metadata for one axis.
#[derive(Debug)]
pub struct AxisProfile {
    pub label: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    pub tradeoff: &'static str,
    pub goal_tags: &'static [&'static str],
    pub emphasized_categories: &'static [ServiceCategory],
    pub modifiers: &'static [CategoryModifier],
}

impl ScenarioAxis {
    /// Evaluation order. Also the tie-break order when axes score equal.
    pub const ALL: [ScenarioAxis; 8] = [
        ScenarioAxis::RecoveryRehab,
        ScenarioAxis::SafetyStability,
        ScenarioAxis::TechEnabled,
        ScenarioAxis::CaregiverRelief,
        ScenarioAxis::MedicalIntensive,
        ScenarioAxis::CognitiveSupport,
        ScenarioAxis::CommunityIntegrated,
        ScenarioAxis::Balanced,
    ];

    pub fn profile(&self) -> &'static AxisProfile {
        match self {
            ScenarioAxis::RecoveryRehab => &RECOVERY_REHAB,
            ScenarioAxis::SafetyStability => &SAFETY_STABILITY,
            ScenarioAxis::TechEnabled => &TECH_ENABLED,
            ScenarioAxis::CaregiverRelief => &CAREGIVER_RELIEF,
            ScenarioAxis::MedicalIntensive => &MEDICAL_INTENSIVE,
            ScenarioAxis::CognitiveSupport => &COGNITIVE_SUPPORT,
            ScenarioAxis::CommunityIntegrated => &COMMUNITY_INTEGRATED,
            ScenarioAxis::Balanced => &BALANCED,
        }
    }

    pub fn label(&self) -> &'static str {
        self.profile().label
    }
}

static RECOVERY_REHAB: AxisProfile = AxisProfile {
    label: "Recovery & Rehabilitation",
    icon: "🏃",
    description: "Therapy-forward plan aimed at regaining strength, mobility \
                  and day-to-day independence after an acute event.",
    tradeoff: "Higher therapy intensity asks more energy and scheduling \
               commitment from the patient and family.",
    goal_tags: &["regain_mobility", "independence", "strength_building"],
    emphasized_categories: &[
        ServiceCategory::Physiotherapy,
        ServiceCategory::OccupationalTherapy,
    ],
    modifiers: &[
        CategoryModifier {
            category: ServiceCategory::Physiotherapy,
            frequency_multiplier: 1.5,
            promote_to: Some(ServicePriority::Core),
        },
        CategoryModifier {
            category: ServiceCategory::OccupationalTherapy,
            frequency_multiplier: 1.5,
            promote_to: Some(ServicePriority::Core),
        },
        CategoryModifier {
            category: ServiceCategory::PersonalSupport,
            frequency_multiplier: 0.8,
            promote_to: None,
        },
    ],
};

static SAFETY_STABILITY: AxisProfile = AxisProfile {
    label: "Safety & Stability",
    icon: "🛡️",
    description: "Supervision-heavy plan that hardens the home routine \
                  against falls, missed medications and silent decline.",
    tradeoff: "More in-person oversight means more visits and less privacy \
               than a lighter-touch plan.",
    goal_tags: &["fall_prevention", "safe_home", "stay_at_home"],
    emphasized_categories: &[
        ServiceCategory::Nursing,
        ServiceCategory::PersonalSupport,
        ServiceCategory::RemoteMonitoring,
    ],
    modifiers: &[
        CategoryModifier {
            category: ServiceCategory::Nursing,
            frequency_multiplier: 1.3,
            promote_to: Some(ServicePriority::Core),
        },
        CategoryModifier {
            category: ServiceCategory::PersonalSupport,
            frequency_multiplier: 1.3,
            promote_to: Some(ServicePriority::Core),
        },
        CategoryModifier {
            category: ServiceCategory::RemoteMonitoring,
            frequency_multiplier: 1.2,
            promote_to: None,
        },
        CategoryModifier {
            category: ServiceCategory::Homemaking,
            frequency_multiplier: 1.2,
            promote_to: None,
        },
    ],
};

static TECH_ENABLED: AxisProfile = AxisProfile {
    label: "Technology-Enabled Care",
    icon: "📡",
    description: "Remote monitoring and virtual visits carry the routine \
                  load, with in-person services reserved for hands-on care.",
    tradeoff: "Fewer in-person visits; depends on reliable connectivity and \
               comfort with devices.",
    goal_tags: &["independence", "early_warning", "fewer_visits"],
    emphasized_categories: &[ServiceCategory::RemoteMonitoring],
    modifiers: &[
        CategoryModifier {
            category: ServiceCategory::RemoteMonitoring,
            frequency_multiplier: 1.5,
            promote_to: Some(ServicePriority::Core),
        },
        CategoryModifier {
            category: ServiceCategory::Nursing,
            frequency_multiplier: 0.8,
            promote_to: None,
        },
        CategoryModifier {
            category: ServiceCategory::PersonalSupport,
            frequency_multiplier: 0.9,
            promote_to: None,
        },
    ],
};

static CAREGIVER_RELIEF: AxisProfile = AxisProfile {
    label: "Caregiver Relief",
    icon: "🤝",
    description: "Respite and day programming scheduled to keep the family \
                  caregiver sustainable for the long run.",
    tradeoff: "Part of the weekly schedule goes to relief services rather \
               than direct clinical care for the patient.",
    goal_tags: &["caregiver_sustainability", "respite", "shared_care"],
    emphasized_categories: &[
        ServiceCategory::Respite,
        ServiceCategory::DayProgram,
        ServiceCategory::Homemaking,
    ],
    modifiers: &[
        CategoryModifier {
            category: ServiceCategory::Respite,
            frequency_multiplier: 1.5,
            promote_to: Some(ServicePriority::Core),
        },
        CategoryModifier {
            category: ServiceCategory::DayProgram,
            frequency_multiplier: 1.4,
            promote_to: Some(ServicePriority::Recommended),
        },
        CategoryModifier {
            category: ServiceCategory::Homemaking,
            frequency_multiplier: 1.2,
            promote_to: None,
        },
    ],
};

static MEDICAL_INTENSIVE: AxisProfile = AxisProfile {
    label: "Medical-Intensive Support",
    icon: "🩺",
    description: "Clinical oversight comes first: frequent nursing, tight \
                  symptom control and early escalation paths.",
    tradeoff: "Clinically heavy plans concentrate visits on nursing and \
               leave less room for comfort services.",
    goal_tags: &["clinical_stability", "avoid_readmission", "symptom_control"],
    emphasized_categories: &[ServiceCategory::Nursing, ServiceCategory::Nutrition],
    modifiers: &[
        CategoryModifier {
            category: ServiceCategory::Nursing,
            frequency_multiplier: 1.6,
            promote_to: Some(ServicePriority::Core),
        },
        CategoryModifier {
            category: ServiceCategory::Nutrition,
            frequency_multiplier: 1.2,
            promote_to: Some(ServicePriority::Recommended),
        },
    ],
};

static COGNITIVE_SUPPORT: AxisProfile = AxisProfile {
    label: "Cognitive & Behavioural Support",
    icon: "🧠",
    description: "Structured supervision and engagement for memory loss, \
                  wandering and responsive behaviours.",
    tradeoff: "Consistent routines and supervision reduce flexibility in \
               the weekly schedule.",
    goal_tags: &["orientation", "behaviour_management", "family_education"],
    emphasized_categories: &[
        ServiceCategory::PersonalSupport,
        ServiceCategory::DayProgram,
        ServiceCategory::SocialWork,
    ],
    modifiers: &[
        CategoryModifier {
            category: ServiceCategory::PersonalSupport,
            frequency_multiplier: 1.4,
            promote_to: Some(ServicePriority::Core),
        },
        CategoryModifier {
            category: ServiceCategory::DayProgram,
            frequency_multiplier: 1.3,
            promote_to: Some(ServicePriority::Recommended),
        },
        CategoryModifier {
            category: ServiceCategory::SocialWork,
            frequency_multiplier: 1.2,
            promote_to: None,
        },
    ],
};

static COMMUNITY_INTEGRATED: AxisProfile = AxisProfile {
    label: "Community-Integrated Living",
    icon: "🏘️",
    description: "Day programs and social services rebuild connection for \
                  patients at risk of isolation.",
    tradeoff: "Relies on getting out of the home; transportation and energy \
               on program days become the limiting factor.",
    goal_tags: &["social_connection", "community_participation", "mood_support"],
    emphasized_categories: &[ServiceCategory::DayProgram, ServiceCategory::SocialWork],
    modifiers: &[
        CategoryModifier {
            category: ServiceCategory::DayProgram,
            frequency_multiplier: 1.5,
            promote_to: Some(ServicePriority::Core),
        },
        CategoryModifier {
            category: ServiceCategory::SocialWork,
            frequency_multiplier: 1.3,
            promote_to: None,
        },
        CategoryModifier {
            category: ServiceCategory::Homemaking,
            frequency_multiplier: 1.1,
            promote_to: None,
        },
    ],
};

static BALANCED: AxisProfile = AxisProfile {
    label: "Balanced Care",
    icon: "⚖️",
    description: "Even coverage across clinical, personal and household \
                  needs without leaning into any single emphasis.",
    tradeoff: "Covers every base moderately rather than excelling at one.",
    goal_tags: &["overall_wellbeing", "flexibility"],
    emphasized_categories: &[],
    modifiers: &[],
};
