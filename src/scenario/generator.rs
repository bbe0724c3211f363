//! Scenario bundle generation.
//!
//! One bundle per applicable axis, each built from the same base
//! template with that axis's category modifiers applied, costed against
//! the rate store, annotated and safety-reviewed. Generation is
//! infallible: template resolution bottoms out in a built-in service
//! set and store failures degrade with a warning, so a caller always
//! gets a usable bundle list.

use std::sync::Arc;

use uuid::Uuid;

use crate::axes::{applicable_axes, detailed_evaluation, AxisEvaluation, ScenarioAxis};
use crate::config::CostConfig;
use crate::cost;
use crate::profile::PatientNeedsProfile;
use crate::stores::{RateStore, ServiceTemplate, TemplateService, TemplateStore};

use super::safety::review_bundle;
use super::templates::resolve_base_template;
use super::types::{
    BundleProvenance, CostSummary, GenerationOptions, GenerationSource, OperationalMetrics,
    SafetyReview, ScenarioBundle, ServiceLine, ServicePriority,
};

/// Axes used to top up the list when too few score applicable,
/// in fill order.
const FILL_AXES: [ScenarioAxis; 3] = [
    ScenarioAxis::SafetyStability,
    ScenarioAxis::TechEnabled,
    ScenarioAxis::CaregiverRelief,
];

const MAX_BENEFITS: usize = 4;

pub struct ScenarioGenerator {
    templates: Arc<dyn TemplateStore>,
    rates: Arc<dyn RateStore>,
    cost: CostConfig,
}

impl ScenarioGenerator {
    pub fn new(
        templates: Arc<dyn TemplateStore>,
        rates: Arc<dyn RateStore>,
        cost: CostConfig,
    ) -> Self {
        Self {
            templates,
            rates,
            cost,
        }
    }

    /// Builds the ordered bundle list for one profile. Item 0 is always
    /// the recommended scenario.
    pub fn generate(
        &self,
        profile: &PatientNeedsProfile,
        options: &GenerationOptions,
    ) -> Vec<ScenarioBundle> {
        // 1. Base service template for this patient's classification.
        let base = resolve_base_template(profile, self.templates.as_ref());

        // 2. Ranked applicable axes. Balanced is handled separately and
        //    gets a reserved slot when requested.
        let evaluations = detailed_evaluation(profile);
        let mut ranked: Vec<ScenarioAxis> = applicable_axes(profile, ScenarioAxis::ALL.len())
            .into_iter()
            .filter(|&axis| axis != ScenarioAxis::Balanced)
            .collect();
        let axis_budget = options
            .max_scenarios
            .saturating_sub(options.include_balanced as usize);
        ranked.truncate(axis_budget);

        // 3. One scenario per ranked axis, best axis first.
        let mut bundles: Vec<ScenarioBundle> = ranked
            .iter()
            .map(|&axis| self.build_scenario(profile, &base, axis, &evaluations, &ranked))
            .collect();

        // 4. The balanced scenario rides along last, unmodified.
        if options.include_balanced {
            bundles.push(self.build_scenario(
                profile,
                &base,
                ScenarioAxis::Balanced,
                &evaluations,
                &ranked,
            ));
        }

        // 5. Top up from the fill list when below the minimum.
        let mut used: Vec<ScenarioAxis> = bundles.iter().map(|b| b.primary_axis).collect();
        for axis in FILL_AXES {
            if bundles.len() >= options.min_scenarios {
                break;
            }
            if used.contains(&axis) {
                continue;
            }
            bundles.push(self.build_scenario(profile, &base, axis, &evaluations, &ranked));
            used.push(axis);
        }

        // 6. Display order, and exactly one recommended flag on item 0.
        let bundles: Vec<ScenarioBundle> = bundles
            .into_iter()
            .enumerate()
            .map(|(index, bundle)| {
                bundle
                    .with_display_order(index as u32)
                    .with_recommended(index == 0)
            })
            .collect();

        tracing::info!(
            patient_id = %profile.patient_id,
            template = %base.template_id,
            scenarios = bundles.len(),
            "Generated scenario bundles"
        );
        bundles
    }

    fn build_scenario(
        &self,
        profile: &PatientNeedsProfile,
        base: &ServiceTemplate,
        axis: ScenarioAxis,
        evaluations: &[AxisEvaluation],
        ranked: &[ScenarioAxis],
    ) -> ScenarioBundle {
        let meta = axis.profile();

        let service_lines: Vec<ServiceLine> = base
            .services
            .iter()
            .map(|service| self.costed_line(service, axis))
            .collect();

        // Applicable axes whose emphasis overlaps this one.
        let secondary_axes: Vec<ScenarioAxis> = ranked
            .iter()
            .copied()
            .filter(|&other| other != axis)
            .filter(|other| {
                other
                    .profile()
                    .emphasized_categories
                    .iter()
                    .any(|category| meta.emphasized_categories.contains(category))
            })
            .collect();

        let mut benefits: Vec<String> = Vec::new();
        for line in service_lines
            .iter()
            .filter(|line| line.priority != ServicePriority::Optional)
        {
            if !line.rationale.is_empty() && !benefits.contains(&line.rationale) {
                benefits.push(line.rationale.clone());
            }
        }
        benefits.truncate(MAX_BENEFITS);

        let mut goals_supported: Vec<String> =
            meta.goal_tags.iter().map(|goal| goal.to_string()).collect();
        for line in &service_lines {
            if !line.supports_goal.is_empty() && !goals_supported.contains(&line.supports_goal) {
                goals_supported.push(line.supports_goal.clone());
            }
        }

        let risks_addressed = evaluations
            .iter()
            .find(|evaluation| evaluation.axis == axis)
            .map(|evaluation| evaluation.reasons.clone())
            .unwrap_or_default();

        let bundle = ScenarioBundle {
            scenario_id: Uuid::new_v4(),
            patient_id: profile.patient_id,
            primary_axis: axis,
            secondary_axes,
            title: format!("{} {}", meta.icon, meta.label),
            subtitle: meta.tradeoff.to_string(),
            description: meta.description.to_string(),
            service_lines,
            cost: CostSummary::default(),
            metrics: OperationalMetrics::default(),
            benefits,
            goals_supported,
            risks_addressed,
            safety: SafetyReview::default(),
            provenance: BundleProvenance {
                source: GenerationSource::RuleEngine,
                confidence: profile.confidence,
                notes: vec![format!("Base template: {}", base.name)],
            },
            explanation: None,
            display_order: 0,
            recommended: false,
        };

        let bundle = cost::annotate(bundle, &self.cost);
        let review = review_bundle(profile, &bundle.service_lines);
        bundle.with_safety_review(review)
    }

    /// Applies the axis modifier for the service's category and prices
    /// the line against the rate store.
    fn costed_line(&self, service: &TemplateService, axis: ScenarioAxis) -> ServiceLine {
        let modifier = axis
            .profile()
            .modifiers
            .iter()
            .find(|m| m.category == service.category);

        let frequency = match modifier {
            Some(m) => scaled_frequency(service.frequency, m.frequency_multiplier),
            None => service.frequency,
        };
        let priority = match modifier.and_then(|m| m.promote_to) {
            Some(promoted) if outranks(promoted, service.priority) => promoted,
            _ => service.priority,
        };

        let rate = match self.rates.visit_rate(service.category) {
            Ok(Some(rate)) => rate,
            Ok(None) => self.cost.default_visit_rate,
            Err(e) => {
                tracing::warn!(category = %service.category, "Rate lookup failed, using default rate: {e}");
                self.cost.default_visit_rate
            }
        };
        let weekly_cost = service.period.weekly_visits(frequency) * rate;

        ServiceLine {
            category: service.category,
            name: service.name.clone(),
            billing_code: service.billing_code.clone(),
            frequency,
            period: service.period,
            duration_minutes: service.duration_minutes,
            discipline: service.discipline,
            delivery_mode: service.delivery_mode,
            cost_per_visit: rate,
            weekly_cost,
            priority,
            safety_critical: service.safety_critical,
            rationale: service.rationale.clone(),
            supports_goal: service.goal.clone(),
            contributes_to: axis,
        }
    }
}

/// Frequency scaling always rounds to the nearest count and never drops
/// below one visit.
fn scaled_frequency(frequency: u32, multiplier: f64) -> u32 {
    ((frequency as f64 * multiplier).round() as u32).max(1)
}

fn outranks(candidate: ServicePriority, current: ServicePriority) -> bool {
    priority_rank(candidate) > priority_rank(current)
}

fn priority_rank(priority: ServicePriority) -> u8 {
    match priority {
        ServicePriority::Core => 2,
        ServicePriority::Recommended => 1,
        ServicePriority::Optional => 0,
    }
}
