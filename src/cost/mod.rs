//! Cost and operational annotation for service bundles.
//!
//! Everything here is a pure function over service lines. The reference
//! cap is a soft weekly benchmark used for narrative framing only; it
//! never blocks or trims a bundle. Annotation returns a new bundle
//! value, the input is left untouched.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::axes::ScenarioAxis;
use crate::config::CostConfig;
use crate::scenario::{
    CostStatus, CostSummary, Discipline, OperationalMetrics, ScenarioBundle, ServiceCategory,
    ServiceLine,
};

/// Weekly cost across all lines. A line's pre-computed weekly cost is
/// trusted when set; otherwise it is derived from visits and rate.
pub fn total_weekly_cost(lines: &[ServiceLine]) -> f64 {
    round2(lines.iter().map(line_weekly_cost).sum())
}

fn line_weekly_cost(line: &ServiceLine) -> f64 {
    if line.weekly_cost > 0.0 {
        line.weekly_cost
    } else {
        line.weekly_visits() * line.cost_per_visit
    }
}

/// Maps cap utilization onto the three status tiers. The tiers partition
/// [0, inf): within up to the within-threshold, near up to the
/// near-threshold, over beyond it.
pub fn cost_status(utilization: f64, config: &CostConfig) -> CostStatus {
    if utilization <= config.within_cap_threshold {
        CostStatus::WithinCap
    } else if utilization <= config.near_cap_threshold {
        CostStatus::NearCap
    } else {
        CostStatus::OverCap
    }
}

/// Builds the full cost summary for a set of lines under one axis.
pub fn summarize(lines: &[ServiceLine], axis: ScenarioAxis, config: &CostConfig) -> CostSummary {
    let weekly_cost = total_weekly_cost(lines);
    let utilization = if config.reference_weekly_cap > 0.0 {
        weekly_cost / config.reference_weekly_cap
    } else {
        0.0
    };
    let status = cost_status(utilization, config);
    let utilization_pct = round1(utilization * 100.0);

    CostSummary {
        weekly_cost,
        reference_cap: config.reference_weekly_cap,
        cap_utilization_pct: utilization_pct,
        status,
        narrative: format!(
            "{} {}",
            axis_sentence(axis),
            status_sentence(status, utilization_pct)
        ),
    }
}

/// Aggregates scheduling metrics across lines.
pub fn operational_metrics(lines: &[ServiceLine]) -> OperationalMetrics {
    let total_visits: f64 = lines.iter().map(ServiceLine::weekly_visits).sum();
    let total_minutes: f64 = lines.iter().map(ServiceLine::weekly_minutes).sum();

    let in_person_visits: f64 = lines
        .iter()
        .filter(|l| l.delivery_mode == crate::scenario::DeliveryMode::InPerson)
        .map(ServiceLine::weekly_visits)
        .sum();

    let (in_person_pct, virtual_pct) = if total_visits > 0.0 {
        let in_person = round1(in_person_visits / total_visits * 100.0);
        (in_person, round1(100.0 - in_person))
    } else {
        (0.0, 0.0)
    };

    let disciplines: HashSet<Discipline> = lines.iter().map(|l| l.discipline).collect();

    OperationalMetrics {
        total_weekly_hours: round1(total_minutes / 60.0),
        total_weekly_visits: round1(total_visits),
        in_person_pct,
        virtual_pct,
        discipline_count: disciplines.len(),
    }
}

/// Cost and hours share of one service category within a bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub category: ServiceCategory,
    pub weekly_cost: f64,
    pub weekly_hours: f64,
    pub share_pct: f64,
}

/// Hours and visit share of one discipline within a bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisciplineBreakdown {
    pub discipline: Discipline,
    pub weekly_hours: f64,
    pub weekly_visits: f64,
    pub share_pct: f64,
}

/// Groups weekly cost and hours by service category, with each
/// category's share of total cost. Order follows first appearance.
pub fn breakdown_by_category(lines: &[ServiceLine]) -> Vec<CategoryBreakdown> {
    let total = total_weekly_cost(lines);
    let mut out: Vec<CategoryBreakdown> = Vec::new();

    for line in lines {
        let cost = line_weekly_cost(line);
        let hours = line.weekly_minutes() / 60.0;
        match out.iter_mut().find(|b| b.category == line.category) {
            Some(entry) => {
                entry.weekly_cost += cost;
                entry.weekly_hours += hours;
            }
            None => out.push(CategoryBreakdown {
                category: line.category,
                weekly_cost: cost,
                weekly_hours: hours,
                share_pct: 0.0,
            }),
        }
    }

    for entry in &mut out {
        entry.share_pct = if total > 0.0 {
            round1(entry.weekly_cost / total * 100.0)
        } else {
            0.0
        };
        entry.weekly_cost = round2(entry.weekly_cost);
        entry.weekly_hours = round1(entry.weekly_hours);
    }
    out
}

/// Groups weekly hours and visits by discipline, with each discipline's
/// share of total hours.
pub fn breakdown_by_discipline(lines: &[ServiceLine]) -> Vec<DisciplineBreakdown> {
    let total_hours: f64 = lines.iter().map(ServiceLine::weekly_minutes).sum::<f64>() / 60.0;
    let mut out: Vec<DisciplineBreakdown> = Vec::new();

    for line in lines {
        let hours = line.weekly_minutes() / 60.0;
        let visits = line.weekly_visits();
        match out.iter_mut().find(|b| b.discipline == line.discipline) {
            Some(entry) => {
                entry.weekly_hours += hours;
                entry.weekly_visits += visits;
            }
            None => out.push(DisciplineBreakdown {
                discipline: line.discipline,
                weekly_hours: hours,
                weekly_visits: visits,
                share_pct: 0.0,
            }),
        }
    }

    for entry in &mut out {
        entry.share_pct = if total_hours > 0.0 {
            round1(entry.weekly_hours / total_hours * 100.0)
        } else {
            0.0
        };
        entry.weekly_hours = round1(entry.weekly_hours);
        entry.weekly_visits = round1(entry.weekly_visits);
    }
    out
}

/// Recomputes a bundle's cost summary and operational metrics, returning
/// a new bundle with only those two fields changed.
pub fn annotate(bundle: ScenarioBundle, config: &CostConfig) -> ScenarioBundle {
    let summary = summarize(&bundle.service_lines, bundle.primary_axis, config);
    let metrics = operational_metrics(&bundle.service_lines);
    bundle.with_cost(summary).with_metrics(metrics)
}

/// Fixed clinical/operational framing sentence per axis. Cost narrative
/// never frames cap pressure as budget versus care.
fn axis_sentence(axis: ScenarioAxis) -> &'static str {
    match axis {
        ScenarioAxis::RecoveryRehab => {
            "Therapy-forward scheduling concentrates clinical effort early to rebuild function."
        }
        ScenarioAxis::SafetyStability => {
            "Frequent in-person touchpoints keep supervision continuous across the week."
        }
        ScenarioAxis::TechEnabled => {
            "Remote monitoring substitutes travel time with continuous automated oversight."
        }
        ScenarioAxis::CaregiverRelief => {
            "Scheduled respite blocks protect the family caregiver's capacity to continue."
        }
        ScenarioAxis::MedicalIntensive => {
            "Nursing-led visits carry the clinical treatments that keep this patient at home."
        }
        ScenarioAxis::CognitiveSupport => {
            "Consistent, familiar staffing patterns reduce confusion and behavioural escalation."
        }
        ScenarioAxis::CommunityIntegrated => {
            "Group programming shifts part of the support load out of the home setting."
        }
        ScenarioAxis::Balanced => {
            "Service mix spreads effort evenly across clinical, personal and household needs."
        }
    }
}

fn status_sentence(status: CostStatus, utilization_pct: f64) -> String {
    match status {
        CostStatus::WithinCap => format!(
            "Planned services use {utilization_pct:.0}% of the weekly reference benchmark."
        ),
        CostStatus::NearCap => format!(
            "Planned services reach {utilization_pct:.0}% of the weekly reference benchmark; a coordinator should confirm the mix at intake."
        ),
        CostStatus::OverCap => format!(
            "Planned services stand at {utilization_pct:.0}% of the weekly reference benchmark; core and safety-critical services take precedence at intake review."
        ),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::ConfidenceLevel;
    use crate::scenario::{
        BundleProvenance, DeliveryMode, FrequencyPeriod, GenerationSource, ServicePriority,
    };
    use uuid::Uuid;

    fn line(
        category: ServiceCategory,
        per_week: u32,
        minutes: u32,
        rate: f64,
        mode: DeliveryMode,
    ) -> ServiceLine {
        ServiceLine {
            category,
            name: format!("{category} service"),
            billing_code: None,
            frequency: per_week,
            period: FrequencyPeriod::Week,
            duration_minutes: minutes,
            discipline: match category {
                ServiceCategory::Nursing => Discipline::RegisteredNurse,
                _ => Discipline::PersonalSupportWorker,
            },
            delivery_mode: mode,
            cost_per_visit: rate,
            weekly_cost: 0.0,
            priority: ServicePriority::Core,
            safety_critical: false,
            rationale: String::new(),
            supports_goal: String::new(),
            contributes_to: ScenarioAxis::Balanced,
        }
    }

    fn bundle_with(lines: Vec<ServiceLine>) -> ScenarioBundle {
        ScenarioBundle {
            scenario_id: Uuid::new_v4(),
            patient_id: Uuid::new_v4(),
            primary_axis: ScenarioAxis::SafetyStability,
            secondary_axes: Vec::new(),
            title: "Safety & Stability".to_string(),
            subtitle: String::new(),
            description: String::new(),
            service_lines: lines,
            cost: CostSummary::default(),
            metrics: OperationalMetrics::default(),
            benefits: Vec::new(),
            goals_supported: Vec::new(),
            risks_addressed: Vec::new(),
            safety: Default::default(),
            provenance: BundleProvenance {
                source: GenerationSource::RuleEngine,
                confidence: ConfidenceLevel::Medium,
                notes: Vec::new(),
            },
            explanation: None,
            display_order: 0,
            recommended: false,
        }
    }

    // ====== TOTALS ======

    #[test]
    fn nursing_and_psw_weekly_total() {
        let lines = vec![
            line(ServiceCategory::Nursing, 2, 60, 120.0, DeliveryMode::InPerson),
            line(ServiceCategory::PersonalSupport, 7, 45, 45.0, DeliveryMode::InPerson),
        ];

        // 2 x 120 + 7 x 45
        assert_eq!(total_weekly_cost(&lines), 555.0);
    }

    #[test]
    fn precomputed_weekly_cost_is_trusted() {
        let mut l = line(ServiceCategory::Nursing, 2, 60, 120.0, DeliveryMode::InPerson);
        l.weekly_cost = 100.0;

        assert_eq!(total_weekly_cost(&[l]), 100.0);
    }

    // ====== STATUS PARTITION ======

    #[test]
    fn status_tiers_partition_utilization() {
        let config = CostConfig::default();

        assert_eq!(cost_status(0.0, &config), CostStatus::WithinCap);
        assert_eq!(cost_status(0.85, &config), CostStatus::WithinCap);
        assert_eq!(cost_status(0.851, &config), CostStatus::NearCap);
        assert_eq!(cost_status(1.0, &config), CostStatus::NearCap);
        assert_eq!(cost_status(1.001, &config), CostStatus::OverCap);
        assert_eq!(cost_status(3.0, &config), CostStatus::OverCap);
    }

    #[test]
    fn summary_reports_utilization_against_cap() {
        let config = CostConfig::default();
        let lines = vec![
            line(ServiceCategory::Nursing, 2, 60, 120.0, DeliveryMode::InPerson),
            line(ServiceCategory::PersonalSupport, 7, 45, 45.0, DeliveryMode::InPerson),
        ];

        let summary = summarize(&lines, ScenarioAxis::MedicalIntensive, &config);

        assert_eq!(summary.weekly_cost, 555.0);
        assert_eq!(summary.reference_cap, 1050.0);
        // 555 / 1050 = 52.857%
        assert_eq!(summary.cap_utilization_pct, 52.9);
        assert_eq!(summary.status, CostStatus::WithinCap);
        assert!(summary.narrative.contains("53%"));
    }

    // ====== METRICS ======

    #[test]
    fn metrics_split_delivery_modes_by_visits() {
        let lines = vec![
            line(ServiceCategory::Nursing, 2, 60, 120.0, DeliveryMode::InPerson),
            line(ServiceCategory::RemoteMonitoring, 8, 15, 5.0, DeliveryMode::Automated),
        ];

        let metrics = operational_metrics(&lines);

        // 2 x 60 + 8 x 15 = 240 minutes
        assert_eq!(metrics.total_weekly_hours, 4.0);
        assert_eq!(metrics.total_weekly_visits, 10.0);
        assert_eq!(metrics.in_person_pct, 20.0);
        assert_eq!(metrics.virtual_pct, 80.0);
        assert_eq!(metrics.discipline_count, 2);
    }

    #[test]
    fn metrics_on_empty_lines_are_zero() {
        let metrics = operational_metrics(&[]);

        assert_eq!(metrics.total_weekly_visits, 0.0);
        assert_eq!(metrics.in_person_pct, 0.0);
        assert_eq!(metrics.discipline_count, 0);
    }

    // ====== BREAKDOWNS ======

    #[test]
    fn category_breakdown_shares_sum_to_whole() {
        let lines = vec![
            line(ServiceCategory::Nursing, 2, 60, 120.0, DeliveryMode::InPerson),
            line(ServiceCategory::PersonalSupport, 7, 45, 45.0, DeliveryMode::InPerson),
            line(ServiceCategory::PersonalSupport, 1, 120, 45.0, DeliveryMode::InPerson),
        ];

        let breakdown = breakdown_by_category(&lines);

        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].category, ServiceCategory::Nursing);
        assert_eq!(breakdown[1].category, ServiceCategory::PersonalSupport);
        assert_eq!(breakdown[1].weekly_cost, 360.0);
        let total_share: f64 = breakdown.iter().map(|b| b.share_pct).sum();
        assert!((total_share - 100.0).abs() < 0.2);
    }

    #[test]
    fn discipline_breakdown_groups_hours() {
        let lines = vec![
            line(ServiceCategory::Nursing, 2, 60, 120.0, DeliveryMode::InPerson),
            line(ServiceCategory::PersonalSupport, 4, 45, 45.0, DeliveryMode::InPerson),
        ];

        let breakdown = breakdown_by_discipline(&lines);

        assert_eq!(breakdown.len(), 2);
        let nurse = breakdown
            .iter()
            .find(|b| b.discipline == Discipline::RegisteredNurse)
            .unwrap();
        assert_eq!(nurse.weekly_hours, 2.0);
        assert_eq!(nurse.weekly_visits, 2.0);
        // 2h of 5h total
        assert_eq!(nurse.share_pct, 40.0);
    }

    // ====== ANNOTATION ======

    #[test]
    fn annotate_changes_only_cost_and_metrics() {
        let config = CostConfig::default();
        let bundle = bundle_with(vec![line(
            ServiceCategory::Nursing,
            2,
            60,
            120.0,
            DeliveryMode::InPerson,
        )]);
        let before = bundle.clone();

        let annotated = annotate(bundle, &config);

        assert_eq!(annotated.cost.weekly_cost, 240.0);
        assert_eq!(annotated.metrics.total_weekly_visits, 2.0);
        assert_eq!(annotated.scenario_id, before.scenario_id);
        assert_eq!(annotated.service_lines, before.service_lines);
        assert_eq!(annotated.title, before.title);
        assert_eq!(annotated.display_order, before.display_order);
        assert_eq!(annotated.recommended, before.recommended);
    }

    #[test]
    fn annotate_twice_is_idempotent() {
        let config = CostConfig::default();
        let bundle = bundle_with(vec![line(
            ServiceCategory::PersonalSupport,
            5,
            45,
            45.0,
            DeliveryMode::InPerson,
        )]);

        let once = annotate(bundle, &config);
        let twice = annotate(once.clone(), &config);

        assert_eq!(once, twice);
    }
}
