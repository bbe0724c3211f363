//! Service template and billing-rate boundaries.
//!
//! A template is the curated starting service set for a case-mix group
//! or category; the generator bends it per axis afterwards. Templates
//! carry the service-type metadata (discipline, duration, delivery mode)
//! so rate lookup is the only other reference read at generation time.

use serde::{Deserialize, Serialize};

use crate::scenario::{
    DeliveryMode, Discipline, FrequencyPeriod, ServiceCategory, ServicePriority,
};

use super::StoreError;

/// One service entry within a template, before axis modifiers and
/// pricing are applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateService {
    pub category: ServiceCategory,
    pub name: String,
    pub billing_code: Option<String>,
    pub frequency: u32,
    pub period: FrequencyPeriod,
    pub duration_minutes: u32,
    pub discipline: Discipline,
    pub delivery_mode: DeliveryMode,
    pub priority: ServicePriority,
    pub safety_critical: bool,
    pub rationale: String,
    pub goal: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceTemplate {
    pub template_id: String,
    pub name: String,
    /// Exact case-mix group codes this template serves, e.g. `["RB1", "RB2"]`.
    pub case_mix_groups: Vec<String>,
    /// Case-mix category names, matched case-insensitively.
    pub case_mix_categories: Vec<String>,
    pub services: Vec<TemplateService>,
}

impl ServiceTemplate {
    pub fn serves_group(&self, group: &str) -> bool {
        self.case_mix_groups.iter().any(|g| g == group)
    }

    pub fn serves_category(&self, category: &str) -> bool {
        self.case_mix_categories
            .iter()
            .any(|c| c.eq_ignore_ascii_case(category))
    }
}

pub trait TemplateStore: Send + Sync {
    fn template_for_group(&self, group: &str) -> Result<Option<ServiceTemplate>, StoreError>;

    fn template_for_category(
        &self,
        category: &str,
    ) -> Result<Option<ServiceTemplate>, StoreError>;

    /// The generic template used when nothing matched the classification.
    fn default_template(&self) -> Result<Option<ServiceTemplate>, StoreError>;
}

/// Current billing rate per visit for a service category. `None` means
/// no rate is configured and the caller falls back to the default rate.
pub trait RateStore: Send + Sync {
    fn visit_rate(&self, category: ServiceCategory) -> Result<Option<f64>, StoreError>;
}
