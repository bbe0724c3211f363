//! In-memory store implementations.
//!
//! Thread-safe via `RwLock`; records are cloned out. Suitable for tests
//! and for embedders that load reference data at startup.

use std::collections::HashMap;
use std::sync::RwLock;

use uuid::Uuid;

use crate::assessments::{
    BehaviouralScreener, CaseMixClassification, ContactAssessment, HomeCareAssessment,
    ReferralRecord,
};
use crate::scenario::ServiceCategory;

use super::assessment::AssessmentStore;
use super::template::{RateStore, ServiceTemplate, TemplateStore};
use super::StoreError;

// ─── Assessments ─────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MemoryAssessmentStore {
    home_care: RwLock<Vec<HomeCareAssessment>>,
    contact: RwLock<Vec<ContactAssessment>>,
    screeners: RwLock<Vec<BehaviouralScreener>>,
    referrals: RwLock<Vec<ReferralRecord>>,
    case_mix: RwLock<HashMap<Uuid, CaseMixClassification>>,
}

impl MemoryAssessmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_home_care(&self, assessment: HomeCareAssessment) {
        if let Ok(mut records) = self.home_care.write() {
            records.push(assessment);
        }
    }

    pub fn add_contact(&self, assessment: ContactAssessment) {
        if let Ok(mut records) = self.contact.write() {
            records.push(assessment);
        }
    }

    pub fn add_screener(&self, screener: BehaviouralScreener) {
        if let Ok(mut records) = self.screeners.write() {
            records.push(screener);
        }
    }

    pub fn add_referral(&self, referral: ReferralRecord) {
        if let Ok(mut records) = self.referrals.write() {
            records.push(referral);
        }
    }

    pub fn set_case_mix(&self, patient_id: Uuid, classification: CaseMixClassification) {
        if let Ok(mut records) = self.case_mix.write() {
            records.insert(patient_id, classification);
        }
    }
}

impl AssessmentStore for MemoryAssessmentStore {
    fn latest_home_care(
        &self,
        patient_id: Uuid,
    ) -> Result<Option<HomeCareAssessment>, StoreError> {
        let records = self.home_care.read().map_err(|_| StoreError::LockFailed)?;
        Ok(records
            .iter()
            .filter(|a| a.patient_id == patient_id)
            .max_by_key(|a| a.assessed_on)
            .cloned())
    }

    fn latest_contact(&self, patient_id: Uuid) -> Result<Option<ContactAssessment>, StoreError> {
        let records = self.contact.read().map_err(|_| StoreError::LockFailed)?;
        Ok(records
            .iter()
            .filter(|a| a.patient_id == patient_id)
            .max_by_key(|a| a.assessed_on)
            .cloned())
    }

    fn latest_screener(
        &self,
        patient_id: Uuid,
    ) -> Result<Option<BehaviouralScreener>, StoreError> {
        let records = self.screeners.read().map_err(|_| StoreError::LockFailed)?;
        Ok(records
            .iter()
            .filter(|s| s.patient_id == patient_id)
            .max_by_key(|s| s.screened_on)
            .cloned())
    }

    fn latest_referral(&self, patient_id: Uuid) -> Result<Option<ReferralRecord>, StoreError> {
        let records = self.referrals.read().map_err(|_| StoreError::LockFailed)?;
        Ok(records
            .iter()
            .filter(|r| r.patient_id == patient_id)
            .max_by_key(|r| r.referred_on)
            .cloned())
    }

    fn case_mix_classification(
        &self,
        patient_id: Uuid,
    ) -> Result<Option<CaseMixClassification>, StoreError> {
        let records = self.case_mix.read().map_err(|_| StoreError::LockFailed)?;
        Ok(records.get(&patient_id).cloned())
    }
}

// ─── Templates ───────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MemoryTemplateStore {
    templates: RwLock<Vec<ServiceTemplate>>,
    default_template: RwLock<Option<ServiceTemplate>>,
}

impl MemoryTemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, template: ServiceTemplate) {
        if let Ok(mut templates) = self.templates.write() {
            templates.push(template);
        }
    }

    pub fn set_default(&self, template: ServiceTemplate) {
        if let Ok(mut slot) = self.default_template.write() {
            *slot = Some(template);
        }
    }
}

impl TemplateStore for MemoryTemplateStore {
    fn template_for_group(&self, group: &str) -> Result<Option<ServiceTemplate>, StoreError> {
        let templates = self.templates.read().map_err(|_| StoreError::LockFailed)?;
        Ok(templates.iter().find(|t| t.serves_group(group)).cloned())
    }

    fn template_for_category(
        &self,
        category: &str,
    ) -> Result<Option<ServiceTemplate>, StoreError> {
        let templates = self.templates.read().map_err(|_| StoreError::LockFailed)?;
        Ok(templates
            .iter()
            .find(|t| t.serves_category(category))
            .cloned())
    }

    fn default_template(&self) -> Result<Option<ServiceTemplate>, StoreError> {
        let slot = self
            .default_template
            .read()
            .map_err(|_| StoreError::LockFailed)?;
        Ok(slot.clone())
    }
}

// ─── Rates ───────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MemoryRateStore {
    rates: RwLock<HashMap<ServiceCategory, f64>>,
}

impl MemoryRateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_rate(&self, category: ServiceCategory, per_visit: f64) {
        if let Ok(mut rates) = self.rates.write() {
            rates.insert(category, per_visit);
        }
    }
}

impl RateStore for MemoryRateStore {
    fn visit_rate(&self, category: ServiceCategory) -> Result<Option<f64>, StoreError> {
        let rates = self.rates.read().map_err(|_| StoreError::LockFailed)?;
        Ok(rates.get(&category).copied())
    }
}
