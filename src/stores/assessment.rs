//! Read boundary for raw assessment data.

use uuid::Uuid;

use crate::assessments::{
    BehaviouralScreener, CaseMixClassification, ContactAssessment, HomeCareAssessment,
    ReferralRecord,
};

use super::StoreError;

/// Fetches the latest record per assessment type for a patient.
///
/// "Latest" is by assessment date, newest first. Recency policy (how old
/// is too old) belongs to the profile builder, not the store.
pub trait AssessmentStore: Send + Sync {
    fn latest_home_care(&self, patient_id: Uuid)
        -> Result<Option<HomeCareAssessment>, StoreError>;

    fn latest_contact(&self, patient_id: Uuid) -> Result<Option<ContactAssessment>, StoreError>;

    fn latest_screener(&self, patient_id: Uuid)
        -> Result<Option<BehaviouralScreener>, StoreError>;

    fn latest_referral(&self, patient_id: Uuid) -> Result<Option<ReferralRecord>, StoreError>;

    /// Standalone case-mix classification, used as a fallback when no
    /// assessment carried one.
    fn case_mix_classification(
        &self,
        patient_id: Uuid,
    ) -> Result<Option<CaseMixClassification>, StoreError>;
}
