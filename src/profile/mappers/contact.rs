//! Intake mapper: phone or first-contact assessment. Coarser than the
//! in-home assessment, so it only fills gaps the primary left behind.

use crate::assessments::AssessmentSnapshot;
use crate::profile::fields::*;
use crate::profile::types::ProfileSource;

use super::{flag, int, list, AssessmentMapper, MappedFields, WEIGHT_CONTACT};

pub struct ContactMapper;

impl AssessmentMapper for ContactMapper {
    fn source(&self) -> ProfileSource {
        ProfileSource::Contact
    }

    fn weight(&self) -> f64 {
        WEIGHT_CONTACT
    }

    fn mode(&self) -> ApplyMode {
        ApplyMode::Fill
    }

    fn map(&self, snapshot: &AssessmentSnapshot) -> Option<MappedFields> {
        let a = snapshot.contact.as_ref()?;

        Some(MappedFields {
            assessed_on: Some(a.assessed_on),
            fields: vec![
                int(ADL_SUPPORT_LEVEL, a.adl_support),
                int(IADL_SUPPORT_LEVEL, a.iadl_support),
                int(MOBILITY_LEVEL, a.mobility),
                int(FALLS_RISK_LEVEL, a.falls_risk),
                int(COGNITIVE_COMPLEXITY, a.cognitive_complexity),
                int(COMMUNICATION_LEVEL, a.communication),
                int(HEALTH_INSTABILITY, a.health_instability),
                int(PAIN_LEVEL, a.pain),
                flag(RECENT_HOSPITALIZATION, a.recent_hospitalization),
                flag(LIVES_ALONE, a.lives_alone),
                flag(CAREGIVER_AVAILABLE, a.caregiver_available),
                list(ACTIVE_CONDITIONS, &a.reported_conditions),
            ],
        })
    }
}
