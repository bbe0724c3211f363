//! Primary mapper: the full in-home assessment covers every profile
//! field, so this is the broadest contribution and carries full weight.

use crate::assessments::AssessmentSnapshot;
use crate::profile::fields::*;
use crate::profile::types::ProfileSource;

use super::{flag, int, list, text, AssessmentMapper, MappedFields, WEIGHT_HOME_CARE};

pub struct HomeCareMapper;

impl AssessmentMapper for HomeCareMapper {
    fn source(&self) -> ProfileSource {
        ProfileSource::HomeCare
    }

    fn weight(&self) -> f64 {
        WEIGHT_HOME_CARE
    }

    fn mode(&self) -> ApplyMode {
        ApplyMode::Fill
    }

    fn map(&self, snapshot: &AssessmentSnapshot) -> Option<MappedFields> {
        let a = snapshot.home_care.as_ref()?;

        let mut fields = vec![
            int(ADL_SUPPORT_LEVEL, a.adl_support),
            int(IADL_SUPPORT_LEVEL, a.iadl_support),
            int(MOBILITY_LEVEL, a.mobility),
            int(FALLS_RISK_LEVEL, a.falls_risk),
            int(REHAB_POTENTIAL, a.rehab_potential),
            flag(USES_MOBILITY_AID, a.uses_mobility_aid),
            flag(RECENT_FALL, a.recent_fall),
            int(COGNITIVE_COMPLEXITY, a.cognitive_complexity),
            int(COMMUNICATION_LEVEL, a.communication),
            flag(WANDERING_RISK, a.wandering_risk),
            flag(BEHAVIOURAL_SYMPTOMS, a.behavioural_symptoms),
            flag(MOOD_DECLINE, a.mood_decline),
            int(HEALTH_INSTABILITY, a.health_instability),
            int(PAIN_LEVEL, a.pain),
            int(PRESSURE_ULCER_RISK, a.pressure_ulcer_risk),
            flag(RECENT_HOSPITALIZATION, a.recent_hospitalization),
            flag(SWALLOWING_DIFFICULTY, a.swallowing_difficulty),
            list(ACTIVE_CONDITIONS, &a.active_conditions),
            flag(REQUIRES_EXTENSIVE_SERVICES, a.requires_extensive_services),
            list(EXTENSIVE_SERVICES, &a.extensive_services),
            flag(WOUND_CARE, a.wound_care),
            flag(OXYGEN_THERAPY, a.oxygen_therapy),
            flag(INJECTION_SUPPORT, a.injection_support),
            flag(CATHETER_CARE, a.catheter_care),
            flag(CAREGIVER_AVAILABLE, a.caregiver_available),
            flag(LIVES_ALONE, a.lives_alone),
            int(CAREGIVER_STRESS_LEVEL, a.caregiver_stress),
            int(SOCIAL_SUPPORT_LEVEL, a.social_support),
            int(TECH_READINESS_LEVEL, a.tech_readiness),
            flag(HAS_INTERNET, a.has_internet),
            flag(USES_MONITORING_DEVICES, a.uses_monitoring_devices),
            flag(COMFORTABLE_WITH_VIDEO, a.comfortable_with_video),
            int(HOME_SAFETY_LEVEL, a.home_safety),
            flag(STAIRS_PRESENT, a.stairs_present),
            flag(BATHROOM_ADAPTED, a.bathroom_adapted),
            flag(RURAL_ISOLATED, a.rural_isolated),
        ];

        if let Some(case_mix) = &a.case_mix {
            fields.push(text(CASE_MIX_GROUP, &case_mix.group));
            fields.push(text(CASE_MIX_CATEGORY, &case_mix.category));
            fields.push(int(CASE_MIX_RANK, case_mix.rank));
        }

        Some(MappedFields {
            assessed_on: Some(a.assessed_on),
            fields,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessments::{CaseMixClassification, HomeCareAssessment};
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn snapshot_with_assessment(assessment: HomeCareAssessment) -> AssessmentSnapshot {
        AssessmentSnapshot {
            patient_id: assessment.patient_id,
            home_care: Some(assessment),
            ..Default::default()
        }
    }

    #[test]
    fn absent_assessment_maps_to_none() {
        let snapshot = AssessmentSnapshot::empty(Uuid::new_v4());
        assert!(HomeCareMapper.map(&snapshot).is_none());
    }

    #[test]
    fn severity_fields_and_case_mix_come_through() {
        let patient_id = Uuid::new_v4();
        let assessment = HomeCareAssessment {
            patient_id,
            assessed_on: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            adl_support: 4,
            falls_risk: 3,
            case_mix: Some(CaseMixClassification {
                group: "RB2".to_string(),
                category: "Rehabilitation".to_string(),
                rank: 28,
            }),
            ..Default::default()
        };

        let mapped = HomeCareMapper.map(&snapshot_with_assessment(assessment)).unwrap();

        assert_eq!(
            mapped.assessed_on,
            Some(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap())
        );
        assert!(mapped
            .fields
            .contains(&(ADL_SUPPORT_LEVEL, FieldValue::Int(4))));
        assert!(mapped
            .fields
            .contains(&(CASE_MIX_GROUP, FieldValue::Text("RB2".to_string()))));
        assert!(mapped.fields.contains(&(CASE_MIX_RANK, FieldValue::Int(28))));
    }

    #[test]
    fn missing_case_mix_contributes_no_classification_keys() {
        let assessment = HomeCareAssessment {
            patient_id: Uuid::new_v4(),
            assessed_on: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            ..Default::default()
        };

        let mapped = HomeCareMapper.map(&snapshot_with_assessment(assessment)).unwrap();

        assert!(!mapped.fields.iter().any(|(key, _)| *key == CASE_MIX_GROUP));
    }
}
