//! Behavioural screener mapper. Narrow but specialized: it overlays the
//! mood and behaviour fields even when a broader assessment already set
//! them, because the screener is the dedicated instrument for those.

use crate::assessments::AssessmentSnapshot;
use crate::profile::fields::*;
use crate::profile::types::ProfileSource;

use super::{flag, int, AssessmentMapper, MappedFields, WEIGHT_SCREENER};

pub struct ScreenerMapper;

impl AssessmentMapper for ScreenerMapper {
    fn source(&self) -> ProfileSource {
        ProfileSource::BehaviouralScreener
    }

    fn weight(&self) -> f64 {
        WEIGHT_SCREENER
    }

    fn mode(&self) -> ApplyMode {
        ApplyMode::Overlay
    }

    fn map(&self, snapshot: &AssessmentSnapshot) -> Option<MappedFields> {
        let s = snapshot.screener.as_ref()?;

        let mut fields = vec![
            flag(MOOD_DECLINE, s.mood_decline),
            flag(BEHAVIOURAL_SYMPTOMS, s.behavioural_symptoms),
            flag(WANDERING_RISK, s.wandering_risk),
        ];
        // Cognitive concern only overlays when the screener actually
        // observed something; a zero would erase a broader assessment's
        // rating with no observation behind it.
        if s.cognitive_concern > 0 {
            fields.push(int(COGNITIVE_COMPLEXITY, s.cognitive_concern));
        }

        Some(MappedFields {
            assessed_on: Some(s.screened_on),
            fields,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessments::BehaviouralScreener;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn snapshot_with_screener(screener: BehaviouralScreener) -> AssessmentSnapshot {
        AssessmentSnapshot {
            patient_id: screener.patient_id,
            screener: Some(screener),
            ..Default::default()
        }
    }

    #[test]
    fn flags_are_always_present_for_overlay() {
        let screener = BehaviouralScreener {
            patient_id: Uuid::new_v4(),
            screened_on: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            mood_decline: false,
            wandering_risk: true,
            ..Default::default()
        };

        let mapped = ScreenerMapper.map(&snapshot_with_screener(screener)).unwrap();

        assert!(mapped.fields.contains(&(MOOD_DECLINE, FieldValue::Flag(false))));
        assert!(mapped.fields.contains(&(WANDERING_RISK, FieldValue::Flag(true))));
    }

    #[test]
    fn zero_cognitive_concern_is_not_contributed() {
        let screener = BehaviouralScreener {
            patient_id: Uuid::new_v4(),
            screened_on: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            cognitive_concern: 0,
            ..Default::default()
        };

        let mapped = ScreenerMapper.map(&snapshot_with_screener(screener)).unwrap();

        assert!(!mapped
            .fields
            .iter()
            .any(|(key, _)| *key == COGNITIVE_COMPLEXITY));
    }
}
