//! Referral mapper. Paperwork-only source: a handful of preliminary
//! flags at the lowest confidence weight, filling whatever better
//! sources left unset.

use crate::assessments::{AssessmentSnapshot, ReferralSource};
use crate::profile::fields::*;
use crate::profile::types::ProfileSource;

use super::{flag, AssessmentMapper, MappedFields, WEIGHT_REFERRAL};

pub struct ReferralMapper;

impl AssessmentMapper for ReferralMapper {
    fn source(&self) -> ProfileSource {
        ProfileSource::Referral
    }

    fn weight(&self) -> f64 {
        WEIGHT_REFERRAL
    }

    fn mode(&self) -> ApplyMode {
        ApplyMode::Fill
    }

    fn map(&self, snapshot: &AssessmentSnapshot) -> Option<MappedFields> {
        let r = snapshot.referral.as_ref()?;

        let mut fields = Vec::new();
        if let Some(lives_alone) = r.lives_alone {
            fields.push(flag(LIVES_ALONE, lives_alone));
        }
        if let Some(caregiver) = r.caregiver_available {
            fields.push(flag(CAREGIVER_AVAILABLE, caregiver));
        }
        if r.source == ReferralSource::Hospital {
            fields.push(flag(RECENT_HOSPITALIZATION, true));
        }

        Some(MappedFields {
            assessed_on: Some(r.referred_on),
            fields,
        })
    }
}
