//! Source-specific assessment mappers.
//!
//! One mapper per raw assessment type. Each reads its slice of the
//! snapshot and emits keyed field contributions; the builder applies
//! them to the draft in priority order. Mappers are pure and never
//! touch a store.

pub mod contact;
pub mod home_care;
pub mod referral;
pub mod screener;

pub use contact::ContactMapper;
pub use home_care::HomeCareMapper;
pub use referral::ReferralMapper;
pub use screener::ScreenerMapper;

use chrono::NaiveDate;

use crate::assessments::AssessmentSnapshot;

use super::fields::{ApplyMode, FieldValue};
use super::types::ProfileSource;

// Source confidence weights, in merge priority order.
pub const WEIGHT_HOME_CARE: f64 = 1.0;
pub const WEIGHT_CONTACT: f64 = 0.7;
pub const WEIGHT_SCREENER: f64 = 0.5;
pub const WEIGHT_REFERRAL: f64 = 0.4;

/// One source's contribution to the profile draft.
#[derive(Debug, Clone)]
pub struct MappedFields {
    pub assessed_on: Option<NaiveDate>,
    pub fields: Vec<(&'static str, FieldValue)>,
}

/// Translates one raw assessment type into profile fields.
pub trait AssessmentMapper: Send + Sync {
    fn source(&self) -> ProfileSource;
    fn weight(&self) -> f64;
    fn mode(&self) -> ApplyMode;

    /// `None` when the snapshot has no record of this source.
    fn map(&self, snapshot: &AssessmentSnapshot) -> Option<MappedFields>;
}

/// The standard mapper set, in merge priority order.
pub fn default_mappers() -> Vec<Box<dyn AssessmentMapper>> {
    vec![
        Box::new(HomeCareMapper),
        Box::new(ContactMapper),
        Box::new(ScreenerMapper),
        Box::new(ReferralMapper),
    ]
}

pub(crate) fn int(key: &'static str, value: impl Into<i64>) -> (&'static str, FieldValue) {
    (key, FieldValue::Int(value.into()))
}

pub(crate) fn flag(key: &'static str, value: bool) -> (&'static str, FieldValue) {
    (key, FieldValue::Flag(value))
}

pub(crate) fn text(key: &'static str, value: &str) -> (&'static str, FieldValue) {
    (key, FieldValue::Text(value.to_string()))
}

pub(crate) fn list(key: &'static str, values: &[String]) -> (&'static str, FieldValue) {
    (key, FieldValue::List(values.to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_set_is_in_priority_order() {
        let mappers = default_mappers();
        let weights: Vec<f64> = mappers.iter().map(|m| m.weight()).collect();

        assert_eq!(weights, vec![1.0, 0.7, 0.5, 0.4]);
        assert_eq!(mappers[0].source(), ProfileSource::HomeCare);
        assert_eq!(mappers[3].source(), ProfileSource::Referral);
    }

    #[test]
    fn only_the_screener_overlays() {
        for mapper in default_mappers() {
            let expected = if mapper.source() == ProfileSource::BehaviouralScreener {
                ApplyMode::Overlay
            } else {
                ApplyMode::Fill
            };
            assert_eq!(mapper.mode(), expected);
        }
    }
}
