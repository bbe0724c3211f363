//! Unified patient needs profile: types, source mappers, merge and
//! derivation logic, and the cache-backed builder service.
//!
//! Merge order is fixed: home-care assessment (weight 1.0) fills first,
//! the contact assessment (0.7) fills gaps, the behavioural screener
//! (0.5) overlays its own fields, and the referral (0.4) fills whatever
//! is still unset. Derived attributes (needs cluster, episode type,
//! rehab potential, confidence) are computed after the merge.

pub mod builder;
pub mod derive;
pub mod fields;
pub mod mappers;
pub mod types;

pub use builder::{profile_cache_key, NeedsProfileService, ProfileBuildOptions};
pub use types::{
    ClinicalRiskProfile, CognitiveProfile, ConfidenceLevel, EnvironmentProfile, EpisodeType,
    FunctionalProfile, NeedsCluster, PatientNeedsProfile, ProfileError, ProfileSource,
    SourceMark, SourceProvenance, SupportProfile, TechnologyProfile, TreatmentProfile,
};
