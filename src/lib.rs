//! Caraxis: a care-bundle recommendation engine for home-care
//! coordination.
//!
//! The engine fuses whatever assessment data is on file into an
//! immutable needs profile, scores eight care-planning axes against it,
//! and generates a small ranked set of costed, safety-checked service
//! bundles with plain-language explanations. Persistence, transport and
//! UI stay outside: an embedding application implements the store
//! traits in [`stores`] and the event sink in [`audit`], then drives
//! the services below.

mod enums;

pub mod algorithms;
pub mod assessments;
pub mod audit;
pub mod axes;
pub mod config;
pub mod cost;
pub mod explain;
pub mod profile;
pub mod scenario;
pub mod stores;

pub use enums::EnumParseError;

pub use algorithms::{evaluate_all, AlgorithmScores, EvaluationContext};
pub use audit::{
    BundleEvent, BundleEventKind, BundleEventLogger, EventSink, MemoryEventSink, ReferenceHasher,
};
pub use axes::{applicable_axes, detailed_evaluation, AxisEvaluation, ScenarioAxis};
pub use config::EngineConfig;
pub use explain::{ExplanationService, ScenarioExplanation};
pub use profile::{NeedsProfileService, PatientNeedsProfile, ProfileBuildOptions};
pub use scenario::{GenerationOptions, ScenarioBundle, ScenarioGenerator, ServiceLine};
pub use stores::{AssessmentStore, ProfileCache, RateStore, StoreError, TemplateStore};
