//! Care scenario bundles: value types, base template resolution, axis
//! application and clinical safety review.
//!
//! Bundles are immutable values. Every post-construction change (cost
//! annotation, display order, the recommended flag) produces a new
//! bundle with one field changed, so bundles stay safely comparable,
//! loggable and replayable.

pub mod generator;
pub mod safety;
pub mod templates;
pub mod types;

pub use generator::ScenarioGenerator;
pub use safety::review_bundle;
pub use templates::{builtin_template, resolve_base_template};
pub use types::{
    BundleProvenance, CostStatus, CostSummary, DeliveryMode, Discipline, FrequencyPeriod,
    GenerationOptions, GenerationSource, OperationalMetrics, SafetyCheck, SafetyFinding,
    SafetyReview, ScenarioBundle, ServiceCategory, ServiceLine, ServicePriority, WEEKS_PER_MONTH,
};
