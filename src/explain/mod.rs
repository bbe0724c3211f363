//! Plain-language explanations for generated bundles.
//!
//! An external model can word the rationale, but it only ever sees the
//! coded payload assembled in [`prompt`], and every failure mode lands
//! on the deterministic [`fallback`] explainer. The flow is:
//!
//! 1. Assemble the payload and scan it for protected data.
//! 2. Shortcut: no scoring evidence, or provider disabled.
//! 3. Call the provider; categorize any failure.
//! 4. Fall back to rules-based wording when the provider cannot answer.
//!
//! Each request leaves exactly one audit row with ids, scores, status
//! and latency. Prompt and response text are never persisted.

pub mod fallback;
pub mod prompt;
pub mod service;
pub mod types;
pub mod vertex;

pub use fallback::RuleBasedExplainer;
pub use prompt::{validate_no_phi_pii, PromptBuilder, FORBIDDEN_KEY_FRAGMENTS};
pub use service::{ExplanationLog, ExplanationService};
pub use types::{
    ExplanationPayload, ExplanationProvider, ExplanationSource, ProviderError, ScenarioExplanation,
};
pub use vertex::{MockExplanationProvider, VertexExplanationClient};

use thiserror::Error;

/// The one explanation failure that propagates to callers. Anything
/// else degrades to the rules-based explainer; a protected-data hit
/// means the payload assembly itself is defective and the request must
/// not proceed.
#[derive(Error, Debug)]
pub enum ExplainError {
    #[error("Protected data detected in outbound payload: {0}")]
    SafetyViolation(String),
}
