//! Explanation orchestration.
//!
//! One fixed path per request: assemble and scan the payload, take the
//! no-evidence or provider-disabled shortcut, otherwise call the
//! provider and degrade to the rules-based explainer on any failure.
//! Every path returns an explanation and leaves one audit row.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::algorithms::AlgorithmScores;
use crate::audit::{BundleEventKind, BundleEventLogger};
use crate::axes::{AxisEvaluation, ScenarioAxis};
use crate::config::ExplainConfig;
use crate::profile::PatientNeedsProfile;
use crate::scenario::ScenarioBundle;

use super::fallback::RuleBasedExplainer;
use super::prompt::PromptBuilder;
use super::types::{
    ExplanationPayload, ExplanationProvider, ExplanationSource, ProviderError, ScenarioExplanation,
};
use super::ExplainError;

pub const STATUS_OK: &str = "ok";
pub const STATUS_NO_MATCH: &str = "no_match";
pub const STATUS_PROVIDER_DISABLED: &str = "provider_disabled";
pub const STATUS_TIMEOUT: &str = "vertex_ai_timeout";
pub const STATUS_RATE_LIMITED: &str = "vertex_ai_rate_limited";
pub const STATUS_AUTH_FAILED: &str = "vertex_ai_auth_failed";
pub const STATUS_ERROR: &str = "vertex_ai_error";

/// Audit row for one explanation request: identifiers, scores, outcome
/// and latency. Prompt and response text are deliberately absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplanationLog {
    pub patient_ref: String,
    pub scenario_id: Uuid,
    pub axis: ScenarioAxis,
    pub score: i32,
    pub source: ExplanationSource,
    pub status: String,
    pub response_time_ms: u64,
    pub created_at: DateTime<Utc>,
}

pub struct ExplanationService {
    provider: Option<Arc<dyn ExplanationProvider>>,
    fallback: RuleBasedExplainer,
    prompt: PromptBuilder,
    logger: BundleEventLogger,
    config: ExplainConfig,
}

impl ExplanationService {
    pub fn new(
        provider: Option<Arc<dyn ExplanationProvider>>,
        prompt: PromptBuilder,
        logger: BundleEventLogger,
        config: ExplainConfig,
    ) -> Self {
        Self {
            provider,
            fallback: RuleBasedExplainer,
            prompt,
            logger,
            config,
        }
    }

    /// Explains one bundle. Always produces an explanation; the only
    /// error that propagates is a protected-data violation during
    /// payload assembly.
    pub fn explain_scenario(
        &self,
        profile: &PatientNeedsProfile,
        bundle: &ScenarioBundle,
        evaluation: Option<&AxisEvaluation>,
        scores: &AlgorithmScores,
    ) -> Result<ScenarioExplanation, ExplainError> {
        let started = Instant::now();

        // 1. Assemble and scan the outbound payload.
        let payload = self.prompt.build(profile, bundle, evaluation, scores)?;

        // 2. Nothing scored for this axis, so there is no evidence for a
        //    model to word. Use the neutral deterministic wording.
        if payload.axis_reasons.is_empty() {
            let explanation = self.fallback.explain(&payload);
            self.log(bundle, &payload, &explanation, STATUS_NO_MATCH, started);
            return Ok(explanation);
        }

        // 3. Provider switched off or never wired.
        let provider = match (&self.provider, self.config.provider_enabled) {
            (Some(provider), true) => provider,
            _ => {
                let explanation = self.fallback.explain(&payload);
                self.log(
                    bundle,
                    &payload,
                    &explanation,
                    STATUS_PROVIDER_DISABLED,
                    started,
                );
                return Ok(explanation);
            }
        };

        // 4. Call the provider; any failure degrades to the fallback
        //    under a status naming what went wrong.
        match provider.generate_content(&payload) {
            Ok(explanation) => {
                self.log(bundle, &payload, &explanation, STATUS_OK, started);
                Ok(explanation)
            }
            Err(e) => {
                let status = provider_status(&e);
                tracing::warn!(
                    status,
                    axis = %bundle.primary_axis,
                    "Explanation provider failed, using rules-based wording: {}",
                    e
                );
                let explanation = self.fallback.explain(&payload);
                self.log(bundle, &payload, &explanation, status, started);
                Ok(explanation)
            }
        }
    }

    /// Explains a generated set and attaches each explanation to its
    /// bundle, matching evaluations by primary axis.
    pub fn explain_bundles(
        &self,
        profile: &PatientNeedsProfile,
        bundles: Vec<ScenarioBundle>,
        evaluations: &[AxisEvaluation],
        scores: &AlgorithmScores,
    ) -> Result<Vec<ScenarioBundle>, ExplainError> {
        let mut explained = Vec::with_capacity(bundles.len());
        for bundle in bundles {
            let evaluation = evaluations.iter().find(|e| e.axis == bundle.primary_axis);
            let explanation = self.explain_scenario(profile, &bundle, evaluation, scores)?;
            explained.push(bundle.with_explanation(explanation));
        }
        Ok(explained)
    }

    fn log(
        &self,
        bundle: &ScenarioBundle,
        payload: &ExplanationPayload,
        explanation: &ScenarioExplanation,
        status: &str,
        started: Instant,
    ) {
        let row = ExplanationLog {
            patient_ref: payload.patient_ref.clone(),
            scenario_id: bundle.scenario_id,
            axis: bundle.primary_axis,
            score: payload.axis_score,
            source: explanation.source,
            status: status.to_string(),
            response_time_ms: started.elapsed().as_millis() as u64,
            created_at: Utc::now(),
        };
        self.logger.record(
            BundleEventKind::ExplanationIssued,
            bundle.patient_id,
            Some(bundle.scenario_id),
            Some(bundle.primary_axis),
            &row,
        );
    }
}

fn provider_status(error: &ProviderError) -> &'static str {
    match error {
        ProviderError::Timeout => STATUS_TIMEOUT,
        ProviderError::RateLimited => STATUS_RATE_LIMITED,
        ProviderError::Auth => STATUS_AUTH_FAILED,
        ProviderError::Other(_) => STATUS_ERROR,
    }
}
