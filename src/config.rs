use std::time::Duration;

use crate::scenario::GenerationOptions;

/// Engine-level constants
pub const ENGINE_NAME: &str = "Caraxis";
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Schema version stamped on every generated needs profile.
pub const PROFILE_SCHEMA_VERSION: u32 = 2;

/// Assessments older than this never contribute to a profile.
pub const DEFAULT_RECENCY_CUTOFF_DAYS: i64 = 365;

/// Per-patient profile cache lifetime.
pub const PROFILE_CACHE_TTL: Duration = Duration::from_secs(3600);

/// Billed rate per visit when no rate is configured for a service type.
pub const DEFAULT_VISIT_RATE: f64 = 65.0;

/// Ingestion settings for the needs-profile builder.
#[derive(Debug, Clone)]
pub struct IngestionConfig {
    /// Assessments older than this many days are ignored.
    pub recency_cutoff_days: i64,
    /// How long a built profile stays cached before recomputation.
    pub cache_ttl: Duration,
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            recency_cutoff_days: DEFAULT_RECENCY_CUTOFF_DAYS,
            cache_ttl: PROFILE_CACHE_TTL,
        }
    }
}

/// Cost-annotation settings.
///
/// The reference cap is a soft weekly-cost benchmark used for narrative
/// framing only; it never blocks a bundle.
#[derive(Debug, Clone)]
pub struct CostConfig {
    pub reference_weekly_cap: f64,
    /// Utilization at or below this fraction of the cap reads as comfortable.
    pub within_cap_threshold: f64,
    /// Utilization at or below this fraction reads as approaching the cap.
    pub near_cap_threshold: f64,
    /// Fallback rate when the rate store has no entry for a service type.
    pub default_visit_rate: f64,
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            reference_weekly_cap: 1050.0,
            within_cap_threshold: 0.85,
            near_cap_threshold: 1.0,
            default_visit_rate: DEFAULT_VISIT_RATE,
        }
    }
}

/// External explanation provider settings.
#[derive(Debug, Clone)]
pub struct ExplainConfig {
    /// When false, every request goes straight to the rules-based explainer.
    pub provider_enabled: bool,
    /// Base URL of the generateContent endpoint.
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    /// Hard bound on the provider call; expiry falls back, never retries.
    pub timeout: Duration,
}

impl Default for ExplainConfig {
    fn default() -> Self {
        Self {
            provider_enabled: false,
            endpoint: String::new(),
            api_key: String::new(),
            model: "gemini-1.5-flash".to_string(),
            timeout: Duration::from_secs(12),
        }
    }
}

/// Aggregated engine configuration. An embedding application configures
/// this one value and hands the pieces to the components it constructs.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub ingestion: IngestionConfig,
    pub cost: CostConfig,
    pub generation: GenerationOptions,
    pub explain: ExplainConfig,
    /// Salt mixed into de-identified reference hashes. Stable within one
    /// deployment; never logged.
    pub reference_salt: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_name_is_caraxis() {
        assert_eq!(ENGINE_NAME, "Caraxis");
    }

    #[test]
    fn default_ingestion_uses_one_year_cutoff() {
        let cfg = IngestionConfig::default();
        assert_eq!(cfg.recency_cutoff_days, 365);
        assert_eq!(cfg.cache_ttl, Duration::from_secs(3600));
    }

    #[test]
    fn default_cost_thresholds_ordered() {
        let cfg = CostConfig::default();
        assert!(cfg.within_cap_threshold < cfg.near_cap_threshold);
        assert!(cfg.reference_weekly_cap > 0.0);
    }

    #[test]
    fn provider_disabled_by_default() {
        assert!(!ExplainConfig::default().provider_enabled);
    }

    #[test]
    fn default_generation_window_is_three_to_five() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.generation.min_scenarios, 3);
        assert_eq!(cfg.generation.max_scenarios, 5);
        assert!(cfg.generation.include_balanced);
    }
}
