//! Append-only trail of bundle lifecycle events.
//!
//! Every row carries a hashed patient reference and an opaque encoded
//! payload, never raw identifiers or free text about the patient. The
//! trail is best-effort: a sink failure is logged and swallowed so the
//! primary operation still completes.

pub mod hash;

pub use hash::ReferenceHasher;

use std::sync::{Arc, RwLock};

use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::axes::ScenarioAxis;
use crate::enums::str_enum;
use crate::profile::PatientNeedsProfile;
use crate::scenario::ScenarioBundle;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Audit sink lock poisoned")]
    LockFailed,

    #[error("Audit backend failure: {0}")]
    Backend(String),
}

str_enum!(
    /// Lifecycle stage an event row records.
    BundleEventKind {
        ProfileBuilt => "profile_built",
        ScenariosGenerated => "scenarios_generated",
        ScenarioSelected => "scenario_selected",
        ScenarioOutcome => "scenario_outcome",
        ExplanationIssued => "explanation_issued",
    }
);

/// One audit row. `payload_b64` is base64-encoded JSON whose content
/// depends on the event kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleEvent {
    pub event_id: Uuid,
    pub kind: BundleEventKind,
    pub patient_ref: String,
    pub scenario_id: Option<Uuid>,
    pub axis: Option<ScenarioAxis>,
    pub payload_b64: String,
    pub created_at: DateTime<Utc>,
    pub exported: bool,
}

/// Storage seam for the event trail. Rows are append-only; the only
/// mutation is flipping the exported flag after a successful upload.
pub trait EventSink: Send + Sync {
    fn append(&self, event: BundleEvent) -> Result<(), AuditError>;

    /// Rows not yet shipped to the external audit store, oldest first.
    fn unexported(&self) -> Result<Vec<BundleEvent>, AuditError>;

    fn mark_exported(&self, event_ids: &[Uuid]) -> Result<(), AuditError>;
}

/// In-memory sink used in tests and single-process deployments.
pub struct MemoryEventSink {
    events: RwLock<Vec<BundleEvent>>,
}

impl MemoryEventSink {
    pub fn new() -> Self {
        Self {
            events: RwLock::new(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.events.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for MemoryEventSink {
    fn append(&self, event: BundleEvent) -> Result<(), AuditError> {
        let mut events = self.events.write().map_err(|_| AuditError::LockFailed)?;
        events.push(event);
        Ok(())
    }

    fn unexported(&self) -> Result<Vec<BundleEvent>, AuditError> {
        let events = self.events.read().map_err(|_| AuditError::LockFailed)?;
        Ok(events.iter().filter(|e| !e.exported).cloned().collect())
    }

    fn mark_exported(&self, event_ids: &[Uuid]) -> Result<(), AuditError> {
        let mut events = self.events.write().map_err(|_| AuditError::LockFailed)?;
        for event in events.iter_mut() {
            if event_ids.contains(&event.event_id) {
                event.exported = true;
            }
        }
        Ok(())
    }
}

/// Builds and appends event rows. Identifiers are hashed on the way in
/// and payloads are serialized here, so callers only hand over domain
/// values.
pub struct BundleEventLogger {
    sink: Arc<dyn EventSink>,
    hasher: ReferenceHasher,
}

impl BundleEventLogger {
    pub fn new(sink: Arc<dyn EventSink>, hasher: ReferenceHasher) -> Self {
        Self { sink, hasher }
    }

    /// Appends one row. A payload that does not serialize or a sink that
    /// rejects the append is warned about and dropped.
    pub fn record(
        &self,
        kind: BundleEventKind,
        patient_id: Uuid,
        scenario_id: Option<Uuid>,
        axis: Option<ScenarioAxis>,
        payload: &impl Serialize,
    ) {
        let payload_b64 = match serde_json::to_vec(payload) {
            Ok(bytes) => base64::engine::general_purpose::STANDARD.encode(bytes),
            Err(e) => {
                tracing::warn!(kind = %kind, "Audit payload did not serialize: {}", e);
                return;
            }
        };

        let event = BundleEvent {
            event_id: Uuid::new_v4(),
            kind,
            patient_ref: self.hasher.patient_ref(&patient_id),
            scenario_id,
            axis,
            payload_b64,
            created_at: Utc::now(),
            exported: false,
        };

        if let Err(e) = self.sink.append(event) {
            tracing::warn!(kind = %kind, "Audit append failed: {}", e);
        }
    }

    pub fn profile_built(&self, profile: &PatientNeedsProfile) {
        self.record(
            BundleEventKind::ProfileBuilt,
            profile.patient_id,
            None,
            None,
            &serde_json::json!({
                "completeness": profile.completeness,
                "confidence": profile.confidence,
                "needs_cluster": profile.needs_cluster,
                "episode_type": profile.episode_type,
                "missing_field_count": profile.missing_fields.len(),
            }),
        );
    }

    pub fn scenarios_generated(&self, patient_id: Uuid, bundles: &[ScenarioBundle]) {
        let axes: Vec<&str> = bundles.iter().map(|b| b.primary_axis.as_str()).collect();
        self.record(
            BundleEventKind::ScenariosGenerated,
            patient_id,
            None,
            None,
            &serde_json::json!({
                "count": bundles.len(),
                "axes": axes,
                "recommended_axis": bundles.first().map(|b| b.primary_axis),
            }),
        );
    }

    pub fn scenario_selected(&self, bundle: &ScenarioBundle) {
        self.record(
            BundleEventKind::ScenarioSelected,
            bundle.patient_id,
            Some(bundle.scenario_id),
            Some(bundle.primary_axis),
            &serde_json::json!({
                "weekly_cost": bundle.cost.weekly_cost,
                "cost_status": bundle.cost.status,
                "display_order": bundle.display_order,
                "recommended": bundle.recommended,
            }),
        );
    }

    /// Records what became of a presented scenario, e.g. accepted or
    /// declined by the care coordinator.
    pub fn scenario_outcome(
        &self,
        patient_id: Uuid,
        scenario_id: Uuid,
        axis: ScenarioAxis,
        outcome: &str,
    ) {
        self.record(
            BundleEventKind::ScenarioOutcome,
            patient_id,
            Some(scenario_id),
            Some(axis),
            &serde_json::json!({ "outcome": outcome }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logger_with_sink() -> (BundleEventLogger, Arc<MemoryEventSink>) {
        let sink = Arc::new(MemoryEventSink::new());
        let logger = BundleEventLogger::new(sink.clone(), ReferenceHasher::new("unit-salt"));
        (logger, sink)
    }

    // ====== SINK SEMANTICS ======

    #[test]
    fn export_cycle_drains_the_queue() {
        let sink = MemoryEventSink::new();
        let hasher = ReferenceHasher::new("unit-salt");

        for kind in [BundleEventKind::ProfileBuilt, BundleEventKind::ScenariosGenerated] {
            sink.append(BundleEvent {
                event_id: Uuid::new_v4(),
                kind,
                patient_ref: hasher.patient_ref(&Uuid::new_v4()),
                scenario_id: None,
                axis: None,
                payload_b64: String::new(),
                created_at: Utc::now(),
                exported: false,
            })
            .unwrap();
        }

        let pending = sink.unexported().unwrap();
        assert_eq!(pending.len(), 2);

        let ids: Vec<Uuid> = pending.iter().map(|e| e.event_id).collect();
        sink.mark_exported(&ids).unwrap();

        assert!(sink.unexported().unwrap().is_empty());
        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn partial_export_keeps_the_rest_pending() {
        let sink = MemoryEventSink::new();
        let mut ids = Vec::new();
        for _ in 0..3 {
            let id = Uuid::new_v4();
            ids.push(id);
            sink.append(BundleEvent {
                event_id: id,
                kind: BundleEventKind::ScenarioSelected,
                patient_ref: "abcd1234abcd1234".to_string(),
                scenario_id: Some(Uuid::new_v4()),
                axis: Some(ScenarioAxis::SafetyStability),
                payload_b64: String::new(),
                created_at: Utc::now(),
                exported: false,
            })
            .unwrap();
        }

        sink.mark_exported(&ids[..2]).unwrap();

        let pending = sink.unexported().unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].event_id, ids[2]);
    }

    // ====== LOGGER ======

    #[test]
    fn record_hashes_the_patient_id() {
        let (logger, sink) = logger_with_sink();
        let patient_id = Uuid::new_v4();

        logger.record(
            BundleEventKind::ProfileBuilt,
            patient_id,
            None,
            None,
            &serde_json::json!({ "completeness": 0.8 }),
        );

        let events = sink.unexported().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].patient_ref.len(), 16);
        assert!(!events[0].patient_ref.contains(&patient_id.to_string()));
        assert_eq!(
            events[0].patient_ref,
            ReferenceHasher::new("unit-salt").patient_ref(&patient_id)
        );
    }

    #[test]
    fn payload_round_trips_through_base64() {
        let (logger, sink) = logger_with_sink();

        logger.scenario_outcome(
            Uuid::new_v4(),
            Uuid::new_v4(),
            ScenarioAxis::CaregiverRelief,
            "accepted",
        );

        let events = sink.unexported().unwrap();
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(&events[0].payload_b64)
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(value["outcome"], "accepted");
        assert_eq!(events[0].kind, BundleEventKind::ScenarioOutcome);
        assert_eq!(events[0].axis, Some(ScenarioAxis::CaregiverRelief));
    }

    #[test]
    fn sink_failure_is_swallowed() {
        struct RejectingSink;

        impl EventSink for RejectingSink {
            fn append(&self, _event: BundleEvent) -> Result<(), AuditError> {
                Err(AuditError::Backend("disk full".to_string()))
            }

            fn unexported(&self) -> Result<Vec<BundleEvent>, AuditError> {
                Ok(Vec::new())
            }

            fn mark_exported(&self, _event_ids: &[Uuid]) -> Result<(), AuditError> {
                Ok(())
            }
        }

        let logger =
            BundleEventLogger::new(Arc::new(RejectingSink), ReferenceHasher::new("unit-salt"));

        // Must not panic or propagate.
        logger.scenario_outcome(
            Uuid::new_v4(),
            Uuid::new_v4(),
            ScenarioAxis::Balanced,
            "declined",
        );
    }

    #[test]
    fn event_kind_tags_are_stable() {
        assert_eq!(BundleEventKind::ProfileBuilt.as_str(), "profile_built");
        assert_eq!(
            BundleEventKind::ExplanationIssued.as_str(),
            "explanation_issued"
        );
        assert_eq!(
            "scenario_outcome".parse::<BundleEventKind>().unwrap(),
            BundleEventKind::ScenarioOutcome
        );
    }
}
