use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use robins::assessment::{
    AlertError, AlertPublisher, AnalysisVariant, Answer, AssessmentId, AssessmentRecord,
    AssessmentStore, RiskAlert, RiskLevel, StoreError,
};
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryAssessmentStore {
    records: Arc<Mutex<HashMap<AssessmentId, AssessmentRecord>>>,
}

impl AssessmentStore for InMemoryAssessmentStore {
    fn insert(&self, record: AssessmentRecord) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(StoreError::Conflict);
        }
        guard.insert(record.id.clone(), record);
        Ok(())
    }

    fn update(&self, record: AssessmentRecord) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        if guard.contains_key(&record.id) {
            guard.insert(record.id.clone(), record);
            Ok(())
        } else {
            Err(StoreError::NotFound)
        }
    }

    fn fetch(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

/// Logs critical findings; a deployment would swap in a mail or review-queue
/// adapter here.
#[derive(Default, Clone)]
pub(crate) struct TracingAlertPublisher;

impl AlertPublisher for TracingAlertPublisher {
    fn publish(&self, alert: RiskAlert) -> Result<(), AlertError> {
        tracing::warn!(
            assessment = %alert.assessment_id.0,
            risk = %alert.risk,
            detail = %alert.detail,
            "critical risk suggested"
        );
        Ok(())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryAlertPublisher {
    events: Arc<Mutex<Vec<RiskAlert>>>,
}

impl InMemoryAlertPublisher {
    pub(crate) fn events(&self) -> Vec<RiskAlert> {
        self.events.lock().expect("alert mutex poisoned").clone()
    }
}

impl AlertPublisher for InMemoryAlertPublisher {
    fn publish(&self, alert: RiskAlert) -> Result<(), AlertError> {
        let mut guard = self.events.lock().expect("alert mutex poisoned");
        guard.push(alert);
        Ok(())
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_variant(raw: &str) -> Result<AnalysisVariant, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "itt" | "intention-to-treat" | "assignment" => Ok(AnalysisVariant::IntentionToTreat),
        "pp" | "per-protocol" | "adherence" => Ok(AnalysisVariant::PerProtocol),
        other => Err(format!(
            "unknown analysis variant '{other}' (expected 'itt' or 'per-protocol')"
        )),
    }
}

pub(crate) fn parse_answer(raw: &str) -> Result<Answer, String> {
    Answer::from_str(raw).map_err(|err| err.to_string())
}

pub(crate) fn parse_risk(raw: &str) -> Result<RiskLevel, String> {
    match raw.trim().to_ascii_uppercase().as_str() {
        "LOW" => Ok(RiskLevel::Low),
        "MODERATE" => Ok(RiskLevel::Moderate),
        "SERIOUS" => Ok(RiskLevel::Serious),
        "CRITICAL" => Ok(RiskLevel::Critical),
        other => Err(format!("unknown risk level '{other}'")),
    }
}
