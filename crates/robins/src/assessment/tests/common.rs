use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::assessment::answers::Answer;
use crate::assessment::domain::{AnalysisVariant, AnswerMap, StudyContext};
use crate::assessment::questions::QuestionId;
use crate::assessment::repository::{
    AlertError, AlertPublisher, AssessmentId, AssessmentRecord, AssessmentStore, RiskAlert,
    StoreError,
};
use crate::assessment::screening::{StudyIntake, TriageAnswers};
use crate::assessment::service::AssessmentService;
use crate::assessment::session::{Assessment, AssessmentPolicy};

pub(super) fn context(variant: AnalysisVariant) -> StudyContext {
    StudyContext {
        study_id: "Siqueira 2024".to_string(),
        outcome: "Mortalidade".to_string(),
        numeric_result: "RR 1.5 (IC95% 1.1-2.0)".to_string(),
        variant,
        assessed_on: NaiveDate::from_ymd_opt(2025, 11, 20).expect("valid date"),
    }
}

pub(super) fn intake() -> StudyIntake {
    StudyIntake {
        study_id: "Siqueira 2024".to_string(),
        outcome: "Mortalidade".to_string(),
        numeric_result: "RR 1.5 (IC95% 1.1-2.0)".to_string(),
        triage: TriageAnswers {
            attempted_confounding_control: Answer::Y,
            confounding_beyond_salvage: None,
            inadequate_measurement: Answer::N,
        },
        variant: AnalysisVariant::IntentionToTreat,
        assessed_on: NaiveDate::from_ymd_opt(2025, 11, 20).expect("valid date"),
    }
}

pub(super) fn answers(pairs: &[(QuestionId, Answer)]) -> AnswerMap {
    pairs.iter().copied().collect()
}

pub(super) fn assessment(variant: AnalysisVariant) -> Assessment {
    Assessment::new(context(variant))
}

pub(super) fn submit_all(assessment: &mut Assessment, pairs: &[(QuestionId, Answer)]) {
    for (question, answer) in pairs {
        assessment
            .submit(*question, *answer)
            .unwrap_or_else(|error| panic!("submitting {question}={answer} failed: {error}"));
    }
}

/// A complete low-ish ITT answer set used by session and routing tests:
/// D1 MODERATE, D2 LOW, D3 MODERATE, D4 LOW, D5 LOW, D6 MODERATE,
/// aggregating to SERIOUS via the three-moderates escalation.
pub(super) fn scripted_itt_answers() -> Vec<(QuestionId, Answer)> {
    use QuestionId::*;
    vec![
        (D1Q1, Answer::WN),
        (D1Q2, Answer::Y),
        (D1Q3, Answer::N),
        (D1Q4, Answer::N),
        (D2Q1, Answer::Y),
        (D2Q4, Answer::N),
        (D2Q5, Answer::N),
        (D3Q1, Answer::WN),
        (D3Q3, Answer::N),
        (D4Q1, Answer::Y),
        (D4Q2, Answer::Y),
        (D4Q3, Answer::Y),
        (D5Q1, Answer::N),
        (D5Q2, Answer::N),
        (D5Q3, Answer::NA),
        (D6Q1, Answer::N),
        (D6Q2, Answer::N),
        (D6Q3, Answer::N),
        (D6Q4, Answer::NI),
    ]
}

pub(super) fn policy() -> AssessmentPolicy {
    AssessmentPolicy::default()
}

pub(super) fn lenient_policy() -> AssessmentPolicy {
    AssessmentPolicy {
        require_override_justification: false,
    }
}

pub(super) fn build_service() -> (
    AssessmentService<MemoryStore, MemoryAlerts>,
    Arc<MemoryStore>,
    Arc<MemoryAlerts>,
) {
    let store = Arc::new(MemoryStore::default());
    let alerts = Arc::new(MemoryAlerts::default());
    let service = AssessmentService::new(store.clone(), alerts.clone(), policy());
    (service, store, alerts)
}

#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    records: Arc<Mutex<HashMap<AssessmentId, AssessmentRecord>>>,
}

impl AssessmentStore for MemoryStore {
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
        guard.insert(record.id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryAlerts {
    events: Arc<Mutex<Vec<RiskAlert>>>,
}

impl MemoryAlerts {
    pub(super) fn events(&self) -> Vec<RiskAlert> {
        self.events.lock().expect("alert mutex poisoned").clone()
    }
}

impl AlertPublisher for MemoryAlerts {
    fn publish(&self, alert: RiskAlert) -> Result<(), AlertError> {
        self.events
            .lock()
            .expect("alert mutex poisoned")
            .push(alert);
        Ok(())
    }
}

pub(super) struct UnavailableStore;

impl AssessmentStore for UnavailableStore {
    fn insert(&self, _record: AssessmentRecord) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: AssessmentRecord) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &AssessmentId) -> Result<Option<AssessmentRecord>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn assessment_router_with_service(
    service: AssessmentService<MemoryStore, MemoryAlerts>,
) -> axum::Router {
    crate::assessment::router::assessment_router(Arc::new(service))
}
