use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::answers::Answer;
use super::domain::RiskLevel;
use super::questions::QuestionId;
use super::report::AssessmentReport;
use super::repository::{
    AlertError, AlertPublisher, AssessmentId, AssessmentRecord, AssessmentStore, RiskAlert,
    StoreError,
};
use super::screening::{ScreeningGate, ScreeningViolation, StudyIntake};
use super::session::{Assessment, AssessmentError, AssessmentPolicy};

/// Service composing the screening gate, session store, alert hook, and
/// override policy.
pub struct AssessmentService<S, A> {
    gate: ScreeningGate,
    store: Arc<S>,
    alerts: Arc<A>,
    policy: AssessmentPolicy,
}

static ASSESSMENT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_assessment_id() -> AssessmentId {
    let id = ASSESSMENT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    AssessmentId(format!("rob-{id:06}"))
}

impl<S, A> AssessmentService<S, A>
where
    S: AssessmentStore + 'static,
    A: AlertPublisher + 'static,
{
    pub fn new(store: Arc<S>, alerts: Arc<A>, policy: AssessmentPolicy) -> Self {
        Self {
            gate: ScreeningGate,
            store,
            alerts,
            policy,
        }
    }

    /// Open a new assessment, provided the intake survives triage.
    pub fn open(&self, intake: StudyIntake) -> Result<AssessmentRecord, AssessmentServiceError> {
        let context = self.gate.context_from_intake(intake)?;
        let record = AssessmentRecord {
            id: next_assessment_id(),
            assessment: Assessment::new(context),
        };
        self.store.insert(record.clone())?;
        Ok(record)
    }

    /// Submit one answer and persist the recomputed session.
    ///
    /// Publishes a [`RiskAlert`] whenever this change pushes the overall
    /// suggestion up to CRITICAL.
    pub fn submit_answer(
        &self,
        id: &AssessmentId,
        question: QuestionId,
        answer: Answer,
    ) -> Result<AssessmentRecord, AssessmentServiceError> {
        let mut record = self.fetch(id)?;
        let before = record.assessment.suggested_risk();
        record.assessment.submit(question, answer)?;
        let after = record.assessment.suggested_risk();
        self.store.update(record.clone())?;

        let evaluation = record.assessment.evaluation(question.domain());
        if evaluation.outcome.is_rule_gap() {
            tracing::warn!(
                assessment = %record.id.0,
                domain = %question.domain(),
                "rule cascade fell through on complete answers; manual review required"
            );
        }

        if after == Some(RiskLevel::Critical) && before != Some(RiskLevel::Critical) {
            self.alerts.publish(RiskAlert {
                assessment_id: record.id.clone(),
                risk: RiskLevel::Critical,
                detail: "suggested overall risk reached CRITICAL".to_string(),
            })?;
        }

        Ok(record)
    }

    /// Record the assessor's final overall judgement.
    pub fn record_decision(
        &self,
        id: &AssessmentId,
        risk: RiskLevel,
        justification: String,
    ) -> Result<AssessmentRecord, AssessmentServiceError> {
        let mut record = self.fetch(id)?;
        record
            .assessment
            .record_decision(risk, justification, &self.policy)?;
        self.store.update(record.clone())?;
        Ok(record)
    }

    pub fn get(&self, id: &AssessmentId) -> Result<AssessmentRecord, AssessmentServiceError> {
        Ok(self.fetch(id)?)
    }

    /// Full record for the exporter; refuses partial sessions.
    pub fn report(&self, id: &AssessmentId) -> Result<AssessmentReport, AssessmentServiceError> {
        let record = self.fetch(id)?;
        Ok(record.report()?)
    }

    fn fetch(&self, id: &AssessmentId) -> Result<AssessmentRecord, StoreError> {
        self.store.fetch(id)?.ok_or(StoreError::NotFound)
    }
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error(transparent)]
    Screening(#[from] ScreeningViolation),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Assessment(#[from] AssessmentError),
    #[error(transparent)]
    Alert(#[from] AlertError),
}
