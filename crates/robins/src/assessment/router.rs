use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::answers::Answer;
use super::domain::RiskLevel;
use super::questions::QuestionId;
use super::repository::{AlertPublisher, AssessmentId, AssessmentStore, StoreError};
use super::screening::StudyIntake;
use super::service::{AssessmentService, AssessmentServiceError};
use super::session::AssessmentError;

/// Router builder exposing HTTP endpoints for the assessment lifecycle.
pub fn assessment_router<S, A>(service: Arc<AssessmentService<S, A>>) -> Router
where
    S: AssessmentStore + 'static,
    A: AlertPublisher + 'static,
{
    Router::new()
        .route("/api/v1/assessments", post(open_handler::<S, A>))
        .route("/api/v1/assessments/:assessment_id", get(status_handler::<S, A>))
        .route(
            "/api/v1/assessments/:assessment_id/answers",
            post(answer_handler::<S, A>),
        )
        .route(
            "/api/v1/assessments/:assessment_id/decision",
            post(decision_handler::<S, A>),
        )
        .route(
            "/api/v1/assessments/:assessment_id/report",
            get(report_handler::<S, A>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct AnswerSubmission {
    pub question: QuestionId,
    pub answer: Answer,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DecisionSubmission {
    pub risk: RiskLevel,
    #[serde(default)]
    pub justification: String,
}

pub(crate) async fn open_handler<S, A>(
    State(service): State<Arc<AssessmentService<S, A>>>,
    axum::Json(intake): axum::Json<StudyIntake>,
) -> Response
where
    S: AssessmentStore + 'static,
    A: AlertPublisher + 'static,
{
    match service.open(intake) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record.status_view())).into_response(),
        Err(AssessmentServiceError::Screening(violation)) => {
            let payload = json!({ "error": violation.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(AssessmentServiceError::Store(StoreError::Conflict)) => {
            let payload = json!({ "error": "assessment already exists" });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn status_handler<S, A>(
    State(service): State<Arc<AssessmentService<S, A>>>,
    Path(assessment_id): Path<String>,
) -> Response
where
    S: AssessmentStore + 'static,
    A: AlertPublisher + 'static,
{
    let id = AssessmentId(assessment_id);
    match service.get(&id) {
        Ok(record) => (StatusCode::OK, axum::Json(record.status_view())).into_response(),
        Err(AssessmentServiceError::Store(StoreError::NotFound)) => not_found(&id),
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn answer_handler<S, A>(
    State(service): State<Arc<AssessmentService<S, A>>>,
    Path(assessment_id): Path<String>,
    axum::Json(submission): axum::Json<AnswerSubmission>,
) -> Response
where
    S: AssessmentStore + 'static,
    A: AlertPublisher + 'static,
{
    let id = AssessmentId(assessment_id);
    match service.submit_answer(&id, submission.question, submission.answer) {
        Ok(record) => {
            let view = record.domain_view(submission.question.domain());
            let payload = json!({
                "domain": view,
                "suggested_risk": record.assessment.suggested_risk().map(|risk| risk.label()),
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(AssessmentServiceError::Store(StoreError::NotFound)) => not_found(&id),
        Err(AssessmentServiceError::Assessment(error)) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn decision_handler<S, A>(
    State(service): State<Arc<AssessmentService<S, A>>>,
    Path(assessment_id): Path<String>,
    axum::Json(submission): axum::Json<DecisionSubmission>,
) -> Response
where
    S: AssessmentStore + 'static,
    A: AlertPublisher + 'static,
{
    let id = AssessmentId(assessment_id);
    match service.record_decision(&id, submission.risk, submission.justification) {
        Ok(record) => (StatusCode::OK, axum::Json(record.status_view())).into_response(),
        Err(AssessmentServiceError::Store(StoreError::NotFound)) => not_found(&id),
        Err(AssessmentServiceError::Assessment(AssessmentError::EvaluationPending(domains))) => {
            let payload = json!({
                "error": "assessment incomplete",
                "pending_domains": domains,
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(AssessmentServiceError::Assessment(error)) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn report_handler<S, A>(
    State(service): State<Arc<AssessmentService<S, A>>>,
    Path(assessment_id): Path<String>,
) -> Response
where
    S: AssessmentStore + 'static,
    A: AlertPublisher + 'static,
{
    let id = AssessmentId(assessment_id);
    match service.report(&id) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(AssessmentServiceError::Store(StoreError::NotFound)) => not_found(&id),
        Err(AssessmentServiceError::Assessment(AssessmentError::EvaluationPending(domains))) => {
            let payload = json!({
                "error": "assessment incomplete",
                "pending_domains": domains,
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => internal_error(other),
    }
}

fn not_found(id: &AssessmentId) -> Response {
    let payload = json!({
        "assessment_id": id.0,
        "error": "assessment not found",
    });
    (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
}

fn internal_error(error: AssessmentServiceError) -> Response {
    let payload = json!({ "error": error.to_string() });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
