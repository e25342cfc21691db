//! ROBINS-I V2 assessment core.
//!
//! Control flow: the screening gate turns an intake into a study context;
//! the dependency resolver decides which signalling questions are active for
//! the answers so far; complete domains run through their rule cascades; the
//! six judged severities aggregate into an overall suggestion; the assessor
//! records a final (possibly overriding) decision; the full record is then
//! handed to report consumers. Every step is a pure function of the current
//! answer snapshot.

pub mod answers;
pub mod domain;
mod evaluation;
pub mod import;
pub mod questions;
pub mod report;
pub mod repository;
mod resolver;
pub mod router;
pub mod screening;
pub mod service;
pub mod session;

#[cfg(test)]
mod tests;

pub use answers::{Answer, ParseAnswerError};
pub use domain::{
    AnalysisVariant, AnswerMap, DomainEvaluation, DomainOutcome, FinalDecision, RiskLevel,
    StudyContext,
};
pub use evaluation::{aggregate, evaluate_domain};
pub use import::{AnswerSheetImportError, AnswerSheetImporter};
pub use questions::{BiasDomain, QuestionId};
pub use report::{
    AssessmentReport, AssessmentStatusView, DomainSection, DomainView, OverallJudgement,
};
pub use repository::{
    AlertError, AlertPublisher, AssessmentId, AssessmentRecord, AssessmentStore, RiskAlert,
    StoreError,
};
pub use resolver::{active_questions, resolve, Resolution};
pub use router::assessment_router;
pub use screening::{ScreeningGate, ScreeningViolation, StudyIntake, TriageAnswers};
pub use service::{AssessmentService, AssessmentServiceError};
pub use session::{Assessment, AssessmentError, AssessmentPolicy};
