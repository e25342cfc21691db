use super::domain::RiskLevel;
use super::session::Assessment;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for opened assessments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssessmentId(pub String);

/// Store record: the session itself plus its identifier. Sessions live only
/// in memory for their evaluation lifetime; there is no durable persistence.
#[derive(Debug, Clone)]
pub struct AssessmentRecord {
    pub id: AssessmentId,
    pub assessment: Assessment,
}

/// Storage abstraction so the service module can be exercised in isolation.
pub trait AssessmentStore: Send + Sync {
    fn insert(&self, record: AssessmentRecord) -> Result<(), StoreError>;
    fn update(&self, record: AssessmentRecord) -> Result<(), StoreError>;
    fn fetch(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Outbound hook for critical findings (e-mail, dashboards, review queues).
pub trait AlertPublisher: Send + Sync {
    fn publish(&self, alert: RiskAlert) -> Result<(), AlertError>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAlert {
    pub assessment_id: AssessmentId,
    pub risk: RiskLevel,
    pub detail: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AlertError {
    #[error("alert transport unavailable: {0}")]
    Transport(String),
}
