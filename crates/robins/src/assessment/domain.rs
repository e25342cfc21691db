use super::answers::Answer;
use super::questions::{BiasDomain, QuestionId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Stored answers, keyed by signalling question. A question absent from the
/// map is unanswered; a suppressed question is never stored at all.
pub type AnswerMap = BTreeMap<QuestionId, Answer>;

/// Ordered severity scale of the instrument. `PENDING` is deliberately not a
/// level here: a domain that cannot be judged yet carries a
/// [`DomainOutcome::Pending`] instead, so severities always compare cleanly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Moderate,
    Serious,
    Critical,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Moderate => "MODERATE",
            RiskLevel::Serious => "SERIOUS",
            RiskLevel::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether the analysed effect is that of assignment (intention-to-treat) or
/// of adhering to the intervention (per-protocol). Selects the Domain 1 rule
/// set and question wording; immutable for the life of an assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisVariant {
    IntentionToTreat,
    PerProtocol,
}

impl AnalysisVariant {
    pub const fn label(self) -> &'static str {
        match self {
            AnalysisVariant::IntentionToTreat => "intention-to-treat",
            AnalysisVariant::PerProtocol => "per-protocol",
        }
    }
}

/// Study-level context captured once, upstream of the six domains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyContext {
    pub study_id: String,
    pub outcome: String,
    pub numeric_result: String,
    pub variant: AnalysisVariant,
    pub assessed_on: NaiveDate,
}

/// Result of running one domain through its completeness gate and rule
/// cascade for the current answer snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainOutcome {
    /// At least one active question is unanswered. Not a fault.
    Pending { missing: Vec<QuestionId> },
    /// The cascade matched; first matching guard wins.
    Judged {
        risk: RiskLevel,
        rationale: &'static str,
    },
    /// Complete answers matched no guard. A rule-set gap, reported apart
    /// from `Pending` and never collapsed into a severity.
    Unmatched { detail: String },
}

impl DomainOutcome {
    pub fn risk(&self) -> Option<RiskLevel> {
        match self {
            DomainOutcome::Judged { risk, .. } => Some(*risk),
            DomainOutcome::Pending { .. } | DomainOutcome::Unmatched { .. } => None,
        }
    }

    pub fn risk_label(&self) -> &'static str {
        match self {
            DomainOutcome::Judged { risk, .. } => risk.label(),
            DomainOutcome::Pending { .. } | DomainOutcome::Unmatched { .. } => "PENDENTE",
        }
    }

    pub fn rationale(&self) -> String {
        match self {
            DomainOutcome::Pending { .. } => "Aguardando respostas...".to_string(),
            DomainOutcome::Judged { rationale, .. } => (*rationale).to_string(),
            DomainOutcome::Unmatched { detail } => format!(
                "Combinação de respostas não prevista pelo algoritmo ({detail}); revisão manual necessária."
            ),
        }
    }

    pub fn is_rule_gap(&self) -> bool {
        matches!(self, DomainOutcome::Unmatched { .. })
    }
}

/// Immutable evaluation record for one domain at one answer snapshot.
/// Recomputed from scratch whenever an upstream answer changes.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainEvaluation {
    pub domain: BiasDomain,
    pub outcome: DomainOutcome,
    /// Answers of the currently active questions only.
    pub answers: AnswerMap,
}

/// The assessor's final overall judgement, recorded alongside (and possibly
/// diverging from) the algorithmic suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalDecision {
    pub risk: RiskLevel,
    pub justification: String,
}
