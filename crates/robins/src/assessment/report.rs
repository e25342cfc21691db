//! Serializable views of an assessment, consumed by the HTTP layer and by
//! external report generators. The exporter contract is all-or-nothing: a
//! full report is only produced once every domain has been judged.

use super::domain::{AnalysisVariant, DomainEvaluation, FinalDecision};
use super::questions::BiasDomain;
use super::repository::{AssessmentId, AssessmentRecord};
use super::session::AssessmentError;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Per-domain slice of the current session state.
#[derive(Debug, Clone, Serialize)]
pub struct DomainView {
    pub domain: BiasDomain,
    pub domain_label: &'static str,
    pub risk: &'static str,
    pub rationale: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub rule_gap: bool,
    pub answers: BTreeMap<&'static str, &'static str>,
}

impl DomainView {
    fn from_evaluation(evaluation: &DomainEvaluation) -> Self {
        Self {
            domain: evaluation.domain,
            domain_label: evaluation.domain.label(),
            risk: evaluation.outcome.risk_label(),
            rationale: evaluation.outcome.rationale(),
            rule_gap: evaluation.outcome.is_rule_gap(),
            answers: evaluation
                .answers
                .iter()
                .map(|(question, answer)| (question.code(), answer.label()))
                .collect(),
        }
    }
}

/// Sanitized status of an assessment, safe to expose while incomplete.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentStatusView {
    pub assessment_id: AssessmentId,
    pub study_id: String,
    pub variant: AnalysisVariant,
    pub domains: Vec<DomainView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_risk: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision: Option<FinalDecisionView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FinalDecisionView {
    pub risk: &'static str,
    pub justification: String,
}

impl FinalDecisionView {
    fn from_decision(decision: &FinalDecision) -> Self {
        Self {
            risk: decision.risk.label(),
            justification: decision.justification.clone(),
        }
    }
}

/// Study header echoed at the top of every exported document.
#[derive(Debug, Clone, Serialize)]
pub struct StudyHeader {
    pub study_id: String,
    pub outcome: String,
    pub numeric_result: String,
    pub variant: &'static str,
    pub assessed_on: NaiveDate,
}

#[derive(Debug, Clone, Serialize)]
pub struct OverallJudgement {
    pub suggested_risk: &'static str,
    pub final_risk: &'static str,
    pub final_justification: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnsweredQuestion {
    pub code: &'static str,
    pub prompt: &'static str,
    pub answer: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct DomainSection {
    pub number: u8,
    pub label: &'static str,
    pub risk: &'static str,
    pub rationale: String,
    pub answers: Vec<AnsweredQuestion>,
}

/// The complete record handed to report generators: header, overall
/// judgement, and the six domain breakdowns.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentReport {
    pub assessment_id: AssessmentId,
    pub study: StudyHeader,
    pub overall: OverallJudgement,
    pub domains: Vec<DomainSection>,
}

impl AssessmentRecord {
    pub fn status_view(&self) -> AssessmentStatusView {
        let context = self.assessment.context();
        AssessmentStatusView {
            assessment_id: self.id.clone(),
            study_id: context.study_id.clone(),
            variant: context.variant,
            domains: self
                .assessment
                .evaluations()
                .iter()
                .map(DomainView::from_evaluation)
                .collect(),
            suggested_risk: self.assessment.suggested_risk().map(|risk| risk.label()),
            decision: self.assessment.decision().map(FinalDecisionView::from_decision),
        }
    }

    pub fn domain_view(&self, domain: BiasDomain) -> DomainView {
        DomainView::from_evaluation(self.assessment.evaluation(domain))
    }

    /// Assemble the full report, or refuse while any domain is pending.
    /// With no recorded decision the manual judgement defaults to the
    /// algorithmic suggestion with an empty justification.
    pub fn report(&self) -> Result<AssessmentReport, AssessmentError> {
        let suggested = self
            .assessment
            .suggested_risk()
            .ok_or_else(|| AssessmentError::EvaluationPending(self.assessment.pending_domains()))?;
        let decision = self.assessment.decision().cloned().unwrap_or(FinalDecision {
            risk: suggested,
            justification: String::new(),
        });

        let context = self.assessment.context();
        let domains = self
            .assessment
            .evaluations()
            .iter()
            .map(|evaluation| DomainSection {
                number: evaluation.domain.number(),
                label: evaluation.domain.label(),
                risk: evaluation.outcome.risk_label(),
                rationale: evaluation.outcome.rationale(),
                answers: evaluation
                    .answers
                    .iter()
                    .map(|(question, answer)| AnsweredQuestion {
                        code: question.code(),
                        prompt: question.prompt(context.variant),
                        answer: answer.label(),
                    })
                    .collect(),
            })
            .collect();

        Ok(AssessmentReport {
            assessment_id: self.id.clone(),
            study: StudyHeader {
                study_id: context.study_id.clone(),
                outcome: context.outcome.clone(),
                numeric_result: context.numeric_result.clone(),
                variant: context.variant.label(),
                assessed_on: context.assessed_on,
            },
            overall: OverallJudgement {
                suggested_risk: suggested.label(),
                final_risk: decision.risk.label(),
                final_justification: decision.justification,
            },
            domains,
        })
    }
}
