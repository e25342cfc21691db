use super::answers::Answer;
use super::domain::{
    AnswerMap, DomainEvaluation, FinalDecision, RiskLevel, StudyContext,
};
use super::evaluation::{aggregate, evaluate_domain};
use super::questions::{BiasDomain, QuestionId};
use super::resolver;

/// Knobs governing the override recorder. The instrument's guidance calls a
/// justification mandatory whenever the assessor departs from the suggested
/// level; this makes that a hard validation, with an escape hatch for teams
/// that want the lenient behaviour.
#[derive(Debug, Clone)]
pub struct AssessmentPolicy {
    pub require_override_justification: bool,
}

impl Default for AssessmentPolicy {
    fn default() -> Self {
        Self {
            require_override_justification: true,
        }
    }
}

/// Error raised at the session boundary. Incomplete input is *not* here: an
/// unanswered active question simply leaves its domain pending.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AssessmentError {
    #[error("question {0} is not active for the current answer set")]
    InactiveQuestion(QuestionId),
    #[error("answer {answer} is not allowed for question {question}")]
    DisallowedAnswer {
        question: QuestionId,
        answer: Answer,
    },
    #[error("assessment incomplete: domains {0:?} are still pending")]
    EvaluationPending(Vec<BiasDomain>),
    #[error("a justification is required when overriding the suggested risk level")]
    JustificationRequired,
}

/// One in-memory evaluation session for a single study outcome.
///
/// All six domain records are recomputed from the answer map on every
/// change, so they are always consistent with the current snapshot; nothing
/// is cached across mutations.
#[derive(Debug, Clone)]
pub struct Assessment {
    context: StudyContext,
    answers: AnswerMap,
    evaluations: Vec<DomainEvaluation>,
    decision: Option<FinalDecision>,
}

impl Assessment {
    pub fn new(context: StudyContext) -> Self {
        let evaluations = BiasDomain::ordered()
            .into_iter()
            .map(|domain| evaluate_domain(domain, context.variant, &AnswerMap::new()))
            .collect();

        Self {
            context,
            answers: AnswerMap::new(),
            evaluations,
            decision: None,
        }
    }

    pub fn context(&self) -> &StudyContext {
        &self.context
    }

    pub fn answer(&self, question: QuestionId) -> Option<Answer> {
        self.answers.get(&question).copied()
    }

    /// Whether the question is currently collectable.
    pub fn is_active(&self, question: QuestionId) -> bool {
        resolver::active_questions(question.domain(), self.context.variant, &self.answers)
            .contains(&question)
    }

    /// Record an answer. Only active questions are legal keys, and only
    /// codes from the question's allowed set are accepted; both checks run
    /// before anything is stored, so a rule cascade can never observe an
    /// invalid code. Any downstream answers retracted by this change are
    /// dropped and their questions must be re-asked.
    pub fn submit(&mut self, question: QuestionId, answer: Answer) -> Result<(), AssessmentError> {
        if !question.allowed(self.context.variant).contains(&answer) {
            return Err(AssessmentError::DisallowedAnswer { question, answer });
        }
        if !self.is_active(question) {
            return Err(AssessmentError::InactiveQuestion(question));
        }

        self.answers.insert(question, answer);
        self.refresh(question.domain());
        Ok(())
    }

    /// Withdraw an answer (the "Selecione..." reset of the original form).
    pub fn retract(&mut self, question: QuestionId) {
        if self.answers.remove(&question).is_some() {
            self.refresh(question.domain());
        }
    }

    fn refresh(&mut self, domain: BiasDomain) {
        self.prune(domain);
        self.evaluations[domain.index()] =
            evaluate_domain(domain, self.context.variant, &self.answers);
        // Any change to the snapshot invalidates a previously recorded
        // overall decision along with the suggestion it was based on.
        self.decision = None;
    }

    /// Drop stored answers whose questions are no longer active. Removing a
    /// stale answer can retract further dependents, so iterate to a fixpoint.
    fn prune(&mut self, domain: BiasDomain) {
        loop {
            let active =
                resolver::active_questions(domain, self.context.variant, &self.answers);
            let stale: Vec<QuestionId> = self
                .answers
                .keys()
                .copied()
                .filter(|question| question.domain() == domain && !active.contains(question))
                .collect();
            if stale.is_empty() {
                break;
            }
            for question in stale {
                self.answers.remove(&question);
            }
        }
    }

    pub fn evaluations(&self) -> &[DomainEvaluation] {
        &self.evaluations
    }

    pub fn evaluation(&self, domain: BiasDomain) -> &DomainEvaluation {
        &self.evaluations[domain.index()]
    }

    pub fn pending_domains(&self) -> Vec<BiasDomain> {
        self.evaluations
            .iter()
            .filter(|evaluation| evaluation.outcome.risk().is_none())
            .map(|evaluation| evaluation.domain)
            .collect()
    }

    /// Algorithmic overall suggestion; `None` while any domain is pending
    /// (or stuck on a rule gap).
    pub fn suggested_risk(&self) -> Option<RiskLevel> {
        let mut risks = Vec::with_capacity(self.evaluations.len());
        for evaluation in &self.evaluations {
            risks.push(evaluation.outcome.risk()?);
        }
        Some(aggregate(&risks))
    }

    /// Record the assessor's final judgement. The manual level is free to
    /// disagree with the suggestion, but (policy permitting) not silently.
    pub fn record_decision(
        &mut self,
        risk: RiskLevel,
        justification: impl Into<String>,
        policy: &AssessmentPolicy,
    ) -> Result<(), AssessmentError> {
        let suggested = self
            .suggested_risk()
            .ok_or_else(|| AssessmentError::EvaluationPending(self.pending_domains()))?;

        let justification = justification.into();
        if policy.require_override_justification
            && risk != suggested
            && justification.trim().is_empty()
        {
            return Err(AssessmentError::JustificationRequired);
        }

        self.decision = Some(FinalDecision {
            risk,
            justification,
        });
        Ok(())
    }

    pub fn decision(&self) -> Option<&FinalDecision> {
        self.decision.as_ref()
    }
}
