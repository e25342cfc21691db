//! Question dependency resolver.
//!
//! Each domain defines a static dependency tree over its signalling
//! questions: answering an upstream question can activate or retract
//! downstream ones. Activity is a pure function of the analysis variant and
//! the answers so far, so it is recomputed after every change. A question
//! outside the active set is `NA` by definition for rule purposes, no matter
//! what was ever stored for it.

use super::answers::Answer;
use super::domain::{AnalysisVariant, AnswerMap, RiskLevel};
use super::evaluation::selection;
use super::questions::{BiasDomain, QuestionId};

use Answer::{N, NI, PN, PY, SN, WN, Y};
use QuestionId::*;

/// Active questions of one domain, split into answered and still-missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub active: Vec<QuestionId>,
    pub missing: Vec<QuestionId>,
}

impl Resolution {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Convenience wrapper over [`resolve`] when only the active set matters.
pub fn active_questions(
    domain: BiasDomain,
    variant: AnalysisVariant,
    answers: &AnswerMap,
) -> Vec<QuestionId> {
    resolve(domain, variant, answers).active
}

pub fn resolve(domain: BiasDomain, variant: AnalysisVariant, answers: &AnswerMap) -> Resolution {
    let given = |question: QuestionId| answers.get(&question).copied();
    let active = match domain {
        BiasDomain::Confounding => match variant {
            AnalysisVariant::IntentionToTreat => confounding_itt(&given),
            AnalysisVariant::PerProtocol => confounding_per_protocol(&given),
        },
        BiasDomain::InterventionClassification => classification(&given),
        BiasDomain::Selection => selection_domain(&given),
        BiasDomain::MissingData => missing_data(&given),
        BiasDomain::OutcomeMeasurement => vec![D5Q1, D5Q2, D5Q3],
        BiasDomain::SelectiveReporting => vec![D6Q1, D6Q2, D6Q3, D6Q4],
    };

    let missing = active
        .iter()
        .copied()
        .filter(|question| !answers.contains_key(question))
        .collect();

    Resolution { active, missing }
}

/// Effective answer for rule purposes: `NA` when the question is not active,
/// the stored code otherwise.
pub(crate) fn effective(
    question: QuestionId,
    active: &[QuestionId],
    answers: &AnswerMap,
) -> Answer {
    if !active.contains(&question) {
        return Answer::NA;
    }
    answers.get(&question).copied().unwrap_or(Answer::NA)
}

fn confounding_itt(given: &impl Fn(QuestionId) -> Option<Answer>) -> Vec<QuestionId> {
    let mut active = vec![D1Q1];
    if matches!(given(D1Q1), Some(Y | PY | WN)) {
        active.push(D1Q2);
        active.push(D1Q3);
    }
    active.push(D1Q4);
    active
}

fn confounding_per_protocol(given: &impl Fn(QuestionId) -> Option<Answer>) -> Vec<QuestionId> {
    let mut active = vec![D1Q1];
    match given(D1Q1) {
        Some(Y | PY) => {
            active.push(D1Q2);
            if matches!(given(D1Q2), Some(Y | PY | WN)) {
                active.push(D1Q3);
            }
        }
        Some(N | PN | NI) => active.push(D1Q4),
        _ => {}
    }
    active.push(D1Q5);
    active
}

fn classification(given: &impl Fn(QuestionId) -> Option<Answer>) -> Vec<QuestionId> {
    let mut active = vec![D2Q1];
    if matches!(given(D2Q1), Some(N | PN | NI)) {
        active.push(D2Q2);
        if matches!(given(D2Q2), Some(N | PN | NI)) {
            active.push(D2Q3);
        }
    }
    active.push(D2Q4);
    active.push(D2Q5);
    active
}

fn selection_domain(given: &impl Fn(QuestionId) -> Option<Answer>) -> Vec<QuestionId> {
    let mut active = vec![D3Q1];
    if matches!(given(D3Q1), Some(Y | PY)) {
        active.push(D3Q2);
    }
    active.push(D3Q3);
    if matches!(given(D3Q3), Some(Y | PY)) {
        active.push(D3Q4);
        if matches!(given(D3Q4), Some(Y | PY | NI)) {
            active.push(D3Q5);
        }
    }

    // The correction sub-chain only opens once the provisional severity from
    // 3.1-3.5 is known and reaches SERIOUS.
    if let Some(provisional) = provisional_selection_severity(&active, given) {
        if provisional == RiskLevel::Serious {
            active.push(D3Q6);
            if matches!(given(D3Q6), Some(N | PN | NI)) {
                active.push(D3Q7);
                if matches!(given(D3Q7), Some(N | PN | NI)) {
                    active.push(D3Q8);
                }
            }
        }
    }

    active
}

fn provisional_selection_severity(
    active: &[QuestionId],
    given: &impl Fn(QuestionId) -> Option<Answer>,
) -> Option<RiskLevel> {
    let answered = |question: QuestionId| -> Option<Answer> {
        if active.contains(&question) {
            given(question)
        } else {
            Some(Answer::NA)
        }
    };

    let q3_1 = answered(D3Q1)?;
    let q3_2 = answered(D3Q2)?;
    let q3_3 = answered(D3Q3)?;
    let q3_4 = answered(D3Q4)?;
    let q3_5 = answered(D3Q5)?;

    Some(selection::provisional_severity(q3_1, q3_2, q3_3, q3_4, q3_5))
}

fn missing_data(given: &impl Fn(QuestionId) -> Option<Answer>) -> Vec<QuestionId> {
    let mut active = vec![D4Q1, D4Q2, D4Q3];

    let incomplete = [D4Q1, D4Q2, D4Q3]
        .into_iter()
        .any(|question| matches!(given(question), Some(N | PN | NI)));
    if !incomplete {
        return active;
    }
    active.push(D4Q4);

    match given(D4Q4) {
        Some(Y | PY | NI) => {
            active.push(D4Q5);
            if matches!(given(D4Q5), Some(Y | PY | NI)) {
                active.push(D4Q6);
            }
        }
        Some(N | PN) => {
            active.push(D4Q7);
            match given(D4Q7) {
                Some(Y | PY) => {
                    active.push(D4Q8);
                    active.push(D4Q9);
                }
                Some(N | PN | NI) => active.push(D4Q10),
                _ => {}
            }
        }
        _ => {}
    }

    // The robustness question only appears after a weak or strong negative
    // signal somewhere in the prior chain.
    let weak_or_strong = |question: QuestionId, codes: &[Answer]| {
        active.contains(&question)
            && given(question).map(|answer| codes.contains(&answer)) == Some(true)
    };
    let negative_signal = weak_or_strong(D4Q6, &[WN, SN, NI])
        || weak_or_strong(D4Q8, &[N, PN, NI])
        || weak_or_strong(D4Q9, &[WN, SN, NI])
        || weak_or_strong(D4Q10, &[WN, SN, NI]);
    if negative_signal {
        active.push(D4Q11);
    }

    active
}
