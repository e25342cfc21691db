//! Domain 2: bias in the classification of interventions.
//!
//! The 2.1-2.3 sub-chain condenses into an entry context describing how well
//! the analysis handled the period before intervention groups became
//! distinguishable (immortal time). The cascade then crosses that context
//! with outcome-driven classification (2.4) and residual errors (2.5).

use super::super::answers::Answer;
use super::super::questions::QuestionId::{self, D2Q1, D2Q2, D2Q3, D2Q4, D2Q5};
use super::{first_match, Judgement, Rule};
use crate::assessment::domain::RiskLevel::{Critical, Low, Moderate, Serious};

use Answer::{N, NI, PN, PY, SY, WY, Y};

pub(crate) struct ClassificationAnswers {
    pub q2_1: Answer,
    pub q2_2: Answer,
    pub q2_3: Answer,
    pub q2_4: Answer,
    pub q2_5: Answer,
}

impl ClassificationAnswers {
    pub(crate) fn collect(eff: impl Fn(QuestionId) -> Answer) -> Self {
        Self {
            q2_1: eff(D2Q1),
            q2_2: eff(D2Q2),
            q2_3: eff(D2Q3),
            q2_4: eff(D2Q4),
            q2_5: eff(D2Q5),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EntryContext {
    /// Distinguishable from the start, events after distinction, or fully
    /// corrected late assignment.
    Safe,
    /// Late assignment only weakly corrected.
    Partial,
    /// Late assignment left uncorrected: immortal time at large.
    Bad,
}

pub(crate) fn entry_context(a: &ClassificationAnswers) -> EntryContext {
    if matches!(a.q2_1, Y | PY) {
        return EntryContext::Safe;
    }
    if matches!(a.q2_2, Y | PY) {
        return EntryContext::Safe;
    }
    match a.q2_3 {
        Answer::SY => EntryContext::Safe,
        Answer::WY => EntryContext::Partial,
        _ => EntryContext::Bad,
    }
}

const RULES: &[Rule<ClassificationAnswers>] = &[
    Rule {
        risk: Critical,
        rationale: "Classificação influenciada substancialmente pelo desfecho.",
        matches: |a| a.q2_4 == SY,
    },
    Rule {
        risk: Critical,
        rationale: "Possível influência do desfecho na classificação, agravada por classificação tardia não corrigida.",
        matches: |a| matches!(a.q2_4, WY | NI) && entry_context(a) != EntryContext::Safe,
    },
    Rule {
        risk: Critical,
        rationale: "Classificação tardia não corrigida combinada com erros adicionais de classificação.",
        matches: |a| entry_context(a) == EntryContext::Bad && matches!(a.q2_5, Y | PY),
    },
    Rule {
        risk: Serious,
        rationale: "Possível influência do desfecho na classificação.",
        matches: |a| matches!(a.q2_4, WY | NI),
    },
    Rule {
        risk: Serious,
        rationale: "Problema de tempo imortal (immortal time bias) não corrigido.",
        matches: |a| entry_context(a) == EntryContext::Bad,
    },
    Rule {
        risk: Moderate,
        rationale: "Correção apenas parcial da classificação tardia das intervenções.",
        matches: |a| entry_context(a) == EntryContext::Partial,
    },
    Rule {
        risk: Moderate,
        rationale: "Erros de classificação não-diferenciais prováveis.",
        matches: |a| matches!(a.q2_5, Y | PY | NI),
    },
    Rule {
        risk: Low,
        rationale: "Classificação bem definida.",
        matches: |a| {
            entry_context(a) == EntryContext::Safe
                && matches!(a.q2_4, N | PN)
                && matches!(a.q2_5, N | PN)
        },
    },
];

pub(crate) fn evaluate(answers: &ClassificationAnswers) -> Option<Judgement> {
    first_match(RULES, answers)
}
