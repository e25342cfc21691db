//! Domain 3: bias in the selection of participants into the study.
//!
//! Two provisional severities are computed independently: part A from the
//! timing of follow-up relative to the start of intervention (3.1, 3.2),
//! part B from post-baseline selection criteria (3.3-3.5). Only when one of
//! them reaches SERIOUS does the correction sub-chain (3.6-3.8) come into
//! play; otherwise the final risk is the worse of the two parts.

use super::super::answers::Answer;
use super::super::questions::QuestionId::{self, D3Q1, D3Q2, D3Q3, D3Q4, D3Q5, D3Q6, D3Q7, D3Q8};
use super::{first_match, Judgement, Rule};
use crate::assessment::domain::RiskLevel;
use crate::assessment::domain::RiskLevel::{Critical, Low, Moderate, Serious};

use Answer::{NI, PY, SN, WN, Y};

pub(crate) struct SelectionAnswers {
    pub q3_1: Answer,
    pub q3_2: Answer,
    pub q3_3: Answer,
    pub q3_4: Answer,
    pub q3_5: Answer,
    pub q3_6: Answer,
    pub q3_7: Answer,
    pub q3_8: Answer,
}

impl SelectionAnswers {
    pub(crate) fn collect(eff: impl Fn(QuestionId) -> Answer) -> Self {
        Self {
            q3_1: eff(D3Q1),
            q3_2: eff(D3Q2),
            q3_3: eff(D3Q3),
            q3_4: eff(D3Q4),
            q3_5: eff(D3Q5),
            q3_6: eff(D3Q6),
            q3_7: eff(D3Q7),
            q3_8: eff(D3Q8),
        }
    }
}

/// Part A: did follow-up start with the intervention?
pub(crate) fn follow_up_severity(q3_1: Answer, q3_2: Answer) -> RiskLevel {
    match q3_1 {
        SN | NI => Serious,
        WN => Moderate,
        _ => {
            if matches!(q3_2, Y | PY) {
                Moderate
            } else {
                Low
            }
        }
    }
}

/// Part B: post-baseline selection criteria.
pub(crate) fn selection_criteria_severity(q3_3: Answer, q3_4: Answer, q3_5: Answer) -> RiskLevel {
    if !matches!(q3_3, Y | PY) {
        return Low;
    }
    if matches!(q3_4, Y | PY | NI) && matches!(q3_5, Y | PY) {
        Serious
    } else if matches!(q3_4, Y | PY | NI) {
        Moderate
    } else {
        Low
    }
}

/// Worse of the two provisional parts; drives the 3.6 activation as well as
/// the sub-SERIOUS outcomes.
pub(crate) fn provisional_severity(
    q3_1: Answer,
    q3_2: Answer,
    q3_3: Answer,
    q3_4: Answer,
    q3_5: Answer,
) -> RiskLevel {
    follow_up_severity(q3_1, q3_2).max(selection_criteria_severity(q3_3, q3_4, q3_5))
}

fn provisional(a: &SelectionAnswers) -> RiskLevel {
    provisional_severity(a.q3_1, a.q3_2, a.q3_3, a.q3_4, a.q3_5)
}

fn serious_provisional(a: &SelectionAnswers) -> bool {
    provisional(a) == Serious
}

const RULES: &[Rule<SelectionAnswers>] = &[
    Rule {
        risk: Critical,
        rationale: "Viés de seleção severo identificado, não corrigido pela análise.",
        matches: |a| serious_provisional(a) && matches!(a.q3_8, Y | PY),
    },
    Rule {
        risk: Moderate,
        rationale: "Viés sério de seleção mitigado por correção na análise.",
        matches: |a| serious_provisional(a) && matches!(a.q3_6, Y | PY),
    },
    Rule {
        risk: Moderate,
        rationale: "Análises de sensibilidade indicam impacto mínimo do viés de seleção.",
        matches: |a| serious_provisional(a) && matches!(a.q3_7, Y | PY),
    },
    Rule {
        risk: Serious,
        rationale: "Falha no início do follow-up ou seleção influenciada pelo desfecho, sem correção.",
        matches: serious_provisional,
    },
    Rule {
        risk: Moderate,
        rationale: "Problemas moderados de seleção (início tardio do follow-up ou exclusão de eventos iniciais).",
        matches: |a| provisional(a) == Moderate,
    },
    Rule {
        risk: Low,
        rationale: "Seleção apropriada.",
        matches: |a| provisional(a) == Low,
    },
];

pub(crate) fn evaluate(answers: &SelectionAnswers) -> Option<Judgement> {
    first_match(RULES, answers)
}
