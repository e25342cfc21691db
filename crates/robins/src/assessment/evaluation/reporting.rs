//! Domain 6: bias in the selection of the reported result.
//!
//! With no pre-specified analysis plan, the cascade counts how many of the
//! three selection surfaces (outcome measures, analyses, subgroups) show
//! positive evidence of selective reporting, and how many are unknowable.

use super::super::answers::Answer;
use super::super::questions::QuestionId::{self, D6Q1, D6Q2, D6Q3, D6Q4};
use super::{first_match, Judgement, Rule};
use crate::assessment::domain::RiskLevel::{Critical, Low, Moderate, Serious};

use Answer::{N, NI, PN, PY, Y};

pub(crate) struct ReportingAnswers {
    pub q6_1: Answer,
    pub q6_2: Answer,
    pub q6_3: Answer,
    pub q6_4: Answer,
}

impl ReportingAnswers {
    pub(crate) fn collect(eff: impl Fn(QuestionId) -> Answer) -> Self {
        Self {
            q6_1: eff(D6Q1),
            q6_2: eff(D6Q2),
            q6_3: eff(D6Q3),
            q6_4: eff(D6Q4),
        }
    }
}

fn selection_signals(a: &ReportingAnswers) -> usize {
    [a.q6_2, a.q6_3, a.q6_4]
        .into_iter()
        .filter(|answer| matches!(answer, Y | PY))
        .count()
}

fn unknowns(a: &ReportingAnswers) -> usize {
    [a.q6_2, a.q6_3, a.q6_4]
        .into_iter()
        .filter(|answer| *answer == NI)
        .count()
}

const RULES: &[Rule<ReportingAnswers>] = &[
    Rule {
        risk: Low,
        rationale: "Resultado relatado conforme plano de análise pré-especificado.",
        matches: |a| matches!(a.q6_1, Y | PY),
    },
    Rule {
        risk: Critical,
        rationale: "Fortes evidências de seleção de resultados (p-hacking) em múltiplos aspectos.",
        matches: |a| selection_signals(a) >= 2,
    },
    Rule {
        risk: Serious,
        rationale: "Evidência de seleção em um aspecto (medida, análise ou subgrupo).",
        matches: |a| selection_signals(a) == 1,
    },
    Rule {
        risk: Serious,
        rationale: "Sem plano de análise e sem informação suficiente para julgar a seleção.",
        matches: |a| unknowns(a) == 3,
    },
    Rule {
        risk: Moderate,
        rationale: "Sem plano de análise e com informações faltando.",
        matches: |a| unknowns(a) > 0,
    },
    Rule {
        risk: Moderate,
        rationale: "Sem plano de análise, mas sem evidências claras de seleção.",
        matches: |a| matches!(a.q6_1, PN | N | NI),
    },
];

pub(crate) fn evaluate(answers: &ReportingAnswers) -> Option<Judgement> {
    first_match(RULES, answers)
}
