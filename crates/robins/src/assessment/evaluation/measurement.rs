//! Domain 5: bias in the measurement of the outcome.

use super::super::answers::Answer;
use super::super::questions::QuestionId::{self, D5Q1, D5Q2, D5Q3};
use super::{first_match, Judgement, Rule};
use crate::assessment::domain::RiskLevel::{Low, Moderate, Serious};

use Answer::{N, NA, NI, PN, PY, SY, WY, Y};

pub(crate) struct MeasurementAnswers {
    pub q5_1: Answer,
    pub q5_2: Answer,
    pub q5_3: Answer,
}

impl MeasurementAnswers {
    pub(crate) fn collect(eff: impl Fn(QuestionId) -> Answer) -> Self {
        Self {
            q5_1: eff(D5Q1),
            q5_2: eff(D5Q2),
            q5_3: eff(D5Q3),
        }
    }
}

const RULES: &[Rule<MeasurementAnswers>] = &[
    Rule {
        risk: Serious,
        rationale: "Métodos de medição do desfecho diferentes entre os grupos.",
        matches: |a| matches!(a.q5_1, Y | PY),
    },
    Rule {
        risk: Serious,
        rationale: "Avaliação subjetiva do desfecho influenciada pelo conhecimento da intervenção.",
        matches: |a| matches!(a.q5_2, Y | PY | NI) && a.q5_3 == SY,
    },
    Rule {
        risk: Moderate,
        rationale: "Possível influência do conhecimento da intervenção sobre o avaliador.",
        matches: |a| matches!(a.q5_2, Y | PY | NI) && matches!(a.q5_3, WY | NI),
    },
    Rule {
        risk: Low,
        rationale: "Avaliador ciente da intervenção, mas desfecho objetivo.",
        matches: |a| matches!(a.q5_2, Y | PY | NI) && matches!(a.q5_3, PN | N | NA),
    },
    Rule {
        risk: Moderate,
        rationale: "Avaliador cego, mas incerteza sobre a comparabilidade dos métodos de medição.",
        matches: |a| matches!(a.q5_2, N | PN) && a.q5_1 == NI,
    },
    Rule {
        risk: Low,
        rationale: "Medição do desfecho objetiva e comparável entre os grupos.",
        matches: |a| matches!(a.q5_2, N | PN) && matches!(a.q5_1, N | PN),
    },
];

pub(crate) fn evaluate(answers: &MeasurementAnswers) -> Option<Judgement> {
    first_match(RULES, answers)
}
