//! Domain 1: bias due to confounding.
//!
//! Two structurally different cascades share this module. Which one runs is
//! fixed by the study context: the intention-to-treat variant reasons about
//! baseline control plus negative controls, the per-protocol variant about
//! time-varying confounding methods (g-methods) and collider adjustment.

use super::super::answers::Answer;
use super::super::questions::QuestionId::{self, D1Q1, D1Q2, D1Q3, D1Q4, D1Q5};
use super::{first_match, Judgement, Rule};
use crate::assessment::domain::RiskLevel::{Critical, Low, Moderate, Serious};

use Answer::{N, NA, NI, PN, PY, SN, WN, Y};

pub(crate) struct IttAnswers {
    pub q1_1: Answer,
    pub q1_2: Answer,
    pub q1_3: Answer,
    pub q1_4: Answer,
}

impl IttAnswers {
    pub(crate) fn collect(eff: impl Fn(QuestionId) -> Answer) -> Self {
        Self {
            q1_1: eff(D1Q1),
            q1_2: eff(D1Q2),
            q1_3: eff(D1Q3),
            q1_4: eff(D1Q4),
        }
    }
}

const ITT_RULES: &[Rule<IttAnswers>] = &[
    // Shortcut: control failure confirmed externally.
    Rule {
        risk: Critical,
        rationale: "Determinante: Falha no controle (1.1) confirmada por controles negativos (1.4).",
        matches: |a| matches!(a.q1_1, SN | NI) && matches!(a.q1_4, Y | PY),
    },
    // Shortcut: over-adjustment confirmed externally.
    Rule {
        risk: Critical,
        rationale: "Determinante: Ajuste excessivo (1.3) confirmado por controles negativos (1.4).",
        matches: |a| {
            matches!(a.q1_1, Y | PY | WN) && matches!(a.q1_3, Y | PY) && matches!(a.q1_4, Y | PY)
        },
    },
    // Shortcut: severe measurement error without over-adjustment.
    Rule {
        risk: Serious,
        rationale: "Determinante: Erro substancial na medição dos fatores de confusão (1.2).",
        matches: |a| {
            matches!(a.q1_1, Y | PY | WN) && !matches!(a.q1_3, Y | PY) && matches!(a.q1_2, SN | NI)
        },
    },
    // Control failed but negative controls did not escalate it.
    Rule {
        risk: Serious,
        rationale: "Falha substancial no controle (1.1); controles negativos não agravaram para crítico.",
        matches: |a| matches!(a.q1_1, SN | NI),
    },
    Rule {
        risk: Critical,
        rationale: "Ajuste excessivo (1.3) agravado por medição insuficiente (1.2).",
        matches: |a| matches!(a.q1_3, Y | PY) && matches!(a.q1_2, SN | WN | NI),
    },
    Rule {
        risk: Serious,
        rationale: "Ajuste excessivo de variáveis (1.3), mitigado por boa medição.",
        matches: |a| matches!(a.q1_3, Y | PY),
    },
    Rule {
        risk: Serious,
        rationale: "Controles negativos sugerem viés, apesar do bom controle inicial.",
        matches: |a| matches!(a.q1_4, Y | PY),
    },
    Rule {
        risk: Moderate,
        rationale: "Preocupações menores com confusão residual ou erro de medição.",
        matches: |a| a.q1_2 == WN || a.q1_1 == WN,
    },
    Rule {
        risk: Low,
        rationale: "Baixo risco de viés devido a confusão.",
        matches: |a| {
            matches!(a.q1_1, Y | PY)
                && matches!(a.q1_2, Y | PY | NA)
                && !matches!(a.q1_3, Y | PY)
                && matches!(a.q1_4, N | PN | NA)
        },
    },
];

pub(crate) fn evaluate_itt(answers: &IttAnswers) -> Option<Judgement> {
    first_match(ITT_RULES, answers)
}

pub(crate) struct PerProtocolAnswers {
    pub q1_1: Answer,
    pub q1_2: Answer,
    pub q1_3: Answer,
    pub q1_4: Answer,
    pub q1_5: Answer,
}

impl PerProtocolAnswers {
    pub(crate) fn collect(eff: impl Fn(QuestionId) -> Answer) -> Self {
        Self {
            q1_1: eff(D1Q1),
            q1_2: eff(D1Q2),
            q1_3: eff(D1Q3),
            q1_4: eff(D1Q4),
            q1_5: eff(D1Q5),
        }
    }
}

const PER_PROTOCOL_RULES: &[Rule<PerProtocolAnswers>] = &[
    // Collider bias trumps everything, independent of negative controls.
    Rule {
        risk: Critical,
        rationale: "Método inadequado com ajuste por variáveis pós-intervenção (viés de colisor).",
        matches: |a| matches!(a.q1_1, N | PN | NI) && matches!(a.q1_4, Y | PY),
    },
    Rule {
        risk: Critical,
        rationale: "Método inadequado e controles negativos indicam confusão não controlada.",
        matches: |a| {
            matches!(a.q1_1, N | PN | NI)
                && matches!(a.q1_4, N | PN | NI)
                && matches!(a.q1_5, Y | PY)
        },
    },
    Rule {
        risk: Critical,
        rationale: "Falha substancial no controle confirmada por controles negativos.",
        matches: |a| {
            matches!(a.q1_1, Y | PY) && matches!(a.q1_2, SN | NI) && matches!(a.q1_5, Y | PY)
        },
    },
    Rule {
        risk: Critical,
        rationale: "Medição inválida dos fatores confirmada por viés em controles negativos.",
        matches: |a| {
            matches!(a.q1_1, Y | PY) && matches!(a.q1_3, SN | NI) && matches!(a.q1_5, Y | PY)
        },
    },
    Rule {
        risk: Serious,
        rationale: "Método de análise inadequado para adesão (falha em ajustar confusão variável no tempo).",
        matches: |a| {
            matches!(a.q1_1, N | PN | NI)
                && matches!(a.q1_4, N | PN | NI)
                && matches!(a.q1_5, N | PN)
        },
    },
    Rule {
        risk: Serious,
        rationale: "Falha substancial no controle de fatores de confusão.",
        matches: |a| {
            matches!(a.q1_1, Y | PY) && matches!(a.q1_2, SN | NI) && matches!(a.q1_5, N | PN)
        },
    },
    Rule {
        risk: Serious,
        rationale: "Falha substancial na medição dos fatores de confusão.",
        matches: |a| {
            matches!(a.q1_1, Y | PY)
                && matches!(a.q1_2, Y | PY)
                && matches!(a.q1_3, SN | NI)
                && matches!(a.q1_5, N | PN)
        },
    },
    Rule {
        risk: Serious,
        rationale: "Controle parcial agravado por medição inválida.",
        matches: |a| {
            matches!(a.q1_1, Y | PY)
                && a.q1_2 == WN
                && matches!(a.q1_3, SN | NI)
                && matches!(a.q1_5, N | PN)
        },
    },
    Rule {
        risk: Serious,
        rationale: "Controles negativos sugerem viés, apesar do rigor metodológico aparente.",
        matches: |a| {
            matches!(a.q1_1, Y | PY)
                && matches!(a.q1_2, Y | PY)
                && matches!(a.q1_3, Y | PY)
                && matches!(a.q1_5, Y | PY)
        },
    },
    Rule {
        risk: Serious,
        rationale: "Problemas menores de medição agravados por viés em controles negativos.",
        matches: |a| {
            matches!(a.q1_1, Y | PY)
                && matches!(a.q1_2, Y | PY)
                && a.q1_3 == WN
                && matches!(a.q1_5, Y | PY)
        },
    },
    Rule {
        risk: Serious,
        rationale: "Problemas menores de controle agravados por viés em controles negativos.",
        matches: |a| matches!(a.q1_1, Y | PY) && a.q1_2 == WN && matches!(a.q1_5, Y | PY),
    },
    Rule {
        risk: Moderate,
        rationale: "Controle incompleto (mas não substancial) dos fatores de confusão.",
        matches: |a| matches!(a.q1_1, Y | PY) && a.q1_2 == WN && matches!(a.q1_5, N | PN),
    },
    Rule {
        risk: Moderate,
        rationale: "Preocupações menores quanto à validade e confiabilidade da medição.",
        matches: |a| {
            matches!(a.q1_1, Y | PY)
                && matches!(a.q1_2, Y | PY)
                && a.q1_3 == WN
                && matches!(a.q1_5, N | PN)
        },
    },
    Rule {
        risk: Low,
        rationale: "Baixo risco de viés (métodos g aplicados corretamente e medições válidas).",
        matches: |a| {
            matches!(a.q1_1, Y | PY)
                && matches!(a.q1_2, Y | PY)
                && matches!(a.q1_3, Y | PY)
                && matches!(a.q1_5, N | PN)
        },
    },
];

pub(crate) fn evaluate_per_protocol(answers: &PerProtocolAnswers) -> Option<Judgement> {
    first_match(PER_PROTOCOL_RULES, answers)
}
