//! Domain 4: bias due to missing data.
//!
//! Complete data for intervention, outcome, and confounders is an immediate
//! LOW. Otherwise the analysis either restricted to complete cases (4.5/4.6)
//! or corrected the missingness by imputation (4.7-4.9) or another method
//! (4.10). Each branch has an early-exit LOW; failing that, the robustness
//! question (4.11) decides between a mitigated MODERATE, an unmitigated
//! SERIOUS, and a CRITICAL for a strongly inadequate, unmitigated method.

use super::super::answers::Answer;
use super::super::questions::QuestionId::{
    self, D4Q1, D4Q10, D4Q11, D4Q2, D4Q3, D4Q4, D4Q5, D4Q6, D4Q7, D4Q8, D4Q9,
};
use super::{first_match, Judgement, Rule};
use crate::assessment::domain::RiskLevel::{Critical, Low, Moderate, Serious};

use Answer::{N, NI, PN, PY, SN, WN, Y};

pub(crate) struct MissingDataAnswers {
    pub q4_1: Answer,
    pub q4_2: Answer,
    pub q4_3: Answer,
    pub q4_4: Answer,
    pub q4_5: Answer,
    pub q4_6: Answer,
    pub q4_7: Answer,
    pub q4_8: Answer,
    pub q4_9: Answer,
    pub q4_10: Answer,
    pub q4_11: Answer,
}

impl MissingDataAnswers {
    pub(crate) fn collect(eff: impl Fn(QuestionId) -> Answer) -> Self {
        Self {
            q4_1: eff(D4Q1),
            q4_2: eff(D4Q2),
            q4_3: eff(D4Q3),
            q4_4: eff(D4Q4),
            q4_5: eff(D4Q5),
            q4_6: eff(D4Q6),
            q4_7: eff(D4Q7),
            q4_8: eff(D4Q8),
            q4_9: eff(D4Q9),
            q4_10: eff(D4Q10),
            q4_11: eff(D4Q11),
        }
    }
}

fn all_complete(a: &MissingDataAnswers) -> bool {
    matches!(a.q4_1, Y | PY) && matches!(a.q4_2, Y | PY) && matches!(a.q4_3, Y | PY)
}

fn complete_case(a: &MissingDataAnswers) -> bool {
    matches!(a.q4_4, Y | PY | NI)
}

fn imputation(a: &MissingDataAnswers) -> bool {
    matches!(a.q4_4, N | PN) && matches!(a.q4_7, Y | PY)
}

fn alternative(a: &MissingDataAnswers) -> bool {
    matches!(a.q4_4, N | PN) && matches!(a.q4_7, N | PN | NI)
}

fn robust(a: &MissingDataAnswers) -> bool {
    matches!(a.q4_11, Y | PY)
}

const RULES: &[Rule<MissingDataAnswers>] = &[
    Rule {
        risk: Low,
        rationale: "Dados completos para quase todos os participantes.",
        matches: all_complete,
    },
    // Complete-case branch.
    Rule {
        risk: Low,
        rationale: "Exclusão de participantes não relacionada ao desfecho.",
        matches: |a| complete_case(a) && matches!(a.q4_5, N | PN),
    },
    Rule {
        risk: Low,
        rationale: "Relação entre exclusão e desfecho explicada pelo modelo de análise.",
        matches: |a| complete_case(a) && matches!(a.q4_6, Y | PY),
    },
    Rule {
        risk: Moderate,
        rationale: "Exclusão relacionada ao desfecho, mitigada por evidência de ausência de viés.",
        matches: |a| complete_case(a) && a.q4_6 == SN && robust(a),
    },
    Rule {
        risk: Serious,
        rationale: "Exclusão relacionada ao desfecho não explicada pelo modelo.",
        matches: |a| complete_case(a) && a.q4_6 == SN,
    },
    Rule {
        risk: Moderate,
        rationale: "Incerteza sobre a relação entre exclusão e desfecho, mitigada por análises de sensibilidade.",
        matches: |a| complete_case(a) && matches!(a.q4_6, WN | NI) && robust(a),
    },
    Rule {
        risk: Serious,
        rationale: "Incerteza não resolvida sobre a relação entre exclusão e desfecho.",
        matches: |a| complete_case(a) && matches!(a.q4_6, WN | NI),
    },
    // Imputation branch.
    Rule {
        risk: Low,
        rationale: "Imputação conduzida sob pressupostos válidos.",
        matches: |a| imputation(a) && matches!(a.q4_8, Y | PY) && matches!(a.q4_9, Y | PY),
    },
    Rule {
        risk: Serious,
        rationale: "Método de imputação inadequado, com evidência parcial de robustez.",
        matches: |a| imputation(a) && a.q4_9 == SN && robust(a),
    },
    Rule {
        risk: Critical,
        rationale: "Método de imputação fortemente inadequado, sem evidência de robustez.",
        matches: |a| imputation(a) && a.q4_9 == SN,
    },
    Rule {
        risk: Moderate,
        rationale: "Dúvidas sobre a imputação mitigadas por análises de sensibilidade.",
        matches: |a| {
            imputation(a)
                && (matches!(a.q4_9, WN | NI) || matches!(a.q4_8, N | PN | NI))
                && robust(a)
        },
    },
    Rule {
        risk: Serious,
        rationale: "Dúvidas não resolvidas sobre a qualidade da imputação.",
        matches: |a| {
            imputation(a) && (matches!(a.q4_9, WN | NI) || matches!(a.q4_8, N | PN | NI))
        },
    },
    // Alternative-method branch.
    Rule {
        risk: Low,
        rationale: "Método alternativo válido para corrigir os dados faltantes.",
        matches: |a| alternative(a) && matches!(a.q4_10, Y | PY),
    },
    Rule {
        risk: Serious,
        rationale: "Método alternativo inadequado, com evidência parcial de robustez.",
        matches: |a| alternative(a) && a.q4_10 == SN && robust(a),
    },
    Rule {
        risk: Critical,
        rationale: "Método alternativo fortemente inadequado, sem evidência de robustez.",
        matches: |a| alternative(a) && a.q4_10 == SN,
    },
    Rule {
        risk: Moderate,
        rationale: "Dúvidas sobre o método alternativo mitigadas por análises de sensibilidade.",
        matches: |a| alternative(a) && matches!(a.q4_10, WN | NI) && robust(a),
    },
    Rule {
        risk: Serious,
        rationale: "Ausência de correção adequada para os dados faltantes.",
        matches: |a| alternative(a) && matches!(a.q4_10, WN | NI),
    },
];

pub(crate) fn evaluate(answers: &MissingDataAnswers) -> Option<Judgement> {
    first_match(RULES, answers)
}
