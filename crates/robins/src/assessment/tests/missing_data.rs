use super::common::answers;
use crate::assessment::answers::Answer::{self, N, NI, PN, PY, SN, WN, Y};
use crate::assessment::domain::{AnalysisVariant, DomainOutcome, RiskLevel};
use crate::assessment::evaluation::evaluate_domain;
use crate::assessment::questions::BiasDomain;
use crate::assessment::questions::QuestionId::{
    self, D4Q1, D4Q10, D4Q11, D4Q2, D4Q3, D4Q4, D4Q5, D4Q6, D4Q7, D4Q8, D4Q9,
};

fn judge(pairs: &[(QuestionId, Answer)]) -> DomainOutcome {
    evaluate_domain(
        BiasDomain::MissingData,
        AnalysisVariant::IntentionToTreat,
        &answers(pairs),
    )
    .outcome
}

#[test]
fn complete_data_is_low_regardless_of_anything_else() {
    let outcome = judge(&[(D4Q1, Y), (D4Q2, Y), (D4Q3, Y)]);
    match outcome {
        DomainOutcome::Judged { risk, rationale } => {
            assert_eq!(risk, RiskLevel::Low);
            assert!(rationale.contains("Dados completos"));
        }
        other => panic!("expected low judgement, got {other:?}"),
    }
}

#[test]
fn exclusion_unrelated_to_outcome_is_low() {
    let outcome = judge(&[(D4Q1, Y), (D4Q2, N), (D4Q3, Y), (D4Q4, Y), (D4Q5, PN)]);
    assert_eq!(outcome.risk(), Some(RiskLevel::Low));
}

#[test]
fn exclusion_explained_by_model_is_low() {
    let outcome = judge(&[
        (D4Q1, Y),
        (D4Q2, PN),
        (D4Q3, Y),
        (D4Q4, PY),
        (D4Q5, Y),
        (D4Q6, PY),
    ]);
    assert_eq!(outcome.risk(), Some(RiskLevel::Low));
}

#[test]
fn unexplained_exclusion_is_serious_without_robustness_evidence() {
    let outcome = judge(&[
        (D4Q1, Y),
        (D4Q2, N),
        (D4Q3, Y),
        (D4Q4, Y),
        (D4Q5, Y),
        (D4Q6, SN),
        (D4Q11, N),
    ]);
    assert_eq!(outcome.risk(), Some(RiskLevel::Serious));
    assert!(outcome.rationale().contains("não explicada"));
}

#[test]
fn unexplained_exclusion_with_robustness_evidence_is_moderate() {
    let outcome = judge(&[
        (D4Q1, Y),
        (D4Q2, N),
        (D4Q3, Y),
        (D4Q4, Y),
        (D4Q5, Y),
        (D4Q6, SN),
        (D4Q11, Y),
    ]);
    assert_eq!(outcome.risk(), Some(RiskLevel::Moderate));
}

#[test]
fn uncertain_exclusion_relation_unmitigated_is_serious() {
    let outcome = judge(&[
        (D4Q1, Y),
        (D4Q2, N),
        (D4Q3, Y),
        (D4Q4, NI),
        (D4Q5, NI),
        (D4Q6, NI),
        (D4Q11, PN),
    ]);
    assert_eq!(outcome.risk(), Some(RiskLevel::Serious));
}

#[test]
fn valid_imputation_is_low() {
    let outcome = judge(&[
        (D4Q1, Y),
        (D4Q2, PN),
        (D4Q3, Y),
        (D4Q4, N),
        (D4Q7, Y),
        (D4Q8, Y),
        (D4Q9, PY),
    ]);
    assert_eq!(outcome.risk(), Some(RiskLevel::Low));
}

#[test]
fn strongly_inadequate_imputation_without_robustness_is_critical() {
    let outcome = judge(&[
        (D4Q1, Y),
        (D4Q2, N),
        (D4Q3, Y),
        (D4Q4, PN),
        (D4Q7, PY),
        (D4Q8, Y),
        (D4Q9, SN),
        (D4Q11, NI),
    ]);
    assert_eq!(outcome.risk(), Some(RiskLevel::Critical));
    assert!(outcome.rationale().contains("fortemente inadequado"));
}

#[test]
fn strongly_inadequate_imputation_with_robustness_is_serious() {
    let outcome = judge(&[
        (D4Q1, Y),
        (D4Q2, N),
        (D4Q3, Y),
        (D4Q4, PN),
        (D4Q7, PY),
        (D4Q8, Y),
        (D4Q9, SN),
        (D4Q11, PY),
    ]);
    assert_eq!(outcome.risk(), Some(RiskLevel::Serious));
}

#[test]
fn doubtful_imputation_with_robustness_is_moderate() {
    let outcome = judge(&[
        (D4Q1, Y),
        (D4Q2, N),
        (D4Q3, Y),
        (D4Q4, N),
        (D4Q7, Y),
        (D4Q8, Y),
        (D4Q9, WN),
        (D4Q11, Y),
    ]);
    assert_eq!(outcome.risk(), Some(RiskLevel::Moderate));
}

#[test]
fn valid_alternative_method_is_low() {
    let outcome = judge(&[
        (D4Q1, Y),
        (D4Q2, N),
        (D4Q3, Y),
        (D4Q4, N),
        (D4Q7, N),
        (D4Q10, PY),
    ]);
    assert_eq!(outcome.risk(), Some(RiskLevel::Low));
}

#[test]
fn missing_correction_without_robustness_is_serious() {
    let outcome = judge(&[
        (D4Q1, Y),
        (D4Q2, N),
        (D4Q3, Y),
        (D4Q4, N),
        (D4Q7, PN),
        (D4Q10, NI),
        (D4Q11, N),
    ]);
    assert_eq!(outcome.risk(), Some(RiskLevel::Serious));
}

#[test]
fn branch_questions_only_activate_on_incompleteness() {
    let outcome = judge(&[(D4Q1, Y), (D4Q2, Y)]);
    match outcome {
        DomainOutcome::Pending { missing } => assert_eq!(missing, vec![D4Q3]),
        other => panic!("expected pending on 4.3 only, got {other:?}"),
    }
}
