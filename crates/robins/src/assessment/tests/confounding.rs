use super::common::answers;
use crate::assessment::answers::Answer::{self, N, NA, NI, PN, PY, SN, WN, Y};
use crate::assessment::domain::{AnalysisVariant, DomainOutcome, RiskLevel};
use crate::assessment::evaluation::evaluate_domain;
use crate::assessment::questions::BiasDomain;
use crate::assessment::questions::QuestionId::{self, D1Q1, D1Q2, D1Q3, D1Q4, D1Q5};

fn judge_itt(pairs: &[(QuestionId, Answer)]) -> DomainOutcome {
    evaluate_domain(
        BiasDomain::Confounding,
        AnalysisVariant::IntentionToTreat,
        &answers(pairs),
    )
    .outcome
}

fn judge_pp(pairs: &[(QuestionId, Answer)]) -> DomainOutcome {
    evaluate_domain(
        BiasDomain::Confounding,
        AnalysisVariant::PerProtocol,
        &answers(pairs),
    )
    .outcome
}

#[test]
fn itt_control_failure_confirmed_by_negative_controls_is_critical() {
    let outcome = judge_itt(&[(D1Q1, SN), (D1Q4, PY)]);
    match outcome {
        DomainOutcome::Judged { risk, rationale } => {
            assert_eq!(risk, RiskLevel::Critical);
            assert!(rationale.contains("Falha no controle"));
            assert!(rationale.contains("confirmada por controles negativos"));
        }
        other => panic!("expected critical judgement, got {other:?}"),
    }
}

#[test]
fn itt_over_adjustment_with_confirmation_is_critical() {
    let outcome = judge_itt(&[(D1Q1, Y), (D1Q2, Y), (D1Q3, PY), (D1Q4, Y)]);
    assert_eq!(outcome.risk(), Some(RiskLevel::Critical));
    assert!(outcome.rationale().contains("Ajuste excessivo"));
}

#[test]
fn itt_severe_measurement_error_is_serious() {
    let outcome = judge_itt(&[(D1Q1, PY), (D1Q2, SN), (D1Q3, N), (D1Q4, N)]);
    assert_eq!(outcome.risk(), Some(RiskLevel::Serious));
    assert!(outcome.rationale().contains("Erro substancial na medição"));
}

#[test]
fn itt_control_failure_without_confirmation_is_serious() {
    let outcome = judge_itt(&[(D1Q1, NI), (D1Q4, N)]);
    assert_eq!(outcome.risk(), Some(RiskLevel::Serious));
}

#[test]
fn itt_over_adjustment_with_weak_measurement_is_critical() {
    let outcome = judge_itt(&[(D1Q1, Y), (D1Q2, WN), (D1Q3, Y), (D1Q4, N)]);
    assert_eq!(outcome.risk(), Some(RiskLevel::Critical));
}

#[test]
fn itt_negative_controls_alone_are_serious() {
    let outcome = judge_itt(&[(D1Q1, Y), (D1Q2, Y), (D1Q3, N), (D1Q4, PY)]);
    assert_eq!(outcome.risk(), Some(RiskLevel::Serious));
    assert!(outcome.rationale().contains("Controles negativos"));
}

#[test]
fn itt_weak_control_is_moderate() {
    let outcome = judge_itt(&[(D1Q1, WN), (D1Q2, Y), (D1Q3, N), (D1Q4, N)]);
    assert_eq!(outcome.risk(), Some(RiskLevel::Moderate));
}

#[test]
fn itt_clean_path_is_low() {
    let outcome = judge_itt(&[(D1Q1, Y), (D1Q2, PY), (D1Q3, PN), (D1Q4, NA)]);
    match outcome {
        DomainOutcome::Judged { risk, rationale } => {
            assert_eq!(risk, RiskLevel::Low);
            assert_eq!(rationale, "Baixo risco de viés devido a confusão.");
        }
        other => panic!("expected low judgement, got {other:?}"),
    }
}

#[test]
fn itt_incomplete_answers_stay_pending() {
    let outcome = judge_itt(&[(D1Q1, Y)]);
    match outcome {
        DomainOutcome::Pending { missing } => {
            assert!(missing.contains(&D1Q2));
            assert!(missing.contains(&D1Q4));
        }
        other => panic!("expected pending, got {other:?}"),
    }
}

#[test]
fn pp_collider_adjustment_is_critical_regardless_of_negative_controls() {
    let outcome = judge_pp(&[(D1Q1, PN), (D1Q4, Y), (D1Q5, N)]);
    assert_eq!(outcome.risk(), Some(RiskLevel::Critical));
    assert!(outcome.rationale().contains("colisor"));
}

#[test]
fn pp_inadequate_method_with_confirmation_is_critical() {
    let outcome = judge_pp(&[(D1Q1, N), (D1Q4, PN), (D1Q5, PY)]);
    assert_eq!(outcome.risk(), Some(RiskLevel::Critical));
}

#[test]
fn pp_inadequate_method_alone_is_serious() {
    let outcome = judge_pp(&[(D1Q1, NI), (D1Q4, N), (D1Q5, PN)]);
    assert_eq!(outcome.risk(), Some(RiskLevel::Serious));
    assert!(outcome.rationale().contains("adesão"));
}

#[test]
fn pp_substantial_control_failure_with_confirmation_is_critical() {
    let outcome = judge_pp(&[(D1Q1, Y), (D1Q2, SN), (D1Q5, PY)]);
    assert_eq!(outcome.risk(), Some(RiskLevel::Critical));
}

#[test]
fn pp_confirmed_bias_on_rigorous_study_is_serious() {
    let outcome = judge_pp(&[(D1Q1, PY), (D1Q2, Y), (D1Q3, PY), (D1Q5, Y)]);
    assert_eq!(outcome.risk(), Some(RiskLevel::Serious));
    assert!(outcome.rationale().contains("rigor metodológico"));
}

#[test]
fn pp_weak_control_without_confirmation_is_moderate() {
    let outcome = judge_pp(&[(D1Q1, Y), (D1Q2, WN), (D1Q3, Y), (D1Q5, PN)]);
    assert_eq!(outcome.risk(), Some(RiskLevel::Moderate));
}

#[test]
fn pp_clean_g_method_path_is_low() {
    let outcome = judge_pp(&[(D1Q1, Y), (D1Q2, PY), (D1Q3, Y), (D1Q5, N)]);
    assert_eq!(outcome.risk(), Some(RiskLevel::Low));
}

#[test]
fn pp_explicit_na_on_active_question_surfaces_rule_gap() {
    // 1.2 is active (1.1 positive) but answered NA: no guard covers it.
    let outcome = judge_pp(&[(D1Q1, Y), (D1Q2, NA), (D1Q5, N)]);
    assert!(outcome.is_rule_gap());
    assert_eq!(outcome.risk(), None);
    assert_eq!(outcome.risk_label(), "PENDENTE");
    assert!(outcome.rationale().contains("não prevista pelo algoritmo"));
}

#[test]
fn pp_negative_controls_question_is_always_required() {
    let outcome = judge_pp(&[(D1Q1, N), (D1Q4, PN)]);
    match outcome {
        DomainOutcome::Pending { missing } => assert_eq!(missing, vec![D1Q5]),
        other => panic!("expected pending on 1.5, got {other:?}"),
    }
}
