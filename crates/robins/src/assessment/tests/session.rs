use super::common::{
    assessment, lenient_policy, policy, scripted_itt_answers, submit_all,
};
use crate::assessment::answers::Answer::{self, N, PY, SN, WN, Y};
use crate::assessment::domain::AnalysisVariant::{IntentionToTreat, PerProtocol};
use crate::assessment::domain::{DomainOutcome, RiskLevel};
use crate::assessment::questions::BiasDomain;
use crate::assessment::questions::QuestionId::{D1Q1, D1Q2, D1Q3, D1Q4, D5Q1};
use crate::assessment::session::AssessmentError;

#[test]
fn fresh_assessment_is_pending_everywhere() {
    let assessment = assessment(IntentionToTreat);
    assert_eq!(assessment.suggested_risk(), None);
    assert_eq!(assessment.pending_domains().len(), 6);
    for evaluation in assessment.evaluations() {
        assert!(matches!(evaluation.outcome, DomainOutcome::Pending { .. }));
        assert_eq!(evaluation.outcome.risk_label(), "PENDENTE");
    }
}

#[test]
fn domains_are_judged_only_once_their_active_set_is_answered() {
    let mut assessment = assessment(IntentionToTreat);
    assessment.submit(D1Q1, SN).expect("active question");
    assert_eq!(
        assessment
            .evaluation(BiasDomain::Confounding)
            .outcome
            .risk(),
        None
    );

    assessment.submit(D1Q4, PY).expect("active question");
    assert_eq!(
        assessment
            .evaluation(BiasDomain::Confounding)
            .outcome
            .risk(),
        Some(RiskLevel::Critical)
    );
    // Other domains remain untouched and pending.
    assert_eq!(assessment.pending_domains().len(), 5);
}

#[test]
fn submitting_to_an_inactive_question_is_rejected() {
    let mut assessment = assessment(IntentionToTreat);
    let error = assessment.submit(D1Q2, Y).expect_err("1.2 needs 1.1 first");
    assert_eq!(error, AssessmentError::InactiveQuestion(D1Q2));
}

#[test]
fn out_of_vocabulary_answers_are_rejected_at_the_boundary() {
    let mut itt = assessment(IntentionToTreat);
    let error = itt
        .submit(D5Q1, Answer::SY)
        .expect_err("SY is not in 5.1's set");
    assert_eq!(
        error,
        AssessmentError::DisallowedAnswer {
            question: D5Q1,
            answer: Answer::SY,
        }
    );

    // Variant-specific sets: PN is legal for 1.1 per-protocol only.
    let error = itt.submit(D1Q1, Answer::PN).expect_err("ITT set");
    assert!(matches!(error, AssessmentError::DisallowedAnswer { .. }));

    let mut per_protocol = assessment(PerProtocol);
    assert!(per_protocol.submit(D1Q1, Answer::PN).is_ok());
}

#[test]
fn changing_an_upstream_answer_retracts_dependents() {
    let mut assessment = assessment(IntentionToTreat);
    submit_all(
        &mut assessment,
        &[(D1Q1, WN), (D1Q2, Y), (D1Q3, N), (D1Q4, N)],
    );
    assert_eq!(
        assessment
            .evaluation(BiasDomain::Confounding)
            .outcome
            .risk(),
        Some(RiskLevel::Moderate)
    );

    // 1.1 flips to SN: 1.2/1.3 are retracted and must not influence the
    // recomputed judgement, which now rests on 1.1 + 1.4 alone.
    assessment.submit(D1Q1, SN).expect("1.1 stays active");
    assert_eq!(assessment.answer(D1Q2), None);
    assert_eq!(assessment.answer(D1Q3), None);

    let evaluation = assessment.evaluation(BiasDomain::Confounding);
    assert_eq!(evaluation.outcome.risk(), Some(RiskLevel::Serious));
    assert!(!evaluation.answers.contains_key(&D1Q2));
    assert!(!evaluation.answers.contains_key(&D1Q3));

    // Flipping back re-opens them as unanswered.
    assessment.submit(D1Q1, WN).expect("1.1 stays active");
    assert_eq!(
        assessment
            .evaluation(BiasDomain::Confounding)
            .outcome
            .risk(),
        None
    );
}

#[test]
fn reevaluation_of_an_unchanged_snapshot_is_idempotent() {
    let mut assessment = assessment(IntentionToTreat);
    submit_all(&mut assessment, &scripted_itt_answers());

    let before = assessment.evaluation(BiasDomain::Confounding).clone();
    let answer = assessment.answer(D1Q1).expect("answered");
    assessment.submit(D1Q1, answer).expect("resubmit same code");
    assert_eq!(*assessment.evaluation(BiasDomain::Confounding), before);
}

#[test]
fn scripted_answers_aggregate_via_three_moderates() {
    let mut assessment = assessment(IntentionToTreat);
    submit_all(&mut assessment, &scripted_itt_answers());
    assert_eq!(assessment.pending_domains(), Vec::new());
    assert_eq!(assessment.suggested_risk(), Some(RiskLevel::Serious));
}

#[test]
fn decision_defaults_are_not_recorded_until_asked() {
    let mut assessment = assessment(IntentionToTreat);
    submit_all(&mut assessment, &scripted_itt_answers());
    assert!(assessment.decision().is_none());

    assessment
        .record_decision(RiskLevel::Serious, "", &policy())
        .expect("agreeing with the suggestion needs no justification");
    assert_eq!(
        assessment.decision().map(|decision| decision.risk),
        Some(RiskLevel::Serious)
    );
}

#[test]
fn overriding_without_justification_is_rejected_by_default() {
    let mut assessment = assessment(IntentionToTreat);
    submit_all(&mut assessment, &scripted_itt_answers());

    let error = assessment
        .record_decision(RiskLevel::Moderate, "  ", &policy())
        .expect_err("override needs justification");
    assert_eq!(error, AssessmentError::JustificationRequired);

    assessment
        .record_decision(
            RiskLevel::Moderate,
            "Confusão residual pouco plausível neste contexto clínico.",
            &policy(),
        )
        .expect("justified override is recorded");
}

#[test]
fn lenient_policy_allows_silent_overrides() {
    let mut assessment = assessment(IntentionToTreat);
    submit_all(&mut assessment, &scripted_itt_answers());

    assessment
        .record_decision(RiskLevel::Low, "", &lenient_policy())
        .expect("lenient policy skips the check");
}

#[test]
fn decisions_cannot_precede_a_complete_evaluation() {
    let mut assessment = assessment(IntentionToTreat);
    let error = assessment
        .record_decision(RiskLevel::Low, "early", &policy())
        .expect_err("nothing judged yet");
    assert!(matches!(error, AssessmentError::EvaluationPending(_)));
}

#[test]
fn any_answer_change_invalidates_a_recorded_decision() {
    let mut assessment = assessment(IntentionToTreat);
    submit_all(&mut assessment, &scripted_itt_answers());
    assessment
        .record_decision(RiskLevel::Serious, "", &policy())
        .expect("decision records");

    assessment.submit(D1Q4, PY).expect("active question");
    assert!(assessment.decision().is_none());
}

#[test]
fn retracting_an_answer_reopens_the_domain() {
    let mut assessment = assessment(IntentionToTreat);
    submit_all(&mut assessment, &scripted_itt_answers());
    assert!(assessment.suggested_risk().is_some());

    assessment.retract(D1Q4);
    assert_eq!(assessment.suggested_risk(), None);
    assert_eq!(assessment.pending_domains(), vec![BiasDomain::Confounding]);
}
