use std::io::Cursor;

use chrono::NaiveDate;
use robins::assessment::{
    AnalysisVariant, Answer, AnswerSheetImportError, AnswerSheetImporter, QuestionId, RiskLevel,
    StudyContext,
};

fn context(variant: AnalysisVariant) -> StudyContext {
    StudyContext {
        study_id: "Nunes 2022".to_string(),
        outcome: "Recidiva em 12 meses".to_string(),
        numeric_result: "OR 2.1".to_string(),
        variant,
        assessed_on: NaiveDate::from_ymd_opt(2025, 11, 21).expect("valid date"),
    }
}

const COMPLETE_ITT_SHEET: &str = "\
question,answer
1.1,WN
1.2,Y
1.3,N
1.4,N
2.1,Y
2.4,N
2.5,N
3.1,Y
3.2,N
3.3,N
4.1,Y
4.2,Y
4.3,Y
5.1,N
5.2,N
5.3,NA
6.1,Y
6.2,N
6.3,N
6.4,N
";

#[test]
fn complete_sheet_hydrates_a_judged_assessment() {
    let assessment = AnswerSheetImporter::from_reader(
        Cursor::new(COMPLETE_ITT_SHEET),
        context(AnalysisVariant::IntentionToTreat),
    )
    .expect("sheet imports");

    assert_eq!(assessment.pending_domains(), Vec::new());
    assert_eq!(assessment.suggested_risk(), Some(RiskLevel::Moderate));
}

#[test]
fn rows_for_suppressed_questions_are_skipped() {
    // 1.1 = SN suppresses 1.2/1.3; their rows must be ignored, not rejected.
    let sheet = "question,answer\n1.1,SN\n1.2,Y\n1.3,N\n1.4,N\n";
    let assessment = AnswerSheetImporter::from_reader(
        Cursor::new(sheet),
        context(AnalysisVariant::IntentionToTreat),
    )
    .expect("sheet imports");

    assert_eq!(assessment.answer(QuestionId::D1Q2), None);
    assert_eq!(
        assessment
            .evaluation(robins::assessment::BiasDomain::Confounding)
            .outcome
            .risk(),
        Some(RiskLevel::Serious)
    );
}

#[test]
fn duplicate_rows_keep_the_first_value() {
    let sheet = "question,answer\n5.1,N\n5.1,Y\n5.2,N\n5.3,NA\n";
    let assessment = AnswerSheetImporter::from_reader(
        Cursor::new(sheet),
        context(AnalysisVariant::IntentionToTreat),
    )
    .expect("sheet imports");

    assert_eq!(assessment.answer(QuestionId::D5Q1), Some(Answer::N));
}

#[test]
fn unknown_question_codes_are_hard_errors() {
    let sheet = "question,answer\n9.9,Y\n";
    let error = AnswerSheetImporter::from_reader(
        Cursor::new(sheet),
        context(AnalysisVariant::IntentionToTreat),
    )
    .expect_err("unknown code");

    match error {
        AnswerSheetImportError::UnknownQuestion(code) => assert_eq!(code, "9.9"),
        other => panic!("expected unknown-question error, got {other}"),
    }
}

#[test]
fn unknown_answer_codes_are_hard_errors() {
    let sheet = "question,answer\n5.1,MAYBE\n";
    let error = AnswerSheetImporter::from_reader(
        Cursor::new(sheet),
        context(AnalysisVariant::IntentionToTreat),
    )
    .expect_err("unknown answer");

    match error {
        AnswerSheetImportError::UnknownAnswer { question, value } => {
            assert_eq!(question, QuestionId::D5Q1);
            assert_eq!(value, "MAYBE");
        }
        other => panic!("expected unknown-answer error, got {other}"),
    }
}

#[test]
fn disallowed_codes_for_a_question_are_rejected_via_the_session() {
    // SY parses as an answer but is outside 6.1's allowed set.
    let sheet = "question,answer\n6.1,SY\n";
    let error = AnswerSheetImporter::from_reader(
        Cursor::new(sheet),
        context(AnalysisVariant::IntentionToTreat),
    )
    .expect_err("disallowed code");

    assert!(matches!(error, AnswerSheetImportError::Assessment(_)));
}

#[test]
fn missing_files_surface_io_errors() {
    let error = AnswerSheetImporter::from_path(
        "./does-not-exist.csv",
        context(AnalysisVariant::PerProtocol),
    )
    .expect_err("expected io error");

    match error {
        AnswerSheetImportError::Io(_) => {}
        other => panic!("expected io error, got {other:?}"),
    }
}
