use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use super::answers::Answer;
use super::domain::StudyContext;
use super::questions::QuestionId;
use super::session::{Assessment, AssessmentError};

/// Errors raised while hydrating an assessment from a CSV answer sheet.
#[derive(Debug, thiserror::Error)]
pub enum AnswerSheetImportError {
    #[error("failed to read answer sheet: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid answer sheet data: {0}")]
    Csv(#[from] csv::Error),
    #[error("unknown question code '{0}'")]
    UnknownQuestion(String),
    #[error("unrecognised answer '{value}' for question {question}")]
    UnknownAnswer { question: QuestionId, value: String },
    #[error("could not apply answer sheet to assessment: {0}")]
    Assessment(#[from] AssessmentError),
}

#[derive(Debug, Deserialize)]
struct SheetRow {
    question: String,
    answer: String,
}

/// Builds a complete assessment from `question,answer` rows ("1.1,SN").
///
/// Rows are applied in instrument order — dependencies always point at
/// earlier questions, so a sheet can be written in any order. The first row
/// wins on duplicates. Rows for questions that end up suppressed by the
/// dependency resolver are skipped: a suppressed question is NA by
/// definition, whatever the sheet says.
pub struct AnswerSheetImporter;

impl AnswerSheetImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        context: StudyContext,
    ) -> Result<Assessment, AnswerSheetImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, context)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        context: StudyContext,
    ) -> Result<Assessment, AnswerSheetImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut sheet: BTreeMap<QuestionId, Answer> = BTreeMap::new();
        for row in csv_reader.deserialize::<SheetRow>() {
            let row = row?;
            let question = QuestionId::from_code(&row.question)
                .ok_or_else(|| AnswerSheetImportError::UnknownQuestion(row.question.clone()))?;
            let answer = Answer::from_str(&row.answer).map_err(|_| {
                AnswerSheetImportError::UnknownAnswer {
                    question,
                    value: row.answer.clone(),
                }
            })?;
            sheet.entry(question).or_insert(answer);
        }

        let mut assessment = Assessment::new(context);
        for (question, answer) in sheet {
            if assessment.is_active(question) {
                assessment.submit(question, answer)?;
            }
        }

        Ok(assessment)
    }
}
