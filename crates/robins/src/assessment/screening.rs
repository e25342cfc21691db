use super::answers::Answer;
use super::domain::{AnalysisVariant, StudyContext};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use Answer::{N, PN, PY, Y};

/// Preliminary (triage) answers collected before any domain is assessed.
///
/// B2 is only considered when B1 indicates that no confounding control was
/// attempted; a B2 supplied alongside a positive B1 is ignored, exactly as a
/// suppressed signalling question would be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageAnswers {
    /// B1: did the authors attempt to control confounding for this result?
    pub attempted_confounding_control: Answer,
    /// B2: is the confounding potential severe enough to rule the result out?
    #[serde(default)]
    pub confounding_beyond_salvage: Option<Answer>,
    /// B3: was the outcome measurement method inadequate?
    pub inadequate_measurement: Answer,
}

/// Everything the assessor supplies up front, validated by the gate into a
/// [`StudyContext`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyIntake {
    pub study_id: String,
    pub outcome: String,
    #[serde(default)]
    pub numeric_result: String,
    pub triage: TriageAnswers,
    pub variant: AnalysisVariant,
    pub assessed_on: NaiveDate,
}

/// Conditions that stop an assessment before it is opened.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScreeningViolation {
    #[error("study identifier must not be empty")]
    MissingStudyIdentifier,
    #[error("triage answer {answer} is not allowed for {question}")]
    DisallowedTriageAnswer {
        question: &'static str,
        answer: Answer,
    },
    #[error("triage question B2 must be answered when B1 is {0}")]
    MissingConfoundingSeverity(Answer),
    #[error("uncontrollable confounding rules this result out of assessment (B2)")]
    ConfoundingBeyondSalvage,
    #[error("the outcome measurement method is inadequate for assessment (B3)")]
    InadequateOutcomeMeasurement,
}

const B1_ALLOWED: &[Answer] = &[Y, PY, PN, N];
const B2_ALLOWED: &[Answer] = &[N, PN, Y, PY];
const B3_ALLOWED: &[Answer] = &[N, PN, Y, PY];

/// Turns an intake into a study context, or refuses it outright.
///
/// A positive B2 (where applicable) or B3 is the instrument's hard stop: the
/// result is already critically biased and no per-domain assessment may run.
#[derive(Debug, Clone, Default)]
pub struct ScreeningGate;

impl ScreeningGate {
    pub fn context_from_intake(
        &self,
        intake: StudyIntake,
    ) -> Result<StudyContext, ScreeningViolation> {
        if intake.study_id.trim().is_empty() {
            return Err(ScreeningViolation::MissingStudyIdentifier);
        }

        let triage = intake.triage;
        if !B1_ALLOWED.contains(&triage.attempted_confounding_control) {
            return Err(ScreeningViolation::DisallowedTriageAnswer {
                question: "B1",
                answer: triage.attempted_confounding_control,
            });
        }
        if let Some(b2) = triage.confounding_beyond_salvage {
            if !B2_ALLOWED.contains(&b2) {
                return Err(ScreeningViolation::DisallowedTriageAnswer {
                    question: "B2",
                    answer: b2,
                });
            }
        }
        if !B3_ALLOWED.contains(&triage.inadequate_measurement) {
            return Err(ScreeningViolation::DisallowedTriageAnswer {
                question: "B3",
                answer: triage.inadequate_measurement,
            });
        }

        if matches!(triage.attempted_confounding_control, N | PN) {
            match triage.confounding_beyond_salvage {
                None => {
                    return Err(ScreeningViolation::MissingConfoundingSeverity(
                        triage.attempted_confounding_control,
                    ))
                }
                Some(Y) | Some(PY) => return Err(ScreeningViolation::ConfoundingBeyondSalvage),
                Some(_) => {}
            }
        }

        if matches!(triage.inadequate_measurement, Y | PY) {
            return Err(ScreeningViolation::InadequateOutcomeMeasurement);
        }

        Ok(StudyContext {
            study_id: intake.study_id,
            outcome: intake.outcome,
            numeric_result: intake.numeric_result,
            variant: intake.variant,
            assessed_on: intake.assessed_on,
        })
    }
}
