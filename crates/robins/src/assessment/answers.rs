use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordinal response codes of the signalling-question instrument.
///
/// Not every code is legal for every question; the per-question allowed sets
/// live on [`crate::assessment::questions::QuestionId`]. "Unanswered" is not a
/// code: it is represented by the question being absent from the answer map,
/// so it can never reach a rule cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Answer {
    /// Yes.
    Y,
    /// Probably yes.
    PY,
    /// Probably no.
    PN,
    /// No.
    N,
    /// No information.
    NI,
    /// Not applicable (also implied for every suppressed question).
    NA,
    /// Weakly no: no, but the shortfall is not substantial.
    WN,
    /// Strongly no: no, with a substantial shortfall.
    SN,
    /// Strongly yes.
    SY,
    /// Weakly yes.
    WY,
}

impl Answer {
    pub const fn label(self) -> &'static str {
        match self {
            Answer::Y => "Y",
            Answer::PY => "PY",
            Answer::PN => "PN",
            Answer::N => "N",
            Answer::NI => "NI",
            Answer::NA => "NA",
            Answer::WN => "WN",
            Answer::SN => "SN",
            Answer::SY => "SY",
            Answer::WY => "WY",
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raised when a textual code (CLI flag, CSV cell) is not part of the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised answer code '{0}'")]
pub struct ParseAnswerError(pub String);

impl FromStr for Answer {
    type Err = ParseAnswerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "Y" => Ok(Answer::Y),
            "PY" => Ok(Answer::PY),
            "PN" => Ok(Answer::PN),
            "N" => Ok(Answer::N),
            "NI" => Ok(Answer::NI),
            "NA" => Ok(Answer::NA),
            "WN" => Ok(Answer::WN),
            "SN" => Ok(Answer::SN),
            "SY" => Ok(Answer::SY),
            "WY" => Ok(Answer::WY),
            _ => Err(ParseAnswerError(value.to_string())),
        }
    }
}
