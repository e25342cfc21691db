//! Domain rule engines.
//!
//! Every domain is an ordered table of `(guard, outcome)` rules evaluated by
//! first match: the more severe determinations sit first, so a study can
//! never under-report risk by incidentally passing a later, weaker check.
//! A complete answer set that matches no guard is a rule-set gap and surfaces
//! as [`DomainOutcome::Unmatched`], never as a silent `LOW`.

mod aggregate;
pub(crate) mod classification;
pub(crate) mod confounding;
pub(crate) mod measurement;
pub(crate) mod missing_data;
pub(crate) mod reporting;
pub(crate) mod selection;

pub use aggregate::aggregate;

use super::domain::{AnalysisVariant, AnswerMap, DomainEvaluation, DomainOutcome, RiskLevel};
use super::questions::{BiasDomain, QuestionId};
use super::resolver;

/// One guard of a cascade. `matches` must be a pure function of the answers.
pub(crate) struct Rule<A> {
    pub risk: RiskLevel,
    pub rationale: &'static str,
    pub matches: fn(&A) -> bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Judgement {
    pub risk: RiskLevel,
    pub rationale: &'static str,
}

pub(crate) fn first_match<A>(rules: &[Rule<A>], answers: &A) -> Option<Judgement> {
    rules.iter().find(|rule| (rule.matches)(answers)).map(|rule| Judgement {
        risk: rule.risk,
        rationale: rule.rationale,
    })
}

/// Gate-then-judge entry point for a single domain.
///
/// The completeness gate runs first: while any active question is
/// unanswered the cascade is not invoked at all and the outcome is
/// `Pending`. Suppressed questions are materialised as `NA` before the rules
/// see them.
pub fn evaluate_domain(
    domain: BiasDomain,
    variant: AnalysisVariant,
    answers: &AnswerMap,
) -> DomainEvaluation {
    let resolution = resolver::resolve(domain, variant, answers);
    let snapshot: AnswerMap = resolution
        .active
        .iter()
        .filter_map(|question| answers.get(question).map(|answer| (*question, *answer)))
        .collect();

    if !resolution.is_complete() {
        return DomainEvaluation {
            domain,
            outcome: DomainOutcome::Pending {
                missing: resolution.missing,
            },
            answers: snapshot,
        };
    }

    let eff = |question: QuestionId| resolver::effective(question, &resolution.active, answers);
    let judgement = match domain {
        BiasDomain::Confounding => match variant {
            AnalysisVariant::IntentionToTreat => {
                confounding::evaluate_itt(&confounding::IttAnswers::collect(eff))
            }
            AnalysisVariant::PerProtocol => {
                confounding::evaluate_per_protocol(&confounding::PerProtocolAnswers::collect(eff))
            }
        },
        BiasDomain::InterventionClassification => {
            classification::evaluate(&classification::ClassificationAnswers::collect(eff))
        }
        BiasDomain::Selection => selection::evaluate(&selection::SelectionAnswers::collect(eff)),
        BiasDomain::MissingData => {
            missing_data::evaluate(&missing_data::MissingDataAnswers::collect(eff))
        }
        BiasDomain::OutcomeMeasurement => {
            measurement::evaluate(&measurement::MeasurementAnswers::collect(eff))
        }
        BiasDomain::SelectiveReporting => {
            reporting::evaluate(&reporting::ReportingAnswers::collect(eff))
        }
    };

    let outcome = match judgement {
        Some(Judgement { risk, rationale }) => DomainOutcome::Judged { risk, rationale },
        None => DomainOutcome::Unmatched {
            detail: describe_snapshot(&snapshot),
        },
    };

    DomainEvaluation {
        domain,
        outcome,
        answers: snapshot,
    }
}

fn describe_snapshot(snapshot: &AnswerMap) -> String {
    snapshot
        .iter()
        .map(|(question, answer)| format!("{}={}", question.code(), answer.label()))
        .collect::<Vec<_>>()
        .join(", ")
}
