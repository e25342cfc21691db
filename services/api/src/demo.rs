use crate::infra::InMemoryAlertPublisher;
use crate::infra::InMemoryAssessmentStore;
use chrono::{Local, NaiveDate};
use clap::Args;
use robins::assessment::{
    AnalysisVariant, Answer, AnswerSheetImporter, AssessmentId, AssessmentPolicy,
    AssessmentRecord, AssessmentReport, AssessmentService, AssessmentServiceError, QuestionId,
    RiskLevel, ScreeningGate, StudyIntake, TriageAnswers,
};
use robins::error::AppError;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Study identifier or first author
    #[arg(long)]
    pub(crate) study_id: String,
    /// Outcome being assessed
    #[arg(long)]
    pub(crate) outcome: String,
    /// Numeric result text (e.g. "RR 1.5")
    #[arg(long, default_value = "")]
    pub(crate) numeric_result: String,
    /// Analysis variant: itt or per-protocol
    #[arg(long, value_parser = crate::infra::parse_variant)]
    pub(crate) variant: AnalysisVariant,
    /// Triage B1: did the authors attempt to control confounding? (Y/PY/PN/N)
    #[arg(long, value_parser = crate::infra::parse_answer)]
    pub(crate) b1: Answer,
    /// Triage B2: is confounding potential beyond salvage? (required when B1 is N/PN)
    #[arg(long, value_parser = crate::infra::parse_answer)]
    pub(crate) b2: Option<Answer>,
    /// Triage B3: was the outcome measurement method inadequate? (N/PN/Y/PY)
    #[arg(long, value_parser = crate::infra::parse_answer)]
    pub(crate) b3: Answer,
    /// CSV answer sheet with question,answer rows (e.g. "1.1,SN")
    #[arg(long)]
    pub(crate) answers: PathBuf,
    /// Assessment date (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) assessed_on: Option<NaiveDate>,
    /// Final overall risk, when overriding the algorithmic suggestion
    #[arg(long, value_parser = crate::infra::parse_risk)]
    pub(crate) final_risk: Option<RiskLevel>,
    /// Justification for the final decision
    #[arg(long)]
    pub(crate) justification: Option<String>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Assessment date (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) assessed_on: Option<NaiveDate>,
    /// Skip the researcher-override portion of the demo
    #[arg(long)]
    pub(crate) skip_override: bool,
}

pub(crate) fn run_assessment(args: AssessArgs) -> Result<(), AppError> {
    let AssessArgs {
        study_id,
        outcome,
        numeric_result,
        variant,
        b1,
        b2,
        b3,
        answers,
        assessed_on,
        final_risk,
        justification,
    } = args;

    let intake = StudyIntake {
        study_id,
        outcome,
        numeric_result,
        triage: TriageAnswers {
            attempted_confounding_control: b1,
            confounding_beyond_salvage: b2,
            inadequate_measurement: b3,
        },
        variant,
        assessed_on: assessed_on.unwrap_or_else(|| Local::now().date_naive()),
    };

    let context = ScreeningGate.context_from_intake(intake)?;
    let mut assessment = AnswerSheetImporter::from_path(answers, context)?;

    if let Some(risk) = final_risk {
        assessment
            .record_decision(
                risk,
                justification.unwrap_or_default(),
                &AssessmentPolicy::default(),
            )
            .map_err(AssessmentServiceError::from)?;
    }

    let record = AssessmentRecord {
        id: AssessmentId("cli-assessment".to_string()),
        assessment,
    };
    let report = record.report().map_err(AssessmentServiceError::from)?;
    render_assessment_report(&report);

    Ok(())
}

/// Scripted ITT answer set: three MODERATE domains escalate the overall
/// suggestion to SERIOUS, which the demo then overrides with justification.
fn scripted_answers() -> Vec<(QuestionId, Answer)> {
    use QuestionId::*;
    vec![
        (D1Q1, Answer::WN),
        (D1Q2, Answer::Y),
        (D1Q3, Answer::N),
        (D1Q4, Answer::N),
        (D2Q1, Answer::Y),
        (D2Q4, Answer::N),
        (D2Q5, Answer::N),
        (D3Q1, Answer::WN),
        (D3Q3, Answer::N),
        (D4Q1, Answer::Y),
        (D4Q2, Answer::Y),
        (D4Q3, Answer::Y),
        (D5Q1, Answer::N),
        (D5Q2, Answer::N),
        (D5Q3, Answer::NA),
        (D6Q1, Answer::N),
        (D6Q2, Answer::N),
        (D6Q3, Answer::N),
        (D6Q4, Answer::NI),
    ]
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        assessed_on,
        skip_override,
    } = args;

    println!("Risk-of-bias assessment demo");

    let store = Arc::new(InMemoryAssessmentStore::default());
    let alerts = Arc::new(InMemoryAlertPublisher::default());
    let service = Arc::new(AssessmentService::new(
        store,
        alerts.clone(),
        AssessmentPolicy::default(),
    ));

    let intake = StudyIntake {
        study_id: "Estudo Exemplo".to_string(),
        outcome: "Mortalidade".to_string(),
        numeric_result: "RR 1.5".to_string(),
        triage: TriageAnswers {
            attempted_confounding_control: Answer::Y,
            confounding_beyond_salvage: None,
            inadequate_measurement: Answer::N,
        },
        variant: AnalysisVariant::IntentionToTreat,
        assessed_on: assessed_on.unwrap_or_else(|| Local::now().date_naive()),
    };

    let record = service.open(intake)?;
    println!("- Opened assessment {} (screening passed)", record.id.0);

    let mut record = record;
    for (question, answer) in scripted_answers() {
        record = service.submit_answer(&record.id, question, answer)?;
    }

    println!("\nDomain judgements");
    for domain in record.status_view().domains {
        println!("- [{}] {}: {}", domain.risk, domain.domain_label, domain.rationale);
    }

    match record.assessment.suggested_risk() {
        Some(suggested) => println!("\nSuggested overall risk: {suggested}"),
        None => {
            println!("\nScripted answers left domains pending; aborting demo");
            return Ok(());
        }
    }

    if !skip_override {
        record = service.record_decision(
            &record.id,
            RiskLevel::Moderate,
            "Confusão residual pouco plausível no contexto clínico avaliado.".to_string(),
        )?;
        if let Some(decision) = record.assessment.decision() {
            println!(
                "Researcher override: {} ({})",
                decision.risk, decision.justification
            );
        }
    }

    let report = service.report(&record.id)?;
    println!();
    render_assessment_report(&report);

    let events = alerts.events();
    if events.is_empty() {
        println!("\nCritical alerts: none");
    } else {
        println!("\nCritical alerts");
        for event in events {
            println!("- {} -> {} ({})", event.assessment_id.0, event.risk, event.detail);
        }
    }

    Ok(())
}

pub(crate) fn render_assessment_report(report: &AssessmentReport) {
    println!("Relatório ROBINS-I V2: {}", report.study.study_id);
    println!("Desfecho: {}", report.study.outcome);
    if !report.study.numeric_result.is_empty() {
        println!("Resultado numérico: {}", report.study.numeric_result);
    }
    println!(
        "Variante de análise: {} (avaliado em {})",
        report.study.variant, report.study.assessed_on
    );

    println!("\nJulgamento geral de risco");
    println!("- Sugestão do algoritmo: {}", report.overall.suggested_risk);
    println!("- Decisão final do pesquisador: {}", report.overall.final_risk);
    if !report.overall.final_justification.is_empty() {
        println!("- Justificativa final: {}", report.overall.final_justification);
    }

    println!("\nDetalhamento por domínio");
    for domain in &report.domains {
        println!("\nDomínio {}: {} [{}]", domain.number, domain.label, domain.risk);
        println!("  {}", domain.rationale);
        for answered in &domain.answers {
            println!("  - {}: {}", answered.code, answered.answer);
        }
    }
}
