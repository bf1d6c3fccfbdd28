use crate::infra::{
    statutory_evaluation_config, InMemoryNotificationPublisher, InMemoryScreeningRepository,
};
use chrono::{Local, NaiveDate};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

use clearny::error::AppError;
use clearny::workflows::relief::{
    EligibilityEngine, IntakeGuard, QuestionnaireId, QuestionnaireSubmission,
    ReliefScreeningService, VerdictView,
};
use clearny::workflows::webform::WebformResponseImporter;

#[derive(Args, Debug, Default)]
pub(crate) struct ScreenArgs {
    /// Web-form CSV export to screen (defaults to a built-in sample)
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    /// Evaluation date (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Evaluation date (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
}

fn sample_submission() -> QuestionnaireSubmission {
    QuestionnaireSubmission {
        conviction_state: Some("ny".to_string()),
        has_marijuana_conviction: Some("yes".to_string()),
        offense_types: vec!["possession".to_string()],
        conviction_month: Some("1".to_string()),
        conviction_year: Some("2016".to_string()),
        possession_amount: Some("yes".to_string()),
        received_notice: Some("no".to_string()),
        conviction_level: Some("misdemeanor".to_string()),
        served_time: Some("no".to_string()),
        other_convictions: Some("no".to_string()),
        on_supervision: Some("no".to_string()),
        has_excluded_offenses: Some("no".to_string()),
        total_convictions: Some("1".to_string()),
        total_felonies: Some("0".to_string()),
        ten_years_passed: Some("no".to_string()),
        sentence_completed: Some("yes".to_string()),
        ..QuestionnaireSubmission::default()
    }
}

pub(crate) fn run_screen(args: ScreenArgs) -> Result<(), AppError> {
    let ScreenArgs { csv, as_of } = args;

    let as_of = as_of.unwrap_or_else(|| Local::now().date_naive());
    let (submissions, source) = match csv {
        Some(path) => {
            let imported = WebformResponseImporter::from_path(&path)?;
            (imported, format!("web-form export {}", path.display()))
        }
        None => (vec![sample_submission()], "built-in sample".to_string()),
    };

    println!("Screening {} response(s) from {source}", submissions.len());
    println!("Evaluation date: {as_of}");

    let guard = IntakeGuard::new();
    let engine = EligibilityEngine::new(statutory_evaluation_config());
    let mut screened = 0usize;
    let mut rejected = 0usize;

    for (index, submission) in submissions.into_iter().enumerate() {
        let id = QuestionnaireId(format!("row-{:04}", index + 1));
        println!("\n[{}]", id.0);

        match guard.profile_from_submission(id, &submission) {
            Ok(profile) => {
                let verdict = engine.evaluate(&profile, as_of);
                if let Some(rule) = engine.explain(&profile, as_of) {
                    println!("Matched rule: {rule}");
                }
                render_verdict(&verdict.view());
                screened += 1;
            }
            Err(violation) => {
                println!("Skipped: {violation}");
                rejected += 1;
            }
        }
    }

    println!("\nScreened {screened} response(s), skipped {rejected}");
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { as_of } = args;
    let as_of = as_of.unwrap_or_else(|| Local::now().date_naive());

    let repository = Arc::new(InMemoryScreeningRepository::default());
    let notifications = Arc::new(InMemoryNotificationPublisher::default());
    let service = ReliefScreeningService::new(
        repository,
        notifications.clone(),
        statutory_evaluation_config(),
    );

    println!("Record relief screening demo");
    println!("Evaluation date: {as_of}");

    let record = match service.submit(sample_submission()) {
        Ok(record) => record,
        Err(err) => {
            println!("Intake rejected the sample submission: {err}");
            return Ok(());
        }
    };

    let view = record.status_view();
    println!(
        "\nSubmitted questionnaire {} (status: {})",
        view.questionnaire_id.0, view.status
    );

    match service.evaluate(&record.profile.questionnaire_id, as_of) {
        Ok(verdict) => {
            println!();
            render_verdict(&verdict.view());
        }
        Err(err) => println!("Evaluation failed: {err}"),
    }

    let events = notifications.events();
    if events.is_empty() {
        println!("\nNotifications: none");
    } else {
        println!("\nNotifications");
        for event in events {
            println!("- {} for {}", event.template, event.questionnaire_id.0);
        }
    }

    Ok(())
}

fn render_verdict(view: &VerdictView) {
    println!("Eligibility: {}", view.eligibility_status);
    println!("Reason: {}", view.eligibility_details.primary_reason);

    for reason in &view.eligibility_details.secondary_reasons {
        println!("  - {reason}");
    }

    println!("Next steps");
    for recommendation in &view.recommendations {
        println!(
            "- {} ({}): {}",
            recommendation.title, recommendation.timeline, recommendation.description
        );
    }
}
