use super::common::*;
use crate::workflows::relief::domain::{
    Answer, ConvictionLevel, OffenseType, QuestionnaireId, QuestionnaireSubmission,
};
use crate::workflows::relief::evaluation::EligibilityStatus;
use crate::workflows::relief::intake::IntakeViolation;

fn intake(submission: &QuestionnaireSubmission) -> crate::workflows::relief::ScreeningProfile {
    guard()
        .profile_from_submission(QuestionnaireId("q-intake".to_string()), submission)
        .expect("intake accepts submission")
}

#[test]
fn out_of_state_conviction_is_rejected() {
    let mut submission = submission();
    submission.conviction_state = Some("other".to_string());

    let error = guard()
        .profile_from_submission(QuestionnaireId("q-oos".to_string()), &submission)
        .expect_err("expected intake violation");

    assert!(matches!(error, IntakeViolation::OutOfStateConviction));
}

#[test]
fn explicit_no_conviction_is_rejected() {
    let mut submission = submission();
    submission.has_marijuana_conviction = Some("no".to_string());

    let error = guard()
        .profile_from_submission(QuestionnaireId("q-none".to_string()), &submission)
        .expect_err("expected intake violation");

    assert!(matches!(error, IntakeViolation::NoQualifyingConviction));
}

#[test]
fn unsure_state_passes_intake() {
    let mut submission = submission();
    submission.conviction_state = Some("not_sure".to_string());

    let profile = intake(&submission);
    assert_eq!(
        profile.conviction_state,
        Some(crate::workflows::relief::ConvictionState::Unsure)
    );
}

#[test]
fn typed_answers_are_normalized() {
    let profile = intake(&submission());

    assert_eq!(profile.offense_types, vec![OffenseType::Possession]);
    assert_eq!(profile.conviction_month, Some(1));
    assert_eq!(profile.conviction_year, Some(2016));
    assert_eq!(profile.conviction_level, Some(ConvictionLevel::Misdemeanor));
    assert_eq!(profile.on_supervision, Some(Answer::No));
    assert_eq!(profile.total_convictions, Some(1));
    assert_eq!(profile.total_felonies, Some(0));
}

#[test]
fn malformed_dates_degrade_to_unknown() {
    let mut submission = submission();
    submission.conviction_month = Some("13".to_string());
    submission.conviction_year = Some("20xx".to_string());
    submission.release_month = Some("0".to_string());

    let profile = intake(&submission);

    assert_eq!(profile.conviction_month, None);
    assert_eq!(profile.conviction_year, None);
    assert_eq!(profile.release_month, None);
    assert_eq!(profile.conviction_date(), None);
}

#[test]
fn unparseable_counts_degrade_to_unknown() {
    let mut submission = submission();
    submission.total_convictions = Some("a few".to_string());
    submission.total_felonies = Some("-1".to_string());

    let profile = intake(&submission);

    assert_eq!(profile.total_convictions, None);
    assert_eq!(profile.total_felonies, None);
}

#[test]
fn unrecognized_answers_degrade_to_unknown() {
    let mut submission = submission();
    submission.on_supervision = Some("maybe".to_string());
    submission.offense_types = vec!["possession".to_string(), "rowing".to_string()];

    let profile = intake(&submission);

    assert_eq!(profile.on_supervision, None);
    assert_eq!(profile.offense_types, vec![OffenseType::Possession]);
}

#[test]
fn empty_submission_passes_intake_and_evaluates() {
    let profile = intake(&QuestionnaireSubmission::default());

    let verdict = engine().evaluate(&profile, evaluation_date());

    assert_eq!(verdict.status, EligibilityStatus::NotEligible);
    assert!(!verdict.recommendations.is_empty());
}
