use super::domain::{
    Answer, ConvictionLevel, ConvictionState, OffenseType, QuestionnaireId, QuestionnaireSubmission,
    ScreeningProfile,
};

/// Validation errors raised by the intake guard.
///
/// Only submissions the screening rules cannot reach at all are rejected;
/// partial or malformed answers degrade to unanswered questions instead.
#[derive(Debug, thiserror::Error)]
pub enum IntakeViolation {
    #[error("conviction is outside New York; MRTA, Clean Slate, and CPL 160.59 do not apply")]
    OutOfStateConviction,
    #[error("respondent reported no marijuana conviction to screen")]
    NoQualifyingConviction,
}

const MIN_CONVICTION_YEAR: i32 = 1900;
const MAX_CONVICTION_YEAR: i32 = 2100;

/// Guard responsible for producing `ScreeningProfile` instances.
#[derive(Debug, Clone, Default)]
pub struct IntakeGuard;

impl IntakeGuard {
    pub fn new() -> Self {
        Self
    }

    /// Convert an inbound submission into a normalized screening profile.
    pub fn profile_from_submission(
        &self,
        questionnaire_id: QuestionnaireId,
        submission: &QuestionnaireSubmission,
    ) -> Result<ScreeningProfile, IntakeViolation> {
        let conviction_state = parse_with(submission.conviction_state.as_deref(), ConvictionState::parse);
        if conviction_state == Some(ConvictionState::OtherState) {
            return Err(IntakeViolation::OutOfStateConviction);
        }

        let has_marijuana_conviction =
            parse_with(submission.has_marijuana_conviction.as_deref(), Answer::parse);
        if has_marijuana_conviction == Some(Answer::No) {
            return Err(IntakeViolation::NoQualifyingConviction);
        }

        let offense_types = submission
            .offense_types
            .iter()
            .filter_map(|raw| OffenseType::parse(raw))
            .collect();

        Ok(ScreeningProfile {
            questionnaire_id,
            conviction_state,
            has_marijuana_conviction,
            offense_types,
            conviction_month: parse_month(submission.conviction_month.as_deref()),
            conviction_year: parse_year(submission.conviction_year.as_deref()),
            possession_within_limit: parse_with(submission.possession_amount.as_deref(), Answer::parse),
            adult_at_offense: parse_with(submission.age_at_offense.as_deref(), Answer::parse),
            received_court_notice: parse_with(submission.received_notice.as_deref(), Answer::parse),
            conviction_level: parse_with(submission.conviction_level.as_deref(), ConvictionLevel::parse),
            served_time: parse_with(submission.served_time.as_deref(), Answer::parse),
            release_month: parse_month(submission.release_month.as_deref()),
            release_year: parse_year(submission.release_year.as_deref()),
            other_convictions: parse_with(submission.other_convictions.as_deref(), Answer::parse),
            on_supervision: parse_with(submission.on_supervision.as_deref(), Answer::parse),
            has_excluded_offenses: parse_with(submission.has_excluded_offenses.as_deref(), Answer::parse),
            total_convictions: parse_count(submission.total_convictions.as_deref()),
            total_felonies: parse_count(submission.total_felonies.as_deref()),
            ten_years_passed: parse_with(submission.ten_years_passed.as_deref(), Answer::parse),
            sentence_completed: parse_with(submission.sentence_completed.as_deref(), Answer::parse),
        })
    }
}

fn parse_with<T>(raw: Option<&str>, parser: fn(&str) -> Option<T>) -> Option<T> {
    raw.and_then(parser)
}

fn parse_month(raw: Option<&str>) -> Option<u32> {
    raw.and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|month| (1..=12).contains(month))
}

fn parse_year(raw: Option<&str>) -> Option<i32> {
    raw.and_then(|value| value.trim().parse::<i32>().ok())
        .filter(|year| (MIN_CONVICTION_YEAR..=MAX_CONVICTION_YEAR).contains(year))
}

fn parse_count(raw: Option<&str>) -> Option<u32> {
    raw.and_then(|value| value.trim().parse::<u32>().ok())
}
