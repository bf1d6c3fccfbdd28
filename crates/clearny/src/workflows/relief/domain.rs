use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for submitted questionnaires.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuestionnaireId(pub String);

/// Raw questionnaire record as collected by the intake form. Every field is
/// optional; users abandon the flow at arbitrary points and the record is
/// persisted as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestionnaireSubmission {
    pub conviction_state: Option<String>,
    pub has_marijuana_conviction: Option<String>,
    pub offense_types: Vec<String>,
    pub conviction_month: Option<String>,
    pub conviction_year: Option<String>,
    pub possession_amount: Option<String>,
    pub age_at_offense: Option<String>,
    pub received_notice: Option<String>,
    pub conviction_level: Option<String>,
    pub served_time: Option<String>,
    pub release_month: Option<String>,
    pub release_year: Option<String>,
    pub other_convictions: Option<String>,
    pub on_supervision: Option<String>,
    pub has_excluded_offenses: Option<String>,
    pub total_convictions: Option<String>,
    pub total_felonies: Option<String>,
    pub ten_years_passed: Option<String>,
    pub sentence_completed: Option<String>,
}

/// Ternary answer to a screening question. Unrecognized spellings parse to
/// `None` and are treated the same as an unanswered question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Answer {
    Yes,
    No,
    Unsure,
}

impl Answer {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "yes" => Some(Self::Yes),
            "no" => Some(Self::No),
            "not_sure" => Some(Self::Unsure),
            _ => None,
        }
    }
}

/// Offense categories the questionnaire distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OffenseType {
    Possession,
    PossessionWithIntent,
    Sale,
    Cultivation,
    Other,
    Unknown,
}

impl OffenseType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "possession" => Some(Self::Possession),
            "possession_intent" => Some(Self::PossessionWithIntent),
            "sale" => Some(Self::Sale),
            "cultivation" => Some(Self::Cultivation),
            "other" => Some(Self::Other),
            "dont_know" => Some(Self::Unknown),
            _ => None,
        }
    }
}

/// Severity class of the conviction being screened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConvictionLevel {
    Felony,
    Misdemeanor,
    Unsure,
}

impl ConvictionLevel {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "felony" => Some(Self::Felony),
            "misdemeanor" => Some(Self::Misdemeanor),
            "not_sure" => Some(Self::Unsure),
            _ => None,
        }
    }
}

/// Jurisdiction of the conviction. Relief under the MRTA, the Clean Slate
/// Act, and CPL 160.59 only reaches New York convictions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConvictionState {
    NewYork,
    OtherState,
    Unsure,
}

impl ConvictionState {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "ny" => Some(Self::NewYork),
            "other" => Some(Self::OtherState),
            "not_sure" => Some(Self::Unsure),
            _ => None,
        }
    }
}

/// The normalized, typed record the eligibility engine consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreeningProfile {
    pub questionnaire_id: QuestionnaireId,
    pub conviction_state: Option<ConvictionState>,
    pub has_marijuana_conviction: Option<Answer>,
    pub offense_types: Vec<OffenseType>,
    pub conviction_month: Option<u32>,
    pub conviction_year: Option<i32>,
    pub possession_within_limit: Option<Answer>,
    pub adult_at_offense: Option<Answer>,
    pub received_court_notice: Option<Answer>,
    pub conviction_level: Option<ConvictionLevel>,
    pub served_time: Option<Answer>,
    pub release_month: Option<u32>,
    pub release_year: Option<i32>,
    pub other_convictions: Option<Answer>,
    pub on_supervision: Option<Answer>,
    pub has_excluded_offenses: Option<Answer>,
    pub total_convictions: Option<u32>,
    pub total_felonies: Option<u32>,
    pub ten_years_passed: Option<Answer>,
    pub sentence_completed: Option<Answer>,
}

impl ScreeningProfile {
    /// Empty profile with every question unanswered.
    pub fn unanswered(questionnaire_id: QuestionnaireId) -> Self {
        Self {
            questionnaire_id,
            conviction_state: None,
            has_marijuana_conviction: None,
            offense_types: Vec::new(),
            conviction_month: None,
            conviction_year: None,
            possession_within_limit: None,
            adult_at_offense: None,
            received_court_notice: None,
            conviction_level: None,
            served_time: None,
            release_month: None,
            release_year: None,
            other_convictions: None,
            on_supervision: None,
            has_excluded_offenses: None,
            total_convictions: None,
            total_felonies: None,
            ten_years_passed: None,
            sentence_completed: None,
        }
    }

    /// First-of-month conviction date, when both parts were answered.
    pub fn conviction_date(&self) -> Option<NaiveDate> {
        date_from_parts(self.conviction_year, self.conviction_month)
    }

    /// First-of-month release date, when both parts were answered.
    pub fn release_date(&self) -> Option<NaiveDate> {
        date_from_parts(self.release_year, self.release_month)
    }

    pub fn has_offense(&self, offense: OffenseType) -> bool {
        self.offense_types.contains(&offense)
    }
}

fn date_from_parts(year: Option<i32>, month: Option<u32>) -> Option<NaiveDate> {
    let year = year?;
    let month = month?;
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// High level status tracked throughout the screening workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScreeningStatus {
    Submitted,
    ReliefAvailable,
    PetitionRequired,
    NotEligible,
}

impl ScreeningStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ScreeningStatus::Submitted => "submitted",
            ScreeningStatus::ReliefAvailable => "relief_available",
            ScreeningStatus::PetitionRequired => "petition_required",
            ScreeningStatus::NotEligible => "not_eligible",
        }
    }
}
