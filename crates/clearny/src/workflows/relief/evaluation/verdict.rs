use super::super::domain::QuestionnaireId;
use serde::{Deserialize, Serialize};

/// Terminal eligibility outcome for a screened questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityStatus {
    AutomaticExpungement,
    AutomaticSealing,
    PetitionSealing,
    NotEligible,
}

impl EligibilityStatus {
    pub const fn label(self) -> &'static str {
        match self {
            EligibilityStatus::AutomaticExpungement => "automatic_expungement",
            EligibilityStatus::AutomaticSealing => "automatic_sealing",
            EligibilityStatus::PetitionSealing => "petition_sealing",
            EligibilityStatus::NotEligible => "not_eligible",
        }
    }

    pub fn summary(self) -> String {
        match self {
            EligibilityStatus::AutomaticExpungement => {
                "record qualifies for automatic expungement under the MRTA".to_string()
            }
            EligibilityStatus::AutomaticSealing => {
                "record qualifies for automatic sealing under the Clean Slate Act".to_string()
            }
            EligibilityStatus::PetitionSealing => {
                "record may be sealed by petition under CPL 160.59".to_string()
            }
            EligibilityStatus::NotEligible => {
                "record is not currently eligible for relief".to_string()
            }
        }
    }
}

/// Supporting detail explaining how the status was reached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityDetails {
    pub primary_reason: String,
    pub secondary_reasons: Vec<String>,
    pub mrta_applicable: bool,
    pub clean_slate_applicable: bool,
    pub petition_applicable: bool,
    pub waiting_period_required: bool,
    pub excluded_offense: bool,
}

/// Categories of next-step guidance attached to a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    DownloadReport,
    VerifyWithCourt,
    MonitorCleanSlate,
    CompleteSupervision,
    CompleteSentence,
    FilePetition,
    LegalAssistance,
    Reapply,
}

/// Ranked next step shown to the user; lower priority sorts first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub title: String,
    pub description: String,
    pub timeline: String,
    pub priority: u8,
}

/// Immutable result of one evaluation.
///
/// The status is the single source of truth for the relief pathway; the
/// boolean accessors are derived from it and cannot disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityVerdict {
    pub questionnaire_id: QuestionnaireId,
    pub status: EligibilityStatus,
    pub details: EligibilityDetails,
    pub recommendations: Vec<Recommendation>,
}

impl EligibilityVerdict {
    pub fn automatic_expungement(&self) -> bool {
        self.status == EligibilityStatus::AutomaticExpungement
    }

    pub fn automatic_sealing(&self) -> bool {
        self.status == EligibilityStatus::AutomaticSealing
    }

    pub fn petition_based_sealing(&self) -> bool {
        self.status == EligibilityStatus::PetitionSealing
    }

    /// Wire projection carrying the derived pathway booleans alongside the
    /// status, matching what report rendering and API clients consume.
    pub fn view(&self) -> VerdictView {
        VerdictView {
            questionnaire_id: self.questionnaire_id.clone(),
            eligibility_status: self.status.label(),
            automatic_expungement: self.automatic_expungement(),
            automatic_sealing: self.automatic_sealing(),
            petition_based_sealing: self.petition_based_sealing(),
            eligibility_details: self.details.clone(),
            recommendations: self.recommendations.clone(),
        }
    }
}

/// Serialized verdict as exposed over HTTP and in rendered reports.
#[derive(Debug, Clone, Serialize)]
pub struct VerdictView {
    pub questionnaire_id: QuestionnaireId,
    pub eligibility_status: &'static str,
    pub automatic_expungement: bool,
    pub automatic_sealing: bool,
    pub petition_based_sealing: bool,
    pub eligibility_details: EligibilityDetails,
    pub recommendations: Vec<Recommendation>,
}
