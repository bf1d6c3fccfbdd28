use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{QuestionnaireId, ScreeningProfile, ScreeningStatus};
use super::evaluation::EligibilityVerdict;

/// Repository record containing the profile, verdict, and status metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningRecord {
    pub profile: ScreeningProfile,
    pub status: ScreeningStatus,
    pub verdict: Option<EligibilityVerdict>,
}

impl ScreeningRecord {
    pub fn decision_rationale(&self) -> String {
        match &self.verdict {
            Some(verdict) => format!(
                "{}: {}",
                verdict.status.summary(),
                verdict.details.primary_reason
            ),
            None => "pending evaluation".to_string(),
        }
    }

    pub fn status_view(&self) -> ScreeningStatusView {
        ScreeningStatusView {
            questionnaire_id: self.profile.questionnaire_id.clone(),
            status: self.status.label(),
            decision_rationale: self.decision_rationale(),
            eligibility_status: self
                .verdict
                .as_ref()
                .map(|verdict| verdict.status.label()),
        }
    }
}

/// Storage abstraction so the service module can be exercised in isolation.
pub trait ScreeningRepository: Send + Sync {
    fn insert(&self, record: ScreeningRecord) -> Result<ScreeningRecord, RepositoryError>;
    fn update(&self, record: ScreeningRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &QuestionnaireId) -> Result<Option<ScreeningRecord>, RepositoryError>;
    fn pending(&self, limit: usize) -> Result<Vec<ScreeningRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Trait describing outbound notification hooks (e-mail or report adapters).
pub trait NotificationPublisher: Send + Sync {
    fn publish(&self, notification: ReliefNotification) -> Result<(), NotificationError>;
}

/// Notification payload so routes/tests can assert integration boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReliefNotification {
    pub template: String,
    pub questionnaire_id: QuestionnaireId,
    pub details: BTreeMap<String, String>,
}

/// Notification dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}

/// Sanitized representation of a screening's exposed status.
#[derive(Debug, Clone, Serialize)]
pub struct ScreeningStatusView {
    pub questionnaire_id: QuestionnaireId,
    pub status: &'static str,
    pub decision_rationale: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eligibility_status: Option<&'static str>,
}
