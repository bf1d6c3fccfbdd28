use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;

use super::domain::{QuestionnaireId, QuestionnaireSubmission, ScreeningStatus};
use super::evaluation::{EligibilityEngine, EligibilityStatus, EligibilityVerdict, EvaluationConfig};
use super::intake::{IntakeGuard, IntakeViolation};
use super::repository::{
    NotificationError, NotificationPublisher, ReliefNotification, RepositoryError, ScreeningRecord,
    ScreeningRepository,
};

/// Service composing the intake guard, repository, and eligibility engine.
pub struct ReliefScreeningService<R, N> {
    guard: IntakeGuard,
    repository: Arc<R>,
    notifications: Arc<N>,
    engine: Arc<EligibilityEngine>,
}

static QUESTIONNAIRE_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_questionnaire_id() -> QuestionnaireId {
    let id = QUESTIONNAIRE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    QuestionnaireId(format!("q-{id:06}"))
}

impl<R, N> ReliefScreeningService<R, N>
where
    R: ScreeningRepository + 'static,
    N: NotificationPublisher + 'static,
{
    pub fn new(repository: Arc<R>, notifications: Arc<N>, config: EvaluationConfig) -> Self {
        Self {
            guard: IntakeGuard::new(),
            repository,
            notifications,
            engine: Arc::new(EligibilityEngine::new(config)),
        }
    }

    /// Submit a new questionnaire, returning the repository-backed record.
    pub fn submit(
        &self,
        submission: QuestionnaireSubmission,
    ) -> Result<ScreeningRecord, ScreeningServiceError> {
        let questionnaire_id = next_questionnaire_id();
        let profile = self
            .guard
            .profile_from_submission(questionnaire_id, &submission)?;

        let record = ScreeningRecord {
            profile,
            status: ScreeningStatus::Submitted,
            verdict: None,
        };

        let stored = self.repository.insert(record)?;
        Ok(stored)
    }

    /// Evaluate a stored questionnaire as of the given date and persist the
    /// verdict.
    pub fn evaluate(
        &self,
        questionnaire_id: &QuestionnaireId,
        as_of: NaiveDate,
    ) -> Result<EligibilityVerdict, ScreeningServiceError> {
        let mut record = self
            .repository
            .fetch(questionnaire_id)?
            .ok_or(RepositoryError::NotFound)?;

        let verdict = self.engine.evaluate(&record.profile, as_of);

        record.status = match verdict.status {
            EligibilityStatus::AutomaticExpungement | EligibilityStatus::AutomaticSealing => {
                ScreeningStatus::ReliefAvailable
            }
            EligibilityStatus::PetitionSealing => ScreeningStatus::PetitionRequired,
            EligibilityStatus::NotEligible => ScreeningStatus::NotEligible,
        };
        record.verdict = Some(verdict.clone());

        self.repository.update(record)?;

        if matches!(
            verdict.status,
            EligibilityStatus::AutomaticExpungement | EligibilityStatus::AutomaticSealing
        ) {
            let mut details = BTreeMap::new();
            details.insert("status".to_string(), verdict.status.label().to_string());
            self.notifications.publish(ReliefNotification {
                template: "relief_available".to_string(),
                questionnaire_id: verdict.questionnaire_id.clone(),
                details,
            })?;
        }

        Ok(verdict)
    }

    /// Run intake and evaluation without persisting anything. Backs the
    /// client-side preview so it cannot drift from the stored pathway.
    pub fn preview(
        &self,
        submission: QuestionnaireSubmission,
        as_of: NaiveDate,
    ) -> Result<EligibilityVerdict, ScreeningServiceError> {
        let profile = self
            .guard
            .profile_from_submission(QuestionnaireId("preview".to_string()), &submission)?;
        Ok(self.engine.evaluate(&profile, as_of))
    }

    /// Fetch a screening record and current status for API responses.
    pub fn get(
        &self,
        questionnaire_id: &QuestionnaireId,
    ) -> Result<ScreeningRecord, ScreeningServiceError> {
        let record = self
            .repository
            .fetch(questionnaire_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }
}

/// Error raised by the screening service.
#[derive(Debug, thiserror::Error)]
pub enum ScreeningServiceError {
    #[error(transparent)]
    Intake(#[from] IntakeViolation),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Notification(#[from] NotificationError),
}
