use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::workflows::relief::domain::{
    Answer, ConvictionLevel, OffenseType, QuestionnaireId, QuestionnaireSubmission,
    ScreeningProfile,
};
use crate::workflows::relief::evaluation::{EligibilityEngine, EvaluationConfig};
use crate::workflows::relief::intake::IntakeGuard;
use crate::workflows::relief::repository::{
    NotificationError, NotificationPublisher, ReliefNotification, RepositoryError,
    ScreeningRecord, ScreeningRepository,
};
use crate::workflows::relief::{relief_router, ReliefScreeningService};

/// Pinned reference date so waiting-period assertions are deterministic.
pub(super) fn evaluation_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid date")
}

pub(super) fn statutory_config() -> EvaluationConfig {
    EvaluationConfig::statutory()
}

pub(super) fn engine() -> EligibilityEngine {
    EligibilityEngine::new(statutory_config())
}

pub(super) fn guard() -> IntakeGuard {
    IntakeGuard::new()
}

pub(super) fn profile(suffix: &str) -> ScreeningProfile {
    ScreeningProfile::unanswered(QuestionnaireId(format!("q-{suffix}")))
}

/// Profile with every hard disqualifier answered in the clear.
pub(super) fn clean_profile(suffix: &str) -> ScreeningProfile {
    let mut profile = profile(suffix);
    profile.on_supervision = Some(Answer::No);
    profile.has_excluded_offenses = Some(Answer::No);
    profile.sentence_completed = Some(Answer::Yes);
    profile
}

pub(super) fn mrta_profile(suffix: &str) -> ScreeningProfile {
    let mut profile = clean_profile(suffix);
    profile.offense_types = vec![OffenseType::Possession];
    profile.possession_within_limit = Some(Answer::Yes);
    profile.conviction_month = Some(1);
    profile.conviction_year = Some(2016);
    profile
}

pub(super) fn clean_slate_profile(suffix: &str, level: ConvictionLevel) -> ScreeningProfile {
    let mut profile = clean_profile(suffix);
    profile.conviction_level = Some(level);
    profile.conviction_month = Some(3);
    profile.conviction_year = Some(2016);
    profile.other_convictions = Some(Answer::No);
    profile.possession_within_limit = Some(Answer::No);
    profile
}

/// Submission that evaluates to automatic MRTA expungement.
pub(super) fn submission() -> QuestionnaireSubmission {
    QuestionnaireSubmission {
        conviction_state: Some("ny".to_string()),
        has_marijuana_conviction: Some("yes".to_string()),
        offense_types: vec!["possession".to_string()],
        conviction_month: Some("1".to_string()),
        conviction_year: Some("2016".to_string()),
        possession_amount: Some("yes".to_string()),
        age_at_offense: Some("yes".to_string()),
        received_notice: Some("no".to_string()),
        conviction_level: Some("misdemeanor".to_string()),
        served_time: Some("no".to_string()),
        release_month: None,
        release_year: None,
        other_convictions: Some("no".to_string()),
        on_supervision: Some("no".to_string()),
        has_excluded_offenses: Some("no".to_string()),
        total_convictions: Some("1".to_string()),
        total_felonies: Some("0".to_string()),
        ten_years_passed: Some("no".to_string()),
        sentence_completed: Some("yes".to_string()),
    }
}

/// Submission that evaluates to petition-based sealing.
pub(super) fn petition_submission() -> QuestionnaireSubmission {
    QuestionnaireSubmission {
        offense_types: vec!["sale".to_string()],
        ten_years_passed: Some("yes".to_string()),
        total_convictions: Some("2".to_string()),
        total_felonies: Some("1".to_string()),
        other_convictions: Some("yes".to_string()),
        on_supervision: Some("no".to_string()),
        has_excluded_offenses: Some("no".to_string()),
        sentence_completed: Some("yes".to_string()),
        ..QuestionnaireSubmission::default()
    }
}

pub(super) fn build_service() -> (
    ReliefScreeningService<MemoryRepository, MemoryNotifications>,
    Arc<MemoryRepository>,
    Arc<MemoryNotifications>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let notifications = Arc::new(MemoryNotifications::default());
    let service = ReliefScreeningService::new(
        repository.clone(),
        notifications.clone(),
        statutory_config(),
    );
    (service, repository, notifications)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<QuestionnaireId, ScreeningRecord>>>,
}

impl ScreeningRepository for MemoryRepository {
    fn insert(&self, record: ScreeningRecord) -> Result<ScreeningRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.profile.questionnaire_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.profile.questionnaire_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: ScreeningRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.profile.questionnaire_id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &QuestionnaireId) -> Result<Option<ScreeningRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn pending(&self, _limit: usize) -> Result<Vec<ScreeningRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryNotifications {
    events: Arc<Mutex<Vec<ReliefNotification>>>,
}

impl MemoryNotifications {
    pub(super) fn events(&self) -> Vec<ReliefNotification> {
        self.events.lock().expect("notification mutex poisoned").clone()
    }
}

impl NotificationPublisher for MemoryNotifications {
    fn publish(&self, notification: ReliefNotification) -> Result<(), NotificationError> {
        self.events
            .lock()
            .expect("notification mutex poisoned")
            .push(notification);
        Ok(())
    }
}

pub(super) struct ConflictRepository;

impl ScreeningRepository for ConflictRepository {
    fn insert(&self, _record: ScreeningRecord) -> Result<ScreeningRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn update(&self, _record: ScreeningRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn fetch(&self, _id: &QuestionnaireId) -> Result<Option<ScreeningRecord>, RepositoryError> {
        Ok(None)
    }

    fn pending(&self, _limit: usize) -> Result<Vec<ScreeningRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableRepository;

impl ScreeningRepository for UnavailableRepository {
    fn insert(&self, _record: ScreeningRecord) -> Result<ScreeningRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: ScreeningRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &QuestionnaireId) -> Result<Option<ScreeningRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn pending(&self, _limit: usize) -> Result<Vec<ScreeningRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn relief_router_with_service(
    service: ReliefScreeningService<MemoryRepository, MemoryNotifications>,
) -> axum::Router {
    relief_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
