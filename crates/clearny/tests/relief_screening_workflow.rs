//! Integration specifications for the relief screening workflow.
//!
//! Scenarios exercise the public service facade and HTTP router end-to-end
//! so intake, evaluation, and routing are validated without reaching into
//! private modules.

mod common {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use chrono::NaiveDate;

    use clearny::workflows::relief::{
        EvaluationConfig, NotificationError, NotificationPublisher, QuestionnaireId,
        QuestionnaireSubmission, ReliefNotification, ReliefScreeningService, RepositoryError,
        ScreeningRecord, ScreeningRepository,
    };

    pub(super) fn evaluation_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid date")
    }

    pub(super) fn submission() -> QuestionnaireSubmission {
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

    #[derive(Default, Clone)]
    pub(super) struct MemoryRepository {
        records: Arc<Mutex<HashMap<QuestionnaireId, ScreeningRecord>>>,
    }

    impl ScreeningRepository for MemoryRepository {
        fn insert(&self, record: ScreeningRecord) -> Result<ScreeningRecord, RepositoryError> {
            let mut guard = self.records.lock().expect("lock");
            if guard.contains_key(&record.profile.questionnaire_id) {
                return Err(RepositoryError::Conflict);
            }
            guard.insert(record.profile.questionnaire_id.clone(), record.clone());
            Ok(record)
        }

        fn update(&self, record: ScreeningRecord) -> Result<(), RepositoryError> {
            let mut guard = self.records.lock().expect("lock");
            guard.insert(record.profile.questionnaire_id.clone(), record);
            Ok(())
        }

        fn fetch(&self, id: &QuestionnaireId) -> Result<Option<ScreeningRecord>, RepositoryError> {
            let guard = self.records.lock().expect("lock");
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
            self.events.lock().expect("lock").clone()
        }
    }

    impl NotificationPublisher for MemoryNotifications {
        fn publish(&self, notification: ReliefNotification) -> Result<(), NotificationError> {
            self.events.lock().expect("lock").push(notification);
            Ok(())
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
            EvaluationConfig::statutory(),
        );
        (service, repository, notifications)
    }
}

mod intake {
    use super::common::*;
    use clearny::workflows::relief::{ScreeningServiceError, ScreeningStatus};

    #[test]
    fn out_of_state_submissions_trigger_intake_error() {
        let (service, _, _) = build_service();
        let mut rejected = submission();
        rejected.conviction_state = Some("other".to_string());

        match service.submit(rejected) {
            Err(ScreeningServiceError::Intake(err)) => {
                assert!(err.to_string().contains("New York"));
            }
            other => panic!("expected intake violation, got {other:?}"),
        }
    }

    #[test]
    fn submissions_are_stored_with_normalized_profiles() {
        let (service, _, _) = build_service();

        let record = service.submit(submission()).expect("submission succeeds");

        assert_eq!(record.status, ScreeningStatus::Submitted);
        assert_eq!(record.profile.conviction_month, Some(1));
        assert_eq!(record.profile.conviction_year, Some(2016));
    }
}

mod evaluation {
    use super::common::*;
    use clearny::workflows::relief::{EligibilityStatus, ScreeningStatus};

    #[test]
    fn qualifying_possession_record_reaches_expungement() {
        let (service, repository, notifications) = build_service();
        let record = service.submit(submission()).expect("submission succeeds");

        let verdict = service
            .evaluate(&record.profile.questionnaire_id, evaluation_date())
            .expect("evaluation succeeds");

        assert_eq!(verdict.status, EligibilityStatus::AutomaticExpungement);
        assert!(verdict.automatic_expungement());

        let stored = {
            use clearny::workflows::relief::ScreeningRepository;
            repository
                .fetch(&record.profile.questionnaire_id)
                .expect("repo fetch")
                .expect("record present")
        };
        assert_eq!(stored.status, ScreeningStatus::ReliefAvailable);
        assert_eq!(notifications.events().len(), 1);
    }

    #[test]
    fn supervision_dominates_an_otherwise_qualifying_record() {
        let (service, _, notifications) = build_service();
        let mut supervised = submission();
        supervised.on_supervision = Some("yes".to_string());
        let record = service.submit(supervised).expect("submission succeeds");

        let verdict = service
            .evaluate(&record.profile.questionnaire_id, evaluation_date())
            .expect("evaluation succeeds");

        assert_eq!(verdict.status, EligibilityStatus::NotEligible);
        assert!(verdict
            .details
            .primary_reason
            .contains("probation or parole"));
        assert!(notifications.events().is_empty());
    }

    #[test]
    fn preview_matches_persisted_evaluation() {
        let (service, _, _) = build_service();

        let preview = service
            .preview(submission(), evaluation_date())
            .expect("preview succeeds");
        let record = service.submit(submission()).expect("submission succeeds");
        let stored = service
            .evaluate(&record.profile.questionnaire_id, evaluation_date())
            .expect("evaluation succeeds");

        assert_eq!(preview.status, stored.status);
        assert_eq!(preview.details, stored.details);
    }
}

mod routing {
    use super::common::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use clearny::workflows::relief::relief_router;
    use tower::ServiceExt;

    #[tokio::test]
    async fn submit_then_evaluate_over_http() {
        let (service, _, _) = build_service();
        let service = Arc::new(service);
        let router = relief_router(service.clone());

        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/relief/questionnaires")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::to_vec(&submission()).expect("serialize submission"),
            ))
            .expect("request");

        let response = router
            .clone()
            .oneshot(request)
            .await
            .expect("router dispatch");
        assert_eq!(response.status(), StatusCode::ACCEPTED);

        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        let payload: Value = serde_json::from_slice(&body).expect("json");
        let questionnaire_id = payload
            .get("questionnaire_id")
            .and_then(Value::as_str)
            .expect("tracking id")
            .to_string();

        let evaluate = Request::builder()
            .method("POST")
            .uri(format!(
                "/api/v1/relief/questionnaires/{questionnaire_id}/evaluate"
            ))
            .header("content-type", "application/json")
            .body(Body::from(
                json!({ "as_of": evaluation_date() }).to_string(),
            ))
            .expect("request");

        let response = router.oneshot(evaluate).await.expect("router dispatch");
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        let payload: Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(
            payload.get("eligibility_status").and_then(Value::as_str),
            Some("automatic_expungement")
        );
        assert_eq!(
            payload
                .get("automatic_expungement")
                .and_then(Value::as_bool),
            Some(true)
        );
    }
}
