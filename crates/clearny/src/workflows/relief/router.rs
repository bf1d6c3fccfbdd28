use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;

use super::domain::{QuestionnaireId, QuestionnaireSubmission, ScreeningStatus};
use super::repository::{NotificationPublisher, RepositoryError, ScreeningRepository};
use super::service::{ReliefScreeningService, ScreeningServiceError};

/// Router builder exposing HTTP endpoints for intake, evaluation, and
/// stateless previews.
pub fn relief_router<R, N>(service: Arc<ReliefScreeningService<R, N>>) -> Router
where
    R: ScreeningRepository + 'static,
    N: NotificationPublisher + 'static,
{
    Router::new()
        .route("/api/v1/relief/questionnaires", post(submit_handler::<R, N>))
        .route(
            "/api/v1/relief/questionnaires/:questionnaire_id",
            get(status_handler::<R, N>),
        )
        .route(
            "/api/v1/relief/questionnaires/:questionnaire_id/evaluate",
            post(evaluate_handler::<R, N>),
        )
        .route(
            "/api/v1/relief/screenings/preview",
            post(preview_handler::<R, N>),
        )
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct EvaluateRequest {
    #[serde(default)]
    pub(crate) as_of: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PreviewRequest {
    #[serde(flatten)]
    pub(crate) answers: QuestionnaireSubmission,
    #[serde(default)]
    pub(crate) as_of: Option<NaiveDate>,
}

pub(crate) async fn submit_handler<R, N>(
    State(service): State<Arc<ReliefScreeningService<R, N>>>,
    axum::Json(submission): axum::Json<QuestionnaireSubmission>,
) -> Response
where
    R: ScreeningRepository + 'static,
    N: NotificationPublisher + 'static,
{
    match service.submit(submission) {
        Ok(record) => {
            let view = record.status_view();
            (StatusCode::ACCEPTED, axum::Json(view)).into_response()
        }
        Err(ScreeningServiceError::Intake(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(ScreeningServiceError::Repository(RepositoryError::Conflict)) => {
            let payload = json!({
                "error": "questionnaire already exists",
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn status_handler<R, N>(
    State(service): State<Arc<ReliefScreeningService<R, N>>>,
    Path(questionnaire_id): Path<String>,
) -> Response
where
    R: ScreeningRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let id = QuestionnaireId(questionnaire_id);
    match service.get(&id) {
        Ok(record) => {
            let view = record.status_view();
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(ScreeningServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "questionnaire_id": id.0,
                "status": ScreeningStatus::Submitted.label(),
                "decision_rationale": "pending evaluation",
                "eligibility_status": serde_json::Value::Null,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn evaluate_handler<R, N>(
    State(service): State<Arc<ReliefScreeningService<R, N>>>,
    Path(questionnaire_id): Path<String>,
    payload: Option<axum::Json<EvaluateRequest>>,
) -> Response
where
    R: ScreeningRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let id = QuestionnaireId(questionnaire_id);
    let as_of = payload
        .and_then(|axum::Json(request)| request.as_of)
        .unwrap_or_else(|| Local::now().date_naive());

    match service.evaluate(&id, as_of) {
        Ok(verdict) => (StatusCode::OK, axum::Json(verdict.view())).into_response(),
        Err(ScreeningServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "error": format!("questionnaire {} not found", id.0),
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn preview_handler<R, N>(
    State(service): State<Arc<ReliefScreeningService<R, N>>>,
    axum::Json(request): axum::Json<PreviewRequest>,
) -> Response
where
    R: ScreeningRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let as_of = request.as_of.unwrap_or_else(|| Local::now().date_naive());

    match service.preview(request.answers, as_of) {
        Ok(verdict) => (StatusCode::OK, axum::Json(verdict.view())).into_response(),
        Err(ScreeningServiceError::Intake(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
