use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::domain::SessionId;
use super::evaluation::ScoreSchema;
use super::metrics::SessionMetricsRecord;
use super::repository::{RepositoryError, SessionRepository};
use super::service::{ConversationService, ConversationServiceError};
use crate::workflows::scenario::{
    is_scenario_complete, missing_fields, validate_scenario, DifficultyScale,
};

/// Router builder exposing session, evaluation, and scenario endpoints.
pub fn conversation_router<R>(service: Arc<ConversationService<R>>) -> Router
where
    R: SessionRepository + 'static,
{
    Router::new()
        .route("/api/v1/sessions", post(start_handler::<R>))
        .route("/api/v1/sessions/:session_id", get(stats_handler::<R>))
        .route(
            "/api/v1/sessions/:session_id/utterances",
            post(utterance_handler::<R>),
        )
        .route(
            "/api/v1/sessions/:session_id/replies",
            post(reply_handler::<R>),
        )
        .route(
            "/api/v1/sessions/:session_id/reset",
            post(reset_handler::<R>),
        )
        .route(
            "/api/v1/sessions/:session_id/evaluation",
            post(session_evaluation_handler::<R>),
        )
        .route(
            "/api/v1/evaluations",
            post(metrics_evaluation_handler::<R>).get(history_handler::<R>),
        )
        .route(
            "/api/v1/scenarios/validate",
            post(validate_handler::<R>),
        )
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct StartSessionRequest {
    #[serde(default)]
    pub scenario: Option<Value>,
    #[serde(default)]
    pub scale: Option<DifficultyScale>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UtteranceRequest {
    pub text: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SchemaQuery {
    #[serde(default)]
    pub schema: Option<ScoreSchema>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ScaleQuery {
    #[serde(default)]
    pub scale: Option<DifficultyScale>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct EvaluationRequest {
    #[serde(default)]
    pub metrics: SessionMetricsRecord,
    #[serde(default)]
    pub scenario: Option<Value>,
    #[serde(default)]
    pub scale: Option<DifficultyScale>,
    #[serde(default)]
    pub schema: Option<ScoreSchema>,
}

pub(crate) async fn start_handler<R>(
    State(service): State<Arc<ConversationService<R>>>,
    axum::Json(request): axum::Json<StartSessionRequest>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.start_session(request.scenario.as_ref(), request.scale) {
        Ok(stats) => (StatusCode::CREATED, axum::Json(stats)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn stats_handler<R>(
    State(service): State<Arc<ConversationService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.stats(&SessionId(session_id)) {
        Ok(stats) => (StatusCode::OK, axum::Json(stats)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn utterance_handler<R>(
    State(service): State<Arc<ConversationService<R>>>,
    Path(session_id): Path<String>,
    axum::Json(request): axum::Json<UtteranceRequest>,
) -> Response
where
    R: SessionRepository + 'static,
{
    let id = SessionId(session_id);
    match service.submit_utterance(&id, &request.text) {
        Ok(outcome) => {
            let payload = json!({
                "session_id": id,
                "analysis": outcome.analysis,
                "difficulty": outcome.difficulty,
                "cue_summary": outcome.cue_summary(),
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn reply_handler<R>(
    State(service): State<Arc<ConversationService<R>>>,
    Path(session_id): Path<String>,
    axum::Json(request): axum::Json<UtteranceRequest>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.record_reply(&SessionId(session_id), &request.text) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn reset_handler<R>(
    State(service): State<Arc<ConversationService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.reset_session(&SessionId(session_id)) {
        Ok(stats) => (StatusCode::OK, axum::Json(stats)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn session_evaluation_handler<R>(
    State(service): State<Arc<ConversationService<R>>>,
    Path(session_id): Path<String>,
    Query(query): Query<SchemaQuery>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.evaluate_session(&SessionId(session_id), query.schema) {
        Ok(evaluation) => (StatusCode::OK, axum::Json(evaluation)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn metrics_evaluation_handler<R>(
    State(service): State<Arc<ConversationService<R>>>,
    axum::Json(request): axum::Json<EvaluationRequest>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.evaluate_metrics(
        request.metrics,
        request.scenario.as_ref(),
        request.scale,
        request.schema,
    ) {
        Ok(evaluation) => (StatusCode::OK, axum::Json(evaluation)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn history_handler<R>(
    State(service): State<Arc<ConversationService<R>>>,
) -> Response
where
    R: SessionRepository + 'static,
{
    let evaluations = service.evaluations();
    let payload = json!({
        "count": evaluations.len(),
        "evaluations": evaluations,
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn validate_handler<R>(
    State(service): State<Arc<ConversationService<R>>>,
    Query(query): Query<ScaleQuery>,
    axum::Json(raw): axum::Json<Value>,
) -> Response
where
    R: SessionRepository + 'static,
{
    let scale = query.scale.unwrap_or(service.scale());
    let payload = json!({
        "complete": is_scenario_complete(&raw, scale),
        "errors": validate_scenario(&raw, scale),
        "missing_fields": missing_fields(&raw),
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

fn error_response(error: ConversationServiceError) -> Response {
    match error {
        ConversationServiceError::Scenario(error) => {
            let payload = json!({
                "error": error.to_string(),
                "errors": error.messages(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        ConversationServiceError::Repository(RepositoryError::NotFound) => {
            let payload = json!({
                "error": "session not found",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        ConversationServiceError::Repository(RepositoryError::Conflict) => {
            let payload = json!({
                "error": "session already exists",
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        other => {
            tracing::error!(error = %other, "conversation request failed");
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
