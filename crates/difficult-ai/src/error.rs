use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::conversation::{ConversationServiceError, RepositoryError};
use crate::workflows::scenario::ScenarioError;
use crate::workflows::transcript::TranscriptImportError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Transcript(TranscriptImportError),
    Scenario(ScenarioError),
    Conversation(ConversationServiceError),
    Serialization(serde_json::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Transcript(err) => write!(f, "transcript error: {}", err),
            AppError::Scenario(err) => write!(f, "scenario error: {}", err),
            AppError::Conversation(err) => write!(f, "conversation error: {}", err),
            AppError::Serialization(err) => write!(f, "serialization error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Transcript(err) => Some(err),
            AppError::Scenario(err) => Some(err),
            AppError::Conversation(err) => Some(err),
            AppError::Serialization(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Transcript(_) | AppError::Serialization(_) => StatusCode::BAD_REQUEST,
            AppError::Scenario(_) | AppError::Conversation(ConversationServiceError::Scenario(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Conversation(ConversationServiceError::Repository(RepositoryError::NotFound)) => {
                StatusCode::NOT_FOUND
            }
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Conversation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<TranscriptImportError> for AppError {
    fn from(value: TranscriptImportError) -> Self {
        Self::Transcript(value)
    }
}

impl From<ScenarioError> for AppError {
    fn from(value: ScenarioError) -> Self {
        Self::Scenario(value)
    }
}

impl From<ConversationServiceError> for AppError {
    fn from(value: ConversationServiceError) -> Self {
        Self::Conversation(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_errors_map_to_unprocessable() {
        let error = AppError::from(ScenarioError::UnknownPersona("BARISTA".to_string()));
        assert_eq!(error.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn transcript_errors_map_to_bad_request() {
        let error = AppError::from(TranscriptImportError::UnknownRole {
            line: 3,
            role: "narrator".to_string(),
        });
        assert_eq!(error.to_string(), "transcript error: unknown speaker role 'narrator' on row 3");
        assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unknown_sessions_map_to_not_found() {
        let error = AppError::from(ConversationServiceError::Repository(RepositoryError::NotFound));
        assert_eq!(error.to_string(), "conversation error: session not found");
        assert_eq!(error.into_response().status(), StatusCode::NOT_FOUND);
    }
}
