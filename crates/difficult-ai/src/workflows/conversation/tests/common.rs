use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::{json, Value};

use crate::workflows::conversation::domain::SessionId;
use crate::workflows::conversation::evaluation::ScoreSchema;
use crate::workflows::conversation::metrics::SessionMetricsRecord;
use crate::workflows::conversation::repository::{RepositoryError, SessionRepository};
use crate::workflows::conversation::session::ConversationSession;
use crate::workflows::conversation::{conversation_router, ConversationService};
use crate::workflows::scenario::DifficultyScale;

pub(super) const EPSILON: f64 = 1e-9;

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {expected}, got {actual}"
    );
}

pub(super) fn metrics(
    vague: u32,
    deflections: u32,
    commitments: u32,
    exchanges: u32,
    current: f64,
    scenario: f64,
) -> SessionMetricsRecord {
    SessionMetricsRecord {
        vague_response_count: vague,
        deflection_count: deflections,
        commitments_made: commitments,
        total_exchanges: exchanges,
        current_difficulty: current,
        scenario_difficulty: scenario,
    }
}

pub(super) fn scenario_json() -> Value {
    json!({
        "persona_type": "ELITE_INTERVIEWER",
        "company": "Northwind Analytics",
        "role": "Staff Engineer",
        "stakes": "Final round for a lead position",
        "user_goal": "Secure a written offer",
        "difficulty": 0.5,
    })
}

pub(super) fn build_service(
    schema: ScoreSchema,
) -> (ConversationService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service =
        ConversationService::new(repository.clone(), schema, DifficultyScale::Normalized);
    (service, repository)
}

pub(super) fn router_with_service(service: ConversationService<MemoryRepository>) -> axum::Router {
    conversation_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) sessions: Arc<Mutex<HashMap<SessionId, ConversationSession>>>,
}

impl SessionRepository for MemoryRepository {
    fn insert(&self, session: ConversationSession) -> Result<(), RepositoryError> {
        let mut guard = self.sessions.lock().expect("repository mutex poisoned");
        if guard.contains_key(session.id()) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(session.id().clone(), session);
        Ok(())
    }

    fn update(&self, session: ConversationSession) -> Result<(), RepositoryError> {
        let mut guard = self.sessions.lock().expect("repository mutex poisoned");
        guard.insert(session.id().clone(), session);
        Ok(())
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<ConversationSession>, RepositoryError> {
        let guard = self.sessions.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

pub(super) struct UnavailableRepository;

impl SessionRepository for UnavailableRepository {
    fn insert(&self, _session: ConversationSession) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _session: ConversationSession) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &SessionId) -> Result<Option<ConversationSession>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
