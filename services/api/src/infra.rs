use difficult_ai_core::workflows::conversation::{
    ConversationSession, RepositoryError, ScoreSchema, SessionId, SessionRepository,
};
use difficult_ai_core::workflows::scenario::DifficultyScale;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemorySessionRepository {
    sessions: Arc<Mutex<HashMap<SessionId, ConversationSession>>>,
}

impl InMemorySessionRepository {
    fn sessions(&self) -> std::sync::MutexGuard<'_, HashMap<SessionId, ConversationSession>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionRepository for InMemorySessionRepository {
    fn insert(&self, session: ConversationSession) -> Result<(), RepositoryError> {
        let mut guard = self.sessions();
        if guard.contains_key(session.id()) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(session.id().clone(), session);
        Ok(())
    }

    fn update(&self, session: ConversationSession) -> Result<(), RepositoryError> {
        let mut guard = self.sessions();
        if guard.contains_key(session.id()) {
            guard.insert(session.id().clone(), session);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<ConversationSession>, RepositoryError> {
        Ok(self.sessions().get(id).cloned())
    }
}

pub(crate) fn parse_schema(raw: &str) -> Result<ScoreSchema, String> {
    ScoreSchema::parse(raw).ok_or_else(|| format!("unknown scorecard schema '{raw}' (use v1 or v2)"))
}

pub(crate) fn parse_scale(raw: &str) -> Result<DifficultyScale, String> {
    DifficultyScale::parse(raw)
        .ok_or_else(|| format!("unknown difficulty scale '{raw}' (use legacy or normalized)"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_requires_existing_session() {
        let repository = InMemorySessionRepository::default();
        let session = ConversationSession::new(SessionId("session-a".to_string()));

        assert!(matches!(
            repository.update(session.clone()),
            Err(RepositoryError::NotFound)
        ));
        repository.insert(session.clone()).expect("insert succeeds");
        assert!(matches!(
            repository.insert(session.clone()),
            Err(RepositoryError::Conflict)
        ));
        repository.update(session).expect("update succeeds");
    }

    #[test]
    fn value_parsers_explain_bad_input() {
        assert_eq!(parse_schema("V2"), Ok(ScoreSchema::V2));
        assert!(parse_schema("v3").unwrap_err().contains("v1 or v2"));
        assert_eq!(parse_scale("1-5"), Ok(DifficultyScale::Legacy));
        assert!(parse_scale("percent").is_err());
    }
}
