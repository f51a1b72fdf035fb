use super::domain::SessionId;
use super::session::ConversationSession;

/// Storage abstraction so the service can be exercised without a backing store.
pub trait SessionRepository: Send + Sync {
    fn insert(&self, session: ConversationSession) -> Result<(), RepositoryError>;
    fn update(&self, session: ConversationSession) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &SessionId) -> Result<Option<ConversationSession>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("session already exists")]
    Conflict,
    #[error("session not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
