use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use serde_json::Value;

use super::domain::SessionId;
use super::evaluation::{Evaluation, Evaluator, ScoreSchema};
use super::metrics::SessionMetricsRecord;
use super::report::ScorecardDocument;
use super::repository::{RepositoryError, SessionRepository};
use super::session::{ConversationSession, SessionStats, UtteranceOutcome};
use crate::workflows::scenario::{DifficultyScale, Scenario, ScenarioError};

/// Service composing session storage with the shared evaluator.
pub struct ConversationService<R> {
    repository: Arc<R>,
    evaluator: Mutex<Evaluator>,
    scale: DifficultyScale,
}

static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_session_id() -> SessionId {
    let id = SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SessionId(format!("session-{id:06}"))
}

impl<R> ConversationService<R>
where
    R: SessionRepository + 'static,
{
    pub fn new(repository: Arc<R>, schema: ScoreSchema, scale: DifficultyScale) -> Self {
        Self {
            repository,
            evaluator: Mutex::new(Evaluator::new(schema)),
            scale,
        }
    }

    pub fn schema(&self) -> ScoreSchema {
        self.evaluator().schema()
    }

    pub fn scale(&self) -> DifficultyScale {
        self.scale
    }

    /// Validates a raw scenario mapping under `scale`, or the service default.
    pub fn parse_scenario(
        &self,
        raw: &Value,
        scale: Option<DifficultyScale>,
    ) -> Result<Scenario, ConversationServiceError> {
        Ok(Scenario::from_value(raw, scale.unwrap_or(self.scale))?)
    }

    /// Open a new rehearsal, optionally seeded from a raw scenario mapping.
    pub fn start_session(
        &self,
        scenario: Option<&Value>,
        scale: Option<DifficultyScale>,
    ) -> Result<SessionStats, ConversationServiceError> {
        let scenario = scenario
            .map(|raw| self.parse_scenario(raw, scale))
            .transpose()?;
        let id = next_session_id();
        let session = match scenario {
            Some(scenario) => ConversationSession::with_scenario(id, scenario),
            None => ConversationSession::new(id),
        };
        let stats = session.stats();
        self.repository.insert(session)?;

        tracing::info!(
            session_id = %stats.session_id,
            level = stats.difficulty_level,
            "session started"
        );
        Ok(stats)
    }

    pub fn submit_utterance(
        &self,
        id: &SessionId,
        text: &str,
    ) -> Result<UtteranceOutcome, ConversationServiceError> {
        let mut session = self.load(id)?;
        let outcome = session.process_utterance(text);
        self.repository.update(session)?;
        Ok(outcome)
    }

    pub fn record_reply(&self, id: &SessionId, text: &str) -> Result<(), ConversationServiceError> {
        let mut session = self.load(id)?;
        session.record_adversary_turn(text);
        self.repository.update(session)?;
        Ok(())
    }

    pub fn stats(&self, id: &SessionId) -> Result<SessionStats, ConversationServiceError> {
        Ok(self.load(id)?.stats())
    }

    pub fn reset_session(&self, id: &SessionId) -> Result<SessionStats, ConversationServiceError> {
        let mut session = self.load(id)?;
        session.reset();
        let stats = session.stats();
        self.repository.update(session)?;
        Ok(stats)
    }

    /// Score a stored session; the result is appended to the evaluator history.
    pub fn evaluate_session(
        &self,
        id: &SessionId,
        schema: Option<ScoreSchema>,
    ) -> Result<Evaluation, ConversationServiceError> {
        Ok(self.scorecard(id, schema)?.evaluation)
    }

    /// Score a stored session and bundle it with its transcript.
    pub fn scorecard(
        &self,
        id: &SessionId,
        schema: Option<ScoreSchema>,
    ) -> Result<ScorecardDocument, ConversationServiceError> {
        let session = self.load(id)?;
        let evaluation = self.record_evaluation(
            schema,
            session.metrics(),
            session.scenario().cloned(),
        );
        tracing::info!(session_id = %id, schema = %evaluation.scores.schema(), "session evaluated");
        Ok(ScorecardDocument::new(
            evaluation,
            session.transcript().to_vec(),
        ))
    }

    /// Score a metrics record supplied by the caller. Difficulties in both the record and
    /// the scenario are read on `scale`, or the service default.
    pub fn evaluate_metrics(
        &self,
        metrics: SessionMetricsRecord,
        scenario: Option<&Value>,
        scale: Option<DifficultyScale>,
        schema: Option<ScoreSchema>,
    ) -> Result<Evaluation, ConversationServiceError> {
        let scale = scale.unwrap_or(self.scale);
        let scenario = scenario
            .map(|raw| self.parse_scenario(raw, Some(scale)))
            .transpose()?;
        let metrics = metrics.normalized_from(scale);
        Ok(self.record_evaluation(schema, metrics, scenario))
    }

    pub fn evaluations(&self) -> Vec<Evaluation> {
        self.evaluator().history().to_vec()
    }

    fn record_evaluation(
        &self,
        schema: Option<ScoreSchema>,
        metrics: SessionMetricsRecord,
        scenario: Option<Scenario>,
    ) -> Evaluation {
        let mut evaluator = self.evaluator();
        let schema = schema.unwrap_or(evaluator.schema());
        evaluator.evaluate_with(schema, metrics, scenario)
    }

    fn evaluator(&self) -> std::sync::MutexGuard<'_, Evaluator> {
        self.evaluator
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn load(&self, id: &SessionId) -> Result<ConversationSession, ConversationServiceError> {
        let session = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(session)
    }
}

/// Error raised by the conversation service.
#[derive(Debug, thiserror::Error)]
pub enum ConversationServiceError {
    #[error(transparent)]
    Scenario(#[from] ScenarioError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
