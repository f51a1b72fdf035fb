//! Rehearsal sessions: utterance analysis, the adaptive difficulty dial, and scorecards.
//!
//! Each session exclusively owns its difficulty controller, counters, commitments, and
//! transcript. Utterances for a session are expected one at a time; the service stores
//! sessions behind [`SessionRepository`] so concurrency lives at the storage boundary.

pub mod analysis;
pub mod difficulty;
pub mod domain;
pub mod evaluation;
pub mod metrics;
pub mod report;
pub mod repository;
pub mod router;
pub mod service;
pub mod session;

#[cfg(test)]
mod tests;

pub use analysis::{analyze, classify, detect_interruption, extract_commitments};
pub use difficulty::{DifficultyController, DifficultyState, MAX_LEVEL, MIN_LEVEL};
pub use domain::{
    ClassificationResult, Commitment, PressureCue, SessionId, Speaker, TranscriptEntry,
    UtteranceAnalysis,
};
pub use evaluation::{
    evaluate, CoachingFeedback, Evaluation, Evaluator, FeedbackBundle, LegacyFeedback,
    LegacyScores, PerformanceScores, ScoreSchema, ScoreSet,
};
pub use metrics::{SessionMetrics, SessionMetricsRecord};
pub use report::{render_summary, ScorecardDocument, ScorecardSummary};
pub use repository::{RepositoryError, SessionRepository};
pub use router::conversation_router;
pub use service::{ConversationService, ConversationServiceError};
pub use session::{ConversationSession, SessionStats, UtteranceOutcome};
