use super::super::domain::TranscriptEntry;
use super::super::evaluation::Evaluation;
use crate::workflows::scenario::Scenario;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persistable bundle of a finished rehearsal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorecardDocument {
    pub scenario: Option<Scenario>,
    pub evaluation: Evaluation,
    pub transcript: Vec<TranscriptEntry>,
    pub generated_at: DateTime<Utc>,
}

impl ScorecardDocument {
    pub fn new(evaluation: Evaluation, transcript: Vec<TranscriptEntry>) -> Self {
        Self::generated_at(evaluation, transcript, Utc::now())
    }

    pub fn generated_at(
        evaluation: Evaluation,
        transcript: Vec<TranscriptEntry>,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            scenario: evaluation.scenario.clone(),
            evaluation,
            transcript,
            generated_at,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
