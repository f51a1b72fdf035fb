use super::analysis::analyze;
use super::difficulty::{level_from_normalized, DifficultyController, DifficultyState};
use super::domain::{
    Commitment, PressureCue, SessionId, Speaker, TranscriptEntry, UtteranceAnalysis,
};
use super::metrics::{SessionMetrics, SessionMetricsRecord};
use crate::workflows::scenario::{NormalizedDifficulty, Scenario};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const QUALITY_MAX: f64 = 100.0;
const VAGUE_PENALTY: f64 = 10.0;
const DEFLECTION_PENALTY: f64 = 15.0;
const COMMITMENT_BONUS: f64 = 5.0;

/// Result of feeding one user turn through the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtteranceOutcome {
    pub analysis: UtteranceAnalysis,
    pub difficulty: DifficultyState,
}

impl UtteranceOutcome {
    /// Directives for the reply generator joined the way they are injected into its prompt.
    pub fn cue_summary(&self) -> Option<String> {
        if self.analysis.cues.is_empty() {
            return None;
        }
        let directives: Vec<&str> = self
            .analysis
            .cues
            .iter()
            .copied()
            .map(PressureCue::directive)
            .collect();
        Some(directives.join(" | "))
    }
}

/// Running statistics exposed while a rehearsal is in progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub session_id: SessionId,
    pub difficulty_level: u8,
    pub vague_response_count: u32,
    pub deflection_count: u32,
    pub commitments_made: u32,
    pub commitments: Vec<Commitment>,
    pub total_exchanges: u32,
    /// Current difficulty minus scenario difficulty, both normalized.
    pub difficulty_delta: f64,
    pub conversation_quality_score: f64,
    pub started_at: DateTime<Utc>,
}

/// One rehearsal: owns the difficulty dial, counters, commitments, and transcript.
#[derive(Debug, Clone)]
pub struct ConversationSession {
    id: SessionId,
    scenario: Option<Scenario>,
    controller: DifficultyController,
    metrics: SessionMetrics,
    commitments: Vec<Commitment>,
    transcript: Vec<TranscriptEntry>,
    started_at: DateTime<Utc>,
}

impl ConversationSession {
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            scenario: None,
            controller: DifficultyController::new(),
            metrics: SessionMetrics::default(),
            commitments: Vec::new(),
            transcript: Vec::new(),
            started_at: Utc::now(),
        }
    }

    /// Starts the dial at the level nearest the scenario's difficulty.
    pub fn with_scenario(id: SessionId, scenario: Scenario) -> Self {
        let level = level_from_normalized(scenario.difficulty);
        Self {
            controller: DifficultyController::starting_at(level),
            metrics: SessionMetrics::new(scenario.difficulty),
            scenario: Some(scenario),
            ..Self::new(id)
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn scenario(&self) -> Option<&Scenario> {
        self.scenario.as_ref()
    }

    pub fn commitments(&self) -> &[Commitment] {
        &self.commitments
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    pub fn difficulty(&self) -> DifficultyState {
        self.controller.state()
    }

    /// Classifies the turn, records commitments, then moves the dial.
    pub fn process_utterance(&mut self, text: &str) -> UtteranceOutcome {
        let analysis = analyze(text);
        self.commitments.extend(analysis.commitments.iter().cloned());
        self.metrics.record_exchange(analysis.commitments.len());
        let previous_level = self.controller.level();
        self.controller
            .update(&analysis.classification, self.commitments.len());
        self.push_entry(Speaker::User, text);

        let difficulty = self.controller.state();
        tracing::debug!(
            session_id = %self.id,
            vague = analysis.classification.is_vague,
            deflecting = analysis.classification.is_deflecting,
            concrete = analysis.classification.is_concrete,
            commitments = analysis.commitments.len(),
            level = difficulty.level,
            "utterance processed"
        );
        if difficulty.level > previous_level {
            tracing::info!(
                session_id = %self.id,
                from = previous_level,
                to = difficulty.level,
                "difficulty escalated"
            );
        }

        UtteranceOutcome {
            analysis,
            difficulty,
        }
    }

    /// Records the counterpart's reply; it never affects scoring.
    pub fn record_adversary_turn(&mut self, text: &str) {
        self.push_entry(Speaker::Adversary, text);
    }

    pub fn metrics(&self) -> SessionMetricsRecord {
        self.metrics.snapshot(&self.controller.state())
    }

    pub fn stats(&self) -> SessionStats {
        let difficulty = self.controller.state();
        let scenario_difficulty = self
            .scenario
            .as_ref()
            .map(|scenario| scenario.difficulty)
            .unwrap_or(NormalizedDifficulty::EASIEST);

        SessionStats {
            session_id: self.id.clone(),
            difficulty_level: difficulty.level,
            vague_response_count: difficulty.vague_count,
            deflection_count: difficulty.deflection_count,
            commitments_made: self.metrics.commitments_made(),
            commitments: self.commitments.clone(),
            total_exchanges: self.metrics.total_exchanges(),
            difficulty_delta: difficulty.normalized().value() - scenario_difficulty.value(),
            conversation_quality_score: quality_score(
                difficulty.vague_count,
                difficulty.deflection_count,
                self.commitments.len(),
            ),
            started_at: self.started_at,
        }
    }

    /// Clears counters, commitments, and transcript; keeps the id and scenario.
    pub fn reset(&mut self) {
        self.controller.reset();
        self.metrics.reset();
        self.commitments.clear();
        self.transcript.clear();
        tracing::debug!(session_id = %self.id, "session reset");
    }

    fn push_entry(&mut self, speaker: Speaker, text: &str) {
        self.transcript.push(TranscriptEntry {
            speaker,
            content: text.to_string(),
            recorded_at: Utc::now(),
        });
    }
}

/// `100 - 10 * vague - 15 * deflections + 5 * commitments`, clamped to 0..=100.
pub fn quality_score(vague: u32, deflections: u32, commitments: usize) -> f64 {
    let score = QUALITY_MAX - f64::from(vague) * VAGUE_PENALTY
        - f64::from(deflections) * DEFLECTION_PENALTY
        + commitments as f64 * COMMITMENT_BONUS;
    score.clamp(0.0, QUALITY_MAX)
}
