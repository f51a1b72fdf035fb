use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier wrapper for rehearsal sessions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Heuristic judgement of a single user utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub is_vague: bool,
    pub is_deflecting: bool,
    pub is_concrete: bool,
}

/// A promised action lifted out of an utterance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Commitment(pub String);

impl Commitment {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Instruction handed to the reply generator so the adversary reacts to the last turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PressureCue {
    YieldToInterruption,
    ChallengeVagueness,
    ForceBackOnTopic,
    DemandSpecifics,
}

impl PressureCue {
    pub const fn directive(self) -> &'static str {
        match self {
            PressureCue::YieldToInterruption => {
                "User is interrupting - stop and respond to what they just said"
            }
            PressureCue::ChallengeVagueness => "User gave a vague response - challenge it directly",
            PressureCue::ForceBackOnTopic => {
                "User is deflecting - escalate and force them back on topic"
            }
            PressureCue::DemandSpecifics => "User provided no concrete details - demand specifics",
        }
    }
}

/// Everything learned from one user turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtteranceAnalysis {
    pub classification: ClassificationResult,
    pub word_count: usize,
    pub interruption: bool,
    pub commitments: Vec<Commitment>,
    pub cues: Vec<PressureCue>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    User,
    #[serde(rename = "assistant", alias = "adversary", alias = "agent")]
    Adversary,
}

impl Speaker {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "user" | "candidate" | "human" => Some(Self::User),
            "assistant" | "adversary" | "agent" => Some(Self::Adversary),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Speaker::User => "user",
            Speaker::Adversary => "assistant",
        }
    }
}

/// Transcript line retained for the scorecard document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub speaker: Speaker,
    pub content: String,
    pub recorded_at: DateTime<Utc>,
}
