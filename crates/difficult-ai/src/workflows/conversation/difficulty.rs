use super::domain::ClassificationResult;
use crate::workflows::scenario::NormalizedDifficulty;
use serde::{Deserialize, Serialize};

pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 5;

/// Commitments required before concrete answers start to ease the pressure.
const EASE_OFF_COMMITMENTS: usize = 2;
/// Repeats of the same weakness before the dial turns up.
const ESCALATION_THRESHOLD: u32 = 2;

/// Snapshot of the dial and the counters that drive it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyState {
    pub level: u8,
    pub vague_count: u32,
    pub deflection_count: u32,
}

impl DifficultyState {
    /// Level expressed on the normalized scenario scale: `(level - 1) / 4`.
    pub fn normalized(&self) -> NormalizedDifficulty {
        level_to_normalized(self.level)
    }
}

pub fn level_to_normalized(level: u8) -> NormalizedDifficulty {
    let level = clamp_level(level);
    NormalizedDifficulty::new(f64::from(level - MIN_LEVEL) / f64::from(MAX_LEVEL - MIN_LEVEL))
}

/// Nearest dial level for a normalized difficulty: `1 + round(d * 4)`.
pub fn level_from_normalized(difficulty: NormalizedDifficulty) -> u8 {
    let steps = (difficulty.value() * f64::from(MAX_LEVEL - MIN_LEVEL)).round() as u8;
    clamp_level(MIN_LEVEL + steps)
}

fn clamp_level(level: u8) -> u8 {
    level.clamp(MIN_LEVEL, MAX_LEVEL)
}

/// Adaptive difficulty dial owned by a single session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DifficultyController {
    state: DifficultyState,
    starting_level: u8,
}

impl Default for DifficultyController {
    fn default() -> Self {
        Self::new()
    }
}

impl DifficultyController {
    pub fn new() -> Self {
        Self::starting_at(MIN_LEVEL)
    }

    pub fn starting_at(level: u8) -> Self {
        let level = clamp_level(level);
        Self {
            state: DifficultyState {
                level,
                vague_count: 0,
                deflection_count: 0,
            },
            starting_level: level,
        }
    }

    pub fn level(&self) -> u8 {
        self.state.level
    }

    pub fn state(&self) -> DifficultyState {
        self.state
    }

    /// Applies one classified utterance. `commitments_made` is the session total including
    /// anything extracted from this utterance.
    ///
    /// Vague and deflecting checks are independent, so a single turn can raise the level
    /// by two.
    pub fn update(&mut self, classification: &ClassificationResult, commitments_made: usize) {
        if classification.is_vague {
            self.state.vague_count += 1;
            if self.state.vague_count >= ESCALATION_THRESHOLD && self.state.level < MAX_LEVEL {
                self.state.level += 1;
            }
        }
        self.clamp();

        if classification.is_deflecting {
            self.state.deflection_count += 1;
            if self.state.deflection_count >= ESCALATION_THRESHOLD && self.state.level < MAX_LEVEL
            {
                self.state.level += 1;
            }
        }
        self.clamp();

        if classification.is_concrete
            && !classification.is_vague
            && self.state.level > MIN_LEVEL
            && commitments_made >= EASE_OFF_COMMITMENTS
        {
            self.state.level = self.state.level.saturating_sub(1).max(MIN_LEVEL);
        }
        self.clamp();
    }

    /// Returns to the starting level with zeroed counters.
    pub fn reset(&mut self) {
        *self = Self::starting_at(self.starting_level);
    }

    fn clamp(&mut self) {
        self.state.level = clamp_level(self.state.level);
    }
}
