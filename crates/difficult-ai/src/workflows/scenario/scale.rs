use serde::{Deserialize, Serialize};
use std::fmt;

/// Declares how a caller encodes raw scenario difficulty values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyScale {
    /// Integer dial from 1 (mild) to 5 (maximum pressure).
    Legacy,
    /// Float from 0.0 (easy) to 1.0 (maximum pressure).
    #[default]
    Normalized,
}

impl DifficultyScale {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "legacy" | "1-5" | "integer" => Some(Self::Legacy),
            "normalized" | "0-1" | "float" => Some(Self::Normalized),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            DifficultyScale::Legacy => "legacy",
            DifficultyScale::Normalized => "normalized",
        }
    }

    /// Inclusive range accepted for raw values on this scale.
    pub const fn bounds(self) -> (f64, f64) {
        match self {
            DifficultyScale::Legacy => (1.0, 5.0),
            DifficultyScale::Normalized => (0.0, 1.0),
        }
    }

    pub fn contains(self, raw: f64) -> bool {
        let (min, max) = self.bounds();
        raw >= min && raw <= max
    }

    /// Converts a raw value into the internal representation. Legacy values map via
    /// `(d - 1) / 4`; the result is clamped to `[0, 1]`.
    pub fn normalize(self, raw: f64) -> NormalizedDifficulty {
        match self {
            DifficultyScale::Legacy => NormalizedDifficulty::new((raw - 1.0) / 4.0),
            DifficultyScale::Normalized => NormalizedDifficulty::new(raw),
        }
    }
}

impl fmt::Display for DifficultyScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Scenario difficulty on the internal 0-1 scale. Only constructed through clamping, so
/// a value is never re-normalized once it exists.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct NormalizedDifficulty(f64);

impl NormalizedDifficulty {
    pub const EASIEST: Self = Self(0.0);
    pub const HARDEST: Self = Self(1.0);

    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::EASIEST;
        }
        Self(value.clamp(0.0, 1.0))
    }

    pub const fn value(self) -> f64 {
        self.0
    }
}

impl From<f64> for NormalizedDifficulty {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<NormalizedDifficulty> for f64 {
    fn from(value: NormalizedDifficulty) -> Self {
        value.0
    }
}
