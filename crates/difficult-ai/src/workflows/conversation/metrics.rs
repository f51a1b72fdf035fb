use super::difficulty::DifficultyState;
use crate::workflows::scenario::{DifficultyScale, NormalizedDifficulty};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Flat metrics consumed by scoring.
///
/// Deserialization never fails on a field: missing, null, negative, or non-numeric values
/// become zero so a best-effort record always scores.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionMetricsRecord {
    #[serde(default, deserialize_with = "lenient_count")]
    pub vague_response_count: u32,
    #[serde(default, deserialize_with = "lenient_count")]
    pub deflection_count: u32,
    #[serde(default, deserialize_with = "lenient_count")]
    pub commitments_made: u32,
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_exchanges: u32,
    #[serde(default, deserialize_with = "lenient_difficulty")]
    pub current_difficulty: f64,
    #[serde(default, deserialize_with = "lenient_difficulty")]
    pub scenario_difficulty: f64,
}

impl SessionMetricsRecord {
    /// Reads both difficulties as values on `scale` and returns them on the normalized
    /// scale. Records built by a session are already normalized.
    pub fn normalized_from(self, scale: DifficultyScale) -> Self {
        Self {
            current_difficulty: scale.normalize(self.current_difficulty).value(),
            scenario_difficulty: scale.normalize(self.scenario_difficulty).value(),
            ..self
        }
    }
}

fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let count = match value {
        Value::Number(number) => number
            .as_u64()
            .map(|n| n.min(u64::from(u32::MAX)) as u32)
            .or_else(|| {
                number
                    .as_f64()
                    .filter(|n| n.is_finite() && *n > 0.0)
                    .map(|n| n.min(f64::from(u32::MAX)) as u32)
            })
            .unwrap_or(0),
        Value::String(text) => text.trim().parse::<u32>().unwrap_or(0),
        _ => 0,
    };
    Ok(count)
}

fn lenient_difficulty<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(parsed.filter(|n| n.is_finite()).unwrap_or(0.0))
}

/// Per-session accumulator for the values the difficulty controller does not own.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionMetrics {
    total_exchanges: u32,
    commitments_made: u32,
    scenario_difficulty: NormalizedDifficulty,
}

impl SessionMetrics {
    pub fn new(scenario_difficulty: NormalizedDifficulty) -> Self {
        Self {
            total_exchanges: 0,
            commitments_made: 0,
            scenario_difficulty,
        }
    }

    pub fn record_exchange(&mut self, new_commitments: usize) {
        self.total_exchanges = self.total_exchanges.saturating_add(1);
        let added = u32::try_from(new_commitments).unwrap_or(u32::MAX);
        self.commitments_made = self.commitments_made.saturating_add(added);
    }

    pub fn total_exchanges(&self) -> u32 {
        self.total_exchanges
    }

    pub fn commitments_made(&self) -> u32 {
        self.commitments_made
    }

    pub fn scenario_difficulty(&self) -> NormalizedDifficulty {
        self.scenario_difficulty
    }

    /// Builds the scoring record. Both difficulties are reported on the normalized scale.
    pub fn snapshot(&self, difficulty: &DifficultyState) -> SessionMetricsRecord {
        SessionMetricsRecord {
            vague_response_count: difficulty.vague_count,
            deflection_count: difficulty.deflection_count,
            commitments_made: self.commitments_made,
            total_exchanges: self.total_exchanges,
            current_difficulty: difficulty.normalized().value(),
            scenario_difficulty: self.scenario_difficulty.value(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.scenario_difficulty);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_malformed_fields_default_to_zero() {
        let record: SessionMetricsRecord = serde_json::from_str(
            r#"{"vague_response_count": -3, "deflection_count": "two", "total_exchanges": 4.0,
                "current_difficulty": null, "scenario_difficulty": "0.5"}"#,
        )
        .expect("lenient parse");

        assert_eq!(record.vague_response_count, 0);
        assert_eq!(record.deflection_count, 0);
        assert_eq!(record.commitments_made, 0);
        assert_eq!(record.total_exchanges, 4);
        assert_eq!(record.current_difficulty, 0.0);
        assert_eq!(record.scenario_difficulty, 0.5);
    }

    #[test]
    fn empty_object_is_all_zero() {
        let record: SessionMetricsRecord = serde_json::from_str("{}").expect("parses");
        assert_eq!(record, SessionMetricsRecord::default());
    }

    #[test]
    fn snapshot_reads_counters_from_difficulty_state() {
        let mut metrics = SessionMetrics::new(NormalizedDifficulty::new(0.25));
        metrics.record_exchange(0);
        metrics.record_exchange(2);

        let record = metrics.snapshot(&DifficultyState {
            level: 3,
            vague_count: 1,
            deflection_count: 2,
        });

        assert_eq!(record.total_exchanges, 2);
        assert_eq!(record.commitments_made, 2);
        assert_eq!(record.vague_response_count, 1);
        assert_eq!(record.deflection_count, 2);
        assert_eq!(record.current_difficulty, 0.5);
        assert_eq!(record.scenario_difficulty, 0.25);
    }

    #[test]
    fn legacy_difficulties_are_normalized_once() {
        let record = SessionMetricsRecord {
            total_exchanges: 6,
            current_difficulty: 3.0,
            scenario_difficulty: 2.0,
            ..SessionMetricsRecord::default()
        };

        let normalized = record.normalized_from(DifficultyScale::Legacy);
        assert_eq!(normalized.current_difficulty, 0.5);
        assert_eq!(normalized.scenario_difficulty, 0.25);
        assert_eq!(normalized.total_exchanges, 6);

        let unchanged = normalized.normalized_from(DifficultyScale::Normalized);
        assert_eq!(unchanged, normalized);
    }
}
