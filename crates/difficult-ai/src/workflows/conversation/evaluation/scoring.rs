use super::super::metrics::SessionMetricsRecord;
use serde::{Deserialize, Serialize};

pub const RAW_MIN: f64 = 0.0;
pub const RAW_MAX: f64 = 100.0;
pub const TEN_POINT_MIN: f64 = 1.0;
pub const TEN_POINT_MAX: f64 = 10.0;

/// One commitment every three exchanges earns a full commitment score.
const COMMITMENT_TARGET_RATIO: f64 = 1.0 / 3.0;
/// Points lost per unit the difficulty climbed above the scenario's.
const ADAPTABILITY_PENALTY: f64 = 20.0;
/// Composure counts vague and deflecting turns at half weight.
const COMPOSURE_PENALTY: f64 = 50.0;

/// Dimension scores on the internal 0-100 scale before any schema is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RawScores {
    pub clarity: f64,
    pub confidence: f64,
    pub commitment: f64,
    pub adaptability: f64,
    pub composure: f64,
}

impl RawScores {
    pub fn from_metrics(metrics: &SessionMetricsRecord) -> Self {
        Self {
            clarity: clarity(metrics),
            confidence: confidence(metrics),
            commitment: commitment(metrics),
            adaptability: adaptability(metrics),
            composure: composure(metrics),
        }
    }

    pub fn effectiveness(&self) -> f64 {
        bounded(
            self.clarity * 0.25
                + self.confidence * 0.20
                + self.commitment * 0.25
                + self.adaptability * 0.15
                + self.composure * 0.15,
            RAW_MIN,
            RAW_MAX,
        )
    }

    pub fn overall(&self) -> f64 {
        bounded(
            self.clarity * 0.30
                + self.confidence * 0.20
                + self.commitment * 0.30
                + self.adaptability * 0.20,
            RAW_MIN,
            RAW_MAX,
        )
    }
}

/// Four-dimension 0-100 scores with a weighted overall.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegacyScores {
    pub clarity: f64,
    pub confidence: f64,
    pub commitment: f64,
    pub adaptability: f64,
    pub overall: f64,
}

impl LegacyScores {
    pub fn from_metrics(metrics: &SessionMetricsRecord) -> Self {
        let raw = RawScores::from_metrics(metrics);
        Self {
            clarity: raw.clarity,
            confidence: raw.confidence,
            commitment: raw.commitment,
            adaptability: raw.adaptability,
            overall: raw.overall(),
        }
    }

    pub fn values(&self) -> [f64; 5] {
        [
            self.clarity,
            self.confidence,
            self.commitment,
            self.adaptability,
            self.overall,
        ]
    }
}

/// Six-dimension scores rescaled to 1-10.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceScores {
    pub clarity: f64,
    pub confidence: f64,
    pub commitment: f64,
    pub adaptability: f64,
    pub composure: f64,
    pub effectiveness: f64,
}

impl PerformanceScores {
    pub fn from_metrics(metrics: &SessionMetricsRecord) -> Self {
        let raw = RawScores::from_metrics(metrics);
        Self {
            clarity: to_ten_point(raw.clarity),
            confidence: to_ten_point(raw.confidence),
            commitment: to_ten_point(raw.commitment),
            adaptability: to_ten_point(raw.adaptability),
            composure: to_ten_point(raw.composure),
            effectiveness: to_ten_point(raw.effectiveness()),
        }
    }

    pub fn values(&self) -> [f64; 6] {
        [
            self.clarity,
            self.confidence,
            self.commitment,
            self.adaptability,
            self.composure,
            self.effectiveness,
        ]
    }
}

/// Maps a 0-100 score onto 1-10: `1 + (score / 100) * 9`, clamped.
pub fn to_ten_point(score: f64) -> f64 {
    bounded(
        TEN_POINT_MIN + (score / RAW_MAX) * 9.0,
        TEN_POINT_MIN,
        TEN_POINT_MAX,
    )
}

/// Clamp that sends NaN to the lower bound instead of propagating it.
pub(crate) fn bounded(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        min
    } else {
        value.clamp(min, max)
    }
}

fn ratio(count: u32, total_exchanges: u32) -> f64 {
    f64::from(count) / f64::from(total_exchanges)
}

fn clarity(metrics: &SessionMetricsRecord) -> f64 {
    if metrics.total_exchanges == 0 {
        return RAW_MAX;
    }
    let vague = ratio(metrics.vague_response_count, metrics.total_exchanges);
    bounded(RAW_MAX - vague * 100.0, RAW_MIN, RAW_MAX)
}

fn confidence(metrics: &SessionMetricsRecord) -> f64 {
    if metrics.total_exchanges == 0 {
        return RAW_MAX;
    }
    let deflections = ratio(metrics.deflection_count, metrics.total_exchanges);
    bounded(RAW_MAX - deflections * 100.0, RAW_MIN, RAW_MAX)
}

fn commitment(metrics: &SessionMetricsRecord) -> f64 {
    if metrics.total_exchanges == 0 {
        return RAW_MIN;
    }
    let actual = ratio(metrics.commitments_made, metrics.total_exchanges);
    bounded((actual / COMMITMENT_TARGET_RATIO) * 100.0, RAW_MIN, RAW_MAX)
}

fn adaptability(metrics: &SessionMetricsRecord) -> f64 {
    let delta = metrics.current_difficulty - metrics.scenario_difficulty;
    if delta.is_nan() {
        return RAW_MIN;
    }
    if delta <= 0.0 {
        return RAW_MAX;
    }
    bounded(RAW_MAX - delta * ADAPTABILITY_PENALTY, RAW_MIN, RAW_MAX)
}

fn composure(metrics: &SessionMetricsRecord) -> f64 {
    if metrics.total_exchanges == 0 {
        return RAW_MAX;
    }
    let stress = f64::from(metrics.vague_response_count) + f64::from(metrics.deflection_count);
    let stress_ratio = stress / f64::from(metrics.total_exchanges);
    bounded(RAW_MAX - stress_ratio * COMPOSURE_PENALTY, RAW_MIN, RAW_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_point_scale_anchors() {
        assert_eq!(to_ten_point(0.0), 1.0);
        assert_eq!(to_ten_point(50.0), 5.5);
        assert_eq!(to_ten_point(100.0), 10.0);
        assert_eq!(to_ten_point(-40.0), 1.0);
        assert_eq!(to_ten_point(f64::NAN), 1.0);
    }

    #[test]
    fn bounded_sends_nan_to_floor() {
        assert_eq!(bounded(f64::NAN, 0.0, 100.0), 0.0);
        assert_eq!(bounded(140.0, 0.0, 100.0), 100.0);
    }
}
