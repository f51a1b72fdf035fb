//! Turns a session metrics record into a bounded scorecard with coaching feedback.
//!
//! Two scorecard shapes are supported side by side and never mixed: `v1` reports four
//! dimensions on 0-100 with a weighted `overall`, `v2` reports six dimensions on 1-10 with
//! `composure`, `effectiveness`, and exactly three coaching points.

mod feedback;
mod scoring;

pub use feedback::{
    coaching_feedback, key_moments, legacy_feedback, CoachingFeedback, LegacyFeedback,
    COACHING_POINT_COUNT, FILLER_POINT, TRANSCRIPT_FALLBACK,
};
pub use scoring::{
    to_ten_point, LegacyScores, PerformanceScores, RAW_MAX, RAW_MIN, TEN_POINT_MAX,
    TEN_POINT_MIN,
};

use super::metrics::SessionMetricsRecord;
use crate::workflows::scenario::Scenario;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreSchema {
    V1,
    #[default]
    V2,
}

impl ScoreSchema {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "v1" | "1" | "legacy" => Some(Self::V1),
            "v2" | "2" | "performance" => Some(Self::V2),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ScoreSchema::V1 => "v1",
            ScoreSchema::V2 => "v2",
        }
    }

    /// Inclusive bounds every dimension score respects under this schema.
    pub const fn bounds(self) -> (f64, f64) {
        match self {
            ScoreSchema::V1 => (RAW_MIN, RAW_MAX),
            ScoreSchema::V2 => (TEN_POINT_MIN, TEN_POINT_MAX),
        }
    }
}

impl fmt::Display for ScoreSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "schema", rename_all = "lowercase")]
pub enum ScoreSet {
    V1(LegacyScores),
    V2(PerformanceScores),
}

impl ScoreSet {
    pub fn compute(schema: ScoreSchema, metrics: &SessionMetricsRecord) -> Self {
        match schema {
            ScoreSchema::V1 => ScoreSet::V1(LegacyScores::from_metrics(metrics)),
            ScoreSchema::V2 => ScoreSet::V2(PerformanceScores::from_metrics(metrics)),
        }
    }

    pub fn schema(&self) -> ScoreSchema {
        match self {
            ScoreSet::V1(_) => ScoreSchema::V1,
            ScoreSet::V2(_) => ScoreSchema::V2,
        }
    }

    /// Dimension name and value pairs in report order.
    pub fn dimensions(&self) -> Vec<(&'static str, f64)> {
        match self {
            ScoreSet::V1(scores) => ["clarity", "confidence", "commitment", "adaptability", "overall"]
                .into_iter()
                .zip(scores.values())
                .collect(),
            ScoreSet::V2(scores) => [
                "clarity",
                "confidence",
                "commitment",
                "adaptability",
                "composure",
                "effectiveness",
            ]
            .into_iter()
            .zip(scores.values())
            .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeedbackBundle {
    V2(CoachingFeedback),
    V1(LegacyFeedback),
}

impl FeedbackBundle {
    pub fn select(metrics: &SessionMetricsRecord, scores: &ScoreSet) -> Self {
        match scores {
            ScoreSet::V1(scores) => FeedbackBundle::V1(legacy_feedback(metrics, scores)),
            ScoreSet::V2(scores) => FeedbackBundle::V2(coaching_feedback(metrics, scores)),
        }
    }

    pub fn key_moments(&self) -> &[String] {
        match self {
            FeedbackBundle::V1(feedback) => &feedback.key_moments,
            FeedbackBundle::V2(feedback) => &feedback.key_moments,
        }
    }
}

/// Completed scorecard for one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub scores: ScoreSet,
    pub feedback: FeedbackBundle,
    pub metrics: SessionMetricsRecord,
    pub scenario: Option<Scenario>,
}

/// Pure scorecard computation; identical inputs always produce identical output.
pub fn evaluate(
    schema: ScoreSchema,
    metrics: SessionMetricsRecord,
    scenario: Option<Scenario>,
) -> Evaluation {
    let scores = ScoreSet::compute(schema, &metrics);
    let feedback = FeedbackBundle::select(&metrics, &scores);
    Evaluation {
        scores,
        feedback,
        metrics,
        scenario,
    }
}

/// Evaluator that keeps every scorecard it produces for the life of the process.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    schema: ScoreSchema,
    history: Vec<Evaluation>,
}

impl Evaluator {
    pub fn new(schema: ScoreSchema) -> Self {
        Self {
            schema,
            history: Vec::new(),
        }
    }

    pub fn schema(&self) -> ScoreSchema {
        self.schema
    }

    pub fn evaluate(
        &mut self,
        metrics: SessionMetricsRecord,
        scenario: Option<Scenario>,
    ) -> Evaluation {
        self.evaluate_with(self.schema, metrics, scenario)
    }

    /// Evaluates under an explicit schema, still recording the result.
    pub fn evaluate_with(
        &mut self,
        schema: ScoreSchema,
        metrics: SessionMetricsRecord,
        scenario: Option<Scenario>,
    ) -> Evaluation {
        let evaluation = evaluate(schema, metrics, scenario);
        tracing::debug!(
            schema = %schema,
            total_exchanges = metrics.total_exchanges,
            history = self.history.len() + 1,
            "scorecard computed"
        );
        self.history.push(evaluation.clone());
        evaluation
    }

    pub fn history(&self) -> &[Evaluation] {
        &self.history
    }
}
