use super::super::metrics::SessionMetricsRecord;
use super::scoring::{LegacyScores, PerformanceScores};
use serde::{Deserialize, Serialize};

pub const COACHING_POINT_COUNT: usize = 3;

const WEAKNESS_BELOW: f64 = 5.0;
const STRENGTH_FROM: f64 = 8.0;

pub const FILLER_POINT: &str = "Continue practicing high-pressure conversations to build resilience";
pub const TRANSCRIPT_FALLBACK: &str = "Review full transcript for improvement opportunities";

/// Coaching output for six-dimension scorecards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoachingFeedback {
    pub coaching_points: [String; COACHING_POINT_COUNT],
    pub key_moments: Vec<String>,
}

/// Feedback lists for four-dimension scorecards. Lists are not capped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyFeedback {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendations: Vec<String>,
    pub key_moments: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Tone {
    Weakness,
    Strength,
}

struct Candidate {
    tone: Tone,
    score: f64,
    text: &'static str,
}

struct Rule {
    weakness: &'static str,
    strength: Option<&'static str>,
}

const CLARITY: Rule = Rule {
    weakness: "Focus on specificity: Replace vague language with concrete numbers, dates, and commitments",
    strength: Some("Excellent clarity - maintain this level of specificity in future conversations"),
};
const CONFIDENCE: Rule = Rule {
    weakness: "Address questions directly: Avoid deflecting or changing topics when challenged",
    strength: Some("Strong confidence shown - keep facing difficult questions head-on"),
};
const COMMITMENT: Rule = Rule {
    weakness: "Make concrete commitments: Include specific timelines and measurable deliverables",
    strength: Some("Great commitment quality - continue providing specific, actionable promises"),
};
const ADAPTABILITY: Rule = Rule {
    weakness: "Improve under pressure: Practice maintaining performance when difficulty increases",
    strength: None,
};
const COMPOSURE: Rule = Rule {
    weakness: "Stay calm and collected: Take a breath before responding when feeling pressured",
    strength: None,
};
const EFFECTIVENESS: Rule = Rule {
    weakness: "Align responses with goals: Keep your objective in mind and steer toward it",
    strength: None,
};

impl Rule {
    fn candidate(&self, score: f64) -> Option<Candidate> {
        if score < WEAKNESS_BELOW {
            return Some(Candidate {
                tone: Tone::Weakness,
                score,
                text: self.weakness,
            });
        }
        match self.strength {
            Some(text) if score >= STRENGTH_FROM => Some(Candidate {
                tone: Tone::Strength,
                score,
                text,
            }),
            _ => None,
        }
    }
}

/// Picks exactly three coaching points: weaknesses first, lowest score first within each
/// group, padded with a generic filler when fewer rules fire.
pub fn coaching_feedback(
    metrics: &SessionMetricsRecord,
    scores: &PerformanceScores,
) -> CoachingFeedback {
    let rules = [
        (&CLARITY, scores.clarity),
        (&CONFIDENCE, scores.confidence),
        (&COMMITMENT, scores.commitment),
        (&ADAPTABILITY, scores.adaptability),
        (&COMPOSURE, scores.composure),
        (&EFFECTIVENESS, scores.effectiveness),
    ];

    let mut candidates: Vec<Candidate> = rules
        .iter()
        .filter_map(|(rule, score)| rule.candidate(*score))
        .collect();
    candidates.sort_by(|a, b| a.tone.cmp(&b.tone).then(a.score.total_cmp(&b.score)));

    let mut selected = candidates
        .into_iter()
        .map(|candidate| candidate.text.to_string())
        .chain(std::iter::repeat_with(|| FILLER_POINT.to_string()));
    let coaching_points = std::array::from_fn(|_| selected.next().unwrap_or_default());

    CoachingFeedback {
        coaching_points,
        key_moments: key_moments(metrics),
    }
}

/// Strength, weakness, and recommendation lists on the 0-100 scale.
pub fn legacy_feedback(metrics: &SessionMetricsRecord, scores: &LegacyScores) -> LegacyFeedback {
    let mut feedback = LegacyFeedback {
        strengths: Vec::new(),
        weaknesses: Vec::new(),
        recommendations: Vec::new(),
        key_moments: key_moments(metrics),
    };

    if scores.clarity >= 80.0 {
        feedback
            .strengths
            .push("Clear and specific responses with concrete details".to_string());
    } else if scores.clarity < 50.0 {
        feedback
            .weaknesses
            .push("Frequent vague or non-committal language".to_string());
        feedback
            .recommendations
            .push("Replace hedges like 'maybe' or 'probably' with specific numbers and dates".to_string());
    }

    if scores.confidence >= 80.0 {
        feedback
            .strengths
            .push("Answered difficult questions directly".to_string());
    } else if scores.confidence < 50.0 {
        feedback
            .weaknesses
            .push("Deflected or changed the subject under pressure".to_string());
        feedback
            .recommendations
            .push("Acknowledge the question and answer it before adding context".to_string());
    }

    if scores.commitment >= 70.0 {
        feedback
            .strengths
            .push("Made concrete, actionable commitments".to_string());
    } else if scores.commitment < 40.0 {
        feedback
            .weaknesses
            .push("Few concrete commitments or deliverables".to_string());
        feedback
            .recommendations
            .push("Close answers with a specific deliverable and a deadline".to_string());
    }

    if scores.adaptability >= 80.0 {
        feedback
            .strengths
            .push("Held steady as the pressure increased".to_string());
    } else if scores.adaptability < 50.0 {
        feedback
            .weaknesses
            .push("Performance slipped as the conversation escalated".to_string());
        feedback
            .recommendations
            .push("Rehearse at a higher difficulty to build tolerance for pushback".to_string());
    }

    feedback
}

/// One line per non-zero counter in fixed order, or a single fallback line.
pub fn key_moments(metrics: &SessionMetricsRecord) -> Vec<String> {
    let mut moments = Vec::new();
    if metrics.vague_response_count > 0 {
        moments.push(format!(
            "Review {} instances of vague language",
            metrics.vague_response_count
        ));
    }
    if metrics.deflection_count > 0 {
        moments.push(format!(
            "Examine {} deflection patterns",
            metrics.deflection_count
        ));
    }
    if metrics.commitments_made > 0 {
        moments.push(format!(
            "Note {} successful commitments made",
            metrics.commitments_made
        ));
    }
    if moments.is_empty() {
        moments.push(TRANSCRIPT_FALLBACK.to_string());
    }
    moments
}
