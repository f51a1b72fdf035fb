use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::workflows::conversation::evaluation::{
    coaching_feedback, evaluate, key_moments, legacy_feedback, FeedbackBundle, LegacyScores,
    PerformanceScores, ScoreSchema, FILLER_POINT, TRANSCRIPT_FALLBACK,
};

use super::common::metrics;

fn performance(
    clarity: f64,
    confidence: f64,
    commitment: f64,
    adaptability: f64,
    composure: f64,
    effectiveness: f64,
) -> PerformanceScores {
    PerformanceScores {
        clarity,
        confidence,
        commitment,
        adaptability,
        composure,
        effectiveness,
    }
}

#[test]
fn weaknesses_surface_before_strengths_lowest_first() {
    let scores = performance(9.0, 4.0, 2.0, 6.0, 6.0, 6.0);
    let feedback = coaching_feedback(&metrics(0, 0, 0, 1, 0.0, 0.0), &scores);

    assert_eq!(
        feedback.coaching_points,
        [
            "Make concrete commitments: Include specific timelines and measurable deliverables"
                .to_string(),
            "Address questions directly: Avoid deflecting or changing topics when challenged"
                .to_string(),
            "Excellent clarity - maintain this level of specificity in future conversations"
                .to_string(),
        ]
    );
}

#[test]
fn many_weaknesses_are_capped_at_three() {
    let scores = performance(3.0, 1.0, 4.5, 2.0, 1.5, 2.5);
    let feedback = coaching_feedback(&metrics(0, 0, 0, 1, 0.0, 0.0), &scores);

    assert_eq!(
        feedback.coaching_points,
        [
            "Address questions directly: Avoid deflecting or changing topics when challenged"
                .to_string(),
            "Stay calm and collected: Take a breath before responding when feeling pressured"
                .to_string(),
            "Improve under pressure: Practice maintaining performance when difficulty increases"
                .to_string(),
        ]
    );
}

#[test]
fn middling_scores_pad_with_filler() {
    let scores = performance(6.0, 6.0, 6.0, 6.0, 6.0, 6.0);
    let feedback = coaching_feedback(&metrics(0, 0, 0, 1, 0.0, 0.0), &scores);

    assert!(feedback
        .coaching_points
        .iter()
        .all(|point| point == FILLER_POINT));
}

#[test]
fn one_rule_firing_pads_the_remaining_slots() {
    let scores = performance(6.0, 6.0, 8.0, 6.0, 6.0, 6.0);
    let feedback = coaching_feedback(&metrics(0, 0, 0, 1, 0.0, 0.0), &scores);

    assert_eq!(
        feedback.coaching_points[0],
        "Great commitment quality - continue providing specific, actionable promises"
    );
    assert_eq!(feedback.coaching_points[1], FILLER_POINT);
    assert_eq!(feedback.coaching_points[2], FILLER_POINT);
}

#[test]
fn random_metrics_always_yield_three_coaching_points() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..500 {
        let record = metrics(
            rng.gen_range(0..20),
            rng.gen_range(0..20),
            rng.gen_range(0..20),
            rng.gen_range(0..20),
            rng.gen_range(0.0..1.0),
            rng.gen_range(0.0..1.0),
        );
        let evaluation = evaluate(ScoreSchema::V2, record, None);
        match evaluation.feedback {
            FeedbackBundle::V2(feedback) => {
                assert_eq!(feedback.coaching_points.len(), 3);
                assert!(feedback.coaching_points.iter().all(|point| !point.is_empty()));
                assert!(!feedback.key_moments.is_empty());
            }
            other => panic!("expected coaching feedback, got {other:?}"),
        }
    }
}

#[test]
fn key_moments_follow_counter_order() {
    assert_eq!(
        key_moments(&metrics(2, 1, 4, 6, 0.0, 0.0)),
        vec![
            "Review 2 instances of vague language".to_string(),
            "Examine 1 deflection patterns".to_string(),
            "Note 4 successful commitments made".to_string(),
        ]
    );
    assert_eq!(
        key_moments(&metrics(0, 3, 0, 6, 0.0, 0.0)),
        vec!["Examine 3 deflection patterns".to_string()]
    );
}

#[test]
fn key_moments_fall_back_to_transcript_review() {
    assert_eq!(
        key_moments(&metrics(0, 0, 0, 4, 0.0, 0.0)),
        vec![TRANSCRIPT_FALLBACK.to_string()]
    );
}

#[test]
fn legacy_feedback_uses_per_dimension_thresholds() {
    let scores = LegacyScores {
        clarity: 85.0,
        confidence: 45.0,
        commitment: 72.0,
        adaptability: 60.0,
        overall: 66.0,
    };
    let feedback = legacy_feedback(&metrics(1, 3, 2, 6, 0.0, 0.0), &scores);

    assert_eq!(feedback.strengths.len(), 2);
    assert_eq!(feedback.weaknesses.len(), 1);
    assert_eq!(feedback.recommendations.len(), 1);
    assert_eq!(feedback.key_moments.len(), 3);
}

#[test]
fn legacy_commitment_threshold_is_lower() {
    let scores = LegacyScores {
        clarity: 60.0,
        confidence: 60.0,
        commitment: 45.0,
        adaptability: 60.0,
        overall: 60.0,
    };
    let feedback = legacy_feedback(&metrics(0, 0, 0, 1, 0.0, 0.0), &scores);

    assert!(feedback.strengths.is_empty());
    assert!(feedback.weaknesses.is_empty());

    let weaker = LegacyScores {
        commitment: 39.0,
        ..scores
    };
    let feedback = legacy_feedback(&metrics(0, 0, 0, 1, 0.0, 0.0), &weaker);
    assert_eq!(
        feedback.weaknesses,
        vec!["Few concrete commitments or deliverables".to_string()]
    );
}
