use std::sync::Arc;

use serde_json::json;

use crate::workflows::conversation::domain::{SessionId, Speaker};
use crate::workflows::conversation::evaluation::{FeedbackBundle, ScoreSchema, ScoreSet};
use crate::workflows::conversation::repository::RepositoryError;
use crate::workflows::conversation::{ConversationService, ConversationServiceError};
use crate::workflows::scenario::{DifficultyScale, PersonaType, ScenarioError};

use super::common::*;

#[test]
fn start_session_seeds_level_from_scenario() {
    let (service, repository) = build_service(ScoreSchema::V2);

    let stats = service
        .start_session(Some(&scenario_json()), None)
        .expect("session starts");

    assert!(stats.session_id.0.starts_with("session-"));
    assert_eq!(stats.difficulty_level, 3);
    assert_eq!(stats.total_exchanges, 0);
    assert_eq!(stats.conversation_quality_score, 100.0);

    let stored = repository
        .sessions
        .lock()
        .expect("lock")
        .get(&stats.session_id)
        .cloned()
        .expect("session stored");
    assert_eq!(
        stored.scenario().map(|scenario| scenario.persona_type),
        Some(PersonaType::EliteInterviewer)
    );
}

#[test]
fn legacy_scale_scenarios_are_converted_once() {
    let (service, _) = build_service(ScoreSchema::V2);
    let mut raw = scenario_json();
    raw["difficulty"] = json!(5);

    let stats = service
        .start_session(Some(&raw), Some(DifficultyScale::Legacy))
        .expect("legacy scenario accepted");
    assert_eq!(stats.difficulty_level, 5);

    let rejected = service.start_session(Some(&raw), None);
    match rejected {
        Err(ConversationServiceError::Scenario(ScenarioError::Invalid(errors))) => {
            assert!(errors[0].contains("between 0 and 1"));
        }
        other => panic!("expected range error, got {other:?}"),
    }
}

#[test]
fn sessions_without_scenario_start_at_level_one() {
    let (service, _) = build_service(ScoreSchema::V2);
    let stats = service.start_session(None, None).expect("session starts");
    assert_eq!(stats.difficulty_level, 1);
}

#[test]
fn utterances_accumulate_into_session_evaluation() {
    let (service, _) = build_service(ScoreSchema::V2);
    let id = service
        .start_session(None, None)
        .expect("session starts")
        .session_id;

    service
        .submit_utterance(&id, "I'm not sure, possibly next quarter")
        .expect("utterance accepted");
    service
        .record_reply(&id, "Next quarter is not an answer.")
        .expect("reply recorded");
    service
        .submit_utterance(&id, "I will deliver the plan on Tuesday.")
        .expect("utterance accepted");

    let stats = service.stats(&id).expect("stats available");
    assert_eq!(stats.total_exchanges, 2);
    assert_eq!(stats.vague_response_count, 1);
    assert_eq!(stats.commitments_made, 1);

    let document = service
        .scorecard(&id, None)
        .expect("scorecard generated");
    assert_eq!(document.transcript.len(), 3);
    assert_eq!(document.transcript[1].speaker, Speaker::Adversary);
    assert_eq!(document.evaluation.metrics.total_exchanges, 2);
    assert!(matches!(document.evaluation.scores, ScoreSet::V2(_)));
    assert!(matches!(document.evaluation.feedback, FeedbackBundle::V2(_)));
    assert_eq!(service.evaluations().len(), 1);
}

#[test]
fn schema_override_applies_per_evaluation() {
    let (service, _) = build_service(ScoreSchema::V2);

    let evaluation = service
        .evaluate_metrics(metrics(0, 0, 3, 5, 2.0, 2.0), None, None, Some(ScoreSchema::V1))
        .expect("metrics evaluated");

    match evaluation.scores {
        ScoreSet::V1(scores) => assert_eq!(scores.overall, 100.0),
        other => panic!("expected legacy scores, got {other:?}"),
    }
    assert!(matches!(evaluation.feedback, FeedbackBundle::V1(_)));
    assert_eq!(service.schema(), ScoreSchema::V2);
}

#[test]
fn legacy_scale_applies_to_metrics_and_scenario_alike() {
    let (service, _) = build_service(ScoreSchema::V2);
    let mut scenario = scenario_json();
    scenario["difficulty"] = json!(2);

    let evaluation = service
        .evaluate_metrics(
            metrics(0, 0, 2, 6, 3.0, 2.0),
            Some(&scenario),
            Some(DifficultyScale::Legacy),
            Some(ScoreSchema::V1),
        )
        .expect("metrics evaluated");

    let difficulty = evaluation.scenario.as_ref().map(|s| s.difficulty.value());
    assert_eq!(difficulty, Some(0.25));
    assert_eq!(evaluation.metrics.scenario_difficulty, 0.25);
    assert_eq!(evaluation.metrics.current_difficulty, 0.5);
    match evaluation.scores {
        ScoreSet::V1(scores) => assert_eq!(scores.adaptability, 95.0),
        other => panic!("expected legacy scores, got {other:?}"),
    }
}

#[test]
fn evaluator_history_keeps_every_result() {
    let (service, _) = build_service(ScoreSchema::V2);
    for exchanges in 1..=3 {
        service
            .evaluate_metrics(metrics(0, 0, 0, exchanges, 0.0, 0.0), None, None, None)
            .expect("metrics evaluated");
    }

    let history = service.evaluations();
    assert_eq!(history.len(), 3);
    assert_eq!(history[2].metrics.total_exchanges, 3);
}

#[test]
fn reset_session_clears_counters() {
    let (service, _) = build_service(ScoreSchema::V2);
    let id = service
        .start_session(Some(&scenario_json()), None)
        .expect("session starts")
        .session_id;
    service
        .submit_utterance(&id, "Maybe")
        .expect("utterance accepted");

    let stats = service.reset_session(&id).expect("reset succeeds");
    assert_eq!(stats.total_exchanges, 0);
    assert_eq!(stats.difficulty_level, 3);
}

#[test]
fn unknown_sessions_surface_not_found() {
    let (service, _) = build_service(ScoreSchema::V2);
    match service.stats(&SessionId("session-missing".to_string())) {
        Err(ConversationServiceError::Repository(RepositoryError::NotFound)) => {}
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn repository_failures_propagate() {
    let service = ConversationService::new(
        Arc::new(UnavailableRepository),
        ScoreSchema::V2,
        DifficultyScale::Normalized,
    );

    match service.start_session(None, None) {
        Err(ConversationServiceError::Repository(RepositoryError::Unavailable(reason))) => {
            assert_eq!(reason, "database offline");
        }
        other => panic!("expected unavailable, got {other:?}"),
    }
}
