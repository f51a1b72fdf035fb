use super::super::domain::{ClassificationResult, PressureCue};
use super::markers::{
    contains_any, ACTION_MARKERS, CALENDAR_MARKERS, DEFLECTION_MARKERS, INTERRUPTION_MARKERS,
    INTERRUPTION_MAX_WORDS, VAGUE_MARKERS,
};

/// Classifies an utterance as vague, deflecting, and/or concrete. Never fails; text that
/// matches nothing yields all-false.
pub fn classify(text: &str) -> ClassificationResult {
    let lowered = text.to_lowercase();

    let has_digit = text.chars().any(is_digit);
    let has_calendar_word = contains_any(&lowered, &CALENDAR_MARKERS);
    let has_action_verb = contains_any(&lowered, &ACTION_MARKERS);

    ClassificationResult {
        is_vague: contains_any(&lowered, &VAGUE_MARKERS),
        is_deflecting: contains_any(&lowered, &DEFLECTION_MARKERS),
        is_concrete: has_digit || has_calendar_word || has_action_verb,
    }
}

/// Decimal and digit characters in any script, including superscripts and circled
/// digits. Letter numbers (Roman numerals and the like) and vulgar fractions are not
/// digits. Other numeric symbols such as circled numbers above nine still pass.
fn is_digit(c: char) -> bool {
    if c.is_ascii_digit() {
        return true;
    }
    c.is_numeric()
        && !matches!(
            c,
            '\u{00BC}'..='\u{00BE}'
                | '\u{16EE}'..='\u{16F0}'
                | '\u{2150}'..='\u{2189}'
                | '\u{3007}'
                | '\u{3021}'..='\u{3029}'
                | '\u{3038}'..='\u{303A}'
        )
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Short directive turns ("wait", "hold on", ...) cut the adversary off mid-reply.
pub fn detect_interruption(text: &str) -> bool {
    word_count(text) <= INTERRUPTION_MAX_WORDS
        && contains_any(text.trim().to_lowercase().as_str(), &INTERRUPTION_MARKERS)
}

/// Cues for the reply generator, interruption first.
pub fn pressure_cues(classification: &ClassificationResult, interruption: bool) -> Vec<PressureCue> {
    let mut cues = Vec::new();
    if interruption {
        cues.push(PressureCue::YieldToInterruption);
    }
    if classification.is_vague {
        cues.push(PressureCue::ChallengeVagueness);
    }
    if classification.is_deflecting {
        cues.push(PressureCue::ForceBackOnTopic);
    }
    if !classification.is_concrete {
        cues.push(PressureCue::DemandSpecifics);
    }
    cues
}
