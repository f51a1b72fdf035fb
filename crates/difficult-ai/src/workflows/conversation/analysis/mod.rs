mod classifier;
mod commitments;
mod markers;

pub use classifier::{classify, detect_interruption, pressure_cues, word_count};
pub use commitments::extract_commitments;

use super::domain::UtteranceAnalysis;

/// Runs every stateless check over one utterance.
pub fn analyze(text: &str) -> UtteranceAnalysis {
    let classification = classify(text);
    let interruption = detect_interruption(text);

    UtteranceAnalysis {
        classification,
        word_count: word_count(text),
        interruption,
        commitments: extract_commitments(text),
        cues: pressure_cues(&classification, interruption),
    }
}
