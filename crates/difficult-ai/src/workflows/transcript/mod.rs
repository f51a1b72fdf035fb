//! Replays recorded conversations exported as CSV through a rehearsal session.

mod parser;

pub use parser::TranscriptTurn;

use crate::workflows::conversation::{ConversationSession, Speaker, UtteranceOutcome};
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum TranscriptImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    UnknownRole { line: usize, role: String },
}

impl std::fmt::Display for TranscriptImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranscriptImportError::Io(err) => write!(f, "failed to read transcript: {}", err),
            TranscriptImportError::Csv(err) => write!(f, "invalid transcript CSV data: {}", err),
            TranscriptImportError::UnknownRole { line, role } => {
                write!(f, "unknown speaker role '{}' on row {}", role, line)
            }
        }
    }
}

impl std::error::Error for TranscriptImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TranscriptImportError::Io(err) => Some(err),
            TranscriptImportError::Csv(err) => Some(err),
            TranscriptImportError::UnknownRole { .. } => None,
        }
    }
}

impl From<std::io::Error> for TranscriptImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for TranscriptImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Ordered turns of a recorded conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordedTranscript {
    turns: Vec<TranscriptTurn>,
}

impl RecordedTranscript {
    pub fn turns(&self) -> &[TranscriptTurn] {
        &self.turns
    }

    pub fn user_turns(&self) -> usize {
        self.turns
            .iter()
            .filter(|turn| turn.speaker == Speaker::User)
            .count()
    }

    /// Feeds every turn through `session` in order. Only user turns are scored.
    pub fn replay(&self, session: &mut ConversationSession) -> Vec<UtteranceOutcome> {
        let mut outcomes = Vec::with_capacity(self.user_turns());
        for turn in &self.turns {
            match turn.speaker {
                Speaker::User => {
                    outcomes.push(session.process_utterance(&turn.content));
                }
                Speaker::Adversary => {
                    session.record_adversary_turn(&turn.content);
                }
            }
        }
        tracing::info!(
            session_id = %session.id(),
            turns = self.turns.len(),
            user_turns = outcomes.len(),
            "transcript replayed"
        );
        outcomes
    }
}

pub struct TranscriptImporter;

impl TranscriptImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<RecordedTranscript, TranscriptImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<RecordedTranscript, TranscriptImportError> {
        let turns = parser::parse_turns(reader)?;
        Ok(RecordedTranscript { turns })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::conversation::SessionId;
    use std::io::Cursor;

    const TRANSCRIPT: &str = "role,content\n\
assistant,Why should we hire you?\n\
user,I think I'm probably a good fit\n\
assistant,That is vague. Give me specifics.\n\
user,Maybe we can talk about that later\n\
user,\n\
user,I will ship the migration by Friday.\n";

    #[test]
    fn importer_reads_turns_and_skips_empty_rows() {
        let transcript =
            TranscriptImporter::from_reader(Cursor::new(TRANSCRIPT)).expect("import succeeds");

        assert_eq!(transcript.turns().len(), 5);
        assert_eq!(transcript.user_turns(), 3);
        assert_eq!(transcript.turns()[0].speaker, Speaker::Adversary);
    }

    #[test]
    fn replay_scores_only_user_turns() {
        let transcript =
            TranscriptImporter::from_reader(Cursor::new(TRANSCRIPT)).expect("import succeeds");
        let mut session = ConversationSession::new(SessionId("session-replay".to_string()));

        let outcomes = transcript.replay(&mut session);

        assert_eq!(outcomes.len(), 3);
        let metrics = session.metrics();
        assert_eq!(metrics.total_exchanges, 3);
        assert_eq!(metrics.vague_response_count, 2);
        assert_eq!(metrics.commitments_made, 2);
        assert_eq!(session.transcript().len(), 5);
    }

    #[test]
    fn unknown_roles_are_reported_with_their_row() {
        let error = TranscriptImporter::from_reader(Cursor::new(
            "role,content\nuser,hello\nnarrator,meanwhile\n",
        ))
        .expect_err("unknown role");

        match error {
            TranscriptImportError::UnknownRole { line, role } => {
                assert_eq!(line, 2);
                assert_eq!(role, "narrator");
            }
            other => panic!("expected unknown role, got {other:?}"),
        }
    }

    #[test]
    fn from_path_propagates_io_errors() {
        let error = TranscriptImporter::from_path("./does-not-exist.csv").expect_err("io error");
        assert!(matches!(error, TranscriptImportError::Io(_)));
    }
}
