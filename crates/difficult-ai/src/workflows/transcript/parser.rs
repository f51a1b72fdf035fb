use super::TranscriptImportError;
use crate::workflows::conversation::Speaker;
use serde::{Deserialize, Deserializer};
use std::io::Read;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptTurn {
    pub speaker: Speaker,
    pub content: String,
}

/// Reads `role,content` rows. Rows with empty content are skipped; unknown roles fail
/// with their 1-based data line.
pub(crate) fn parse_turns<R: Read>(reader: R) -> Result<Vec<TranscriptTurn>, TranscriptImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut turns = Vec::new();

    for (index, record) in csv_reader.deserialize::<TranscriptRow>().enumerate() {
        let row = record?;
        let Some(content) = row.content else {
            continue;
        };
        let Some(speaker) = Speaker::parse(&row.role) else {
            return Err(TranscriptImportError::UnknownRole {
                line: index + 1,
                role: row.role,
            });
        };
        turns.push(TranscriptTurn { speaker, content });
    }

    Ok(turns)
}

#[derive(Debug, Deserialize)]
struct TranscriptRow {
    #[serde(alias = "Role", alias = "speaker", alias = "Speaker")]
    role: String,
    #[serde(
        alias = "Content",
        alias = "text",
        alias = "Text",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    content: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
