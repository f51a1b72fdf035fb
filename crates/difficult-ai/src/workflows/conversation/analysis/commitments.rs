use super::super::domain::Commitment;
use super::markers::COMMITMENT_MARKERS;

/// Extracts commitment spans: for each marker (in marker order) found in the text, the
/// span from its first occurrence through the next period, or to the end of the text.
///
/// Markers are ASCII, so the search runs on an ASCII-lowercased copy whose byte offsets
/// line up exactly with the original text; spans keep the caller's casing. Overlapping
/// spans from different markers are all returned.
pub fn extract_commitments(text: &str) -> Vec<Commitment> {
    let lowered = text.to_ascii_lowercase();

    COMMITMENT_MARKERS
        .iter()
        .filter_map(|marker| {
            let start = lowered.find(marker)?;
            let end = lowered[start..]
                .find('.')
                .map(|offset| start + offset)
                .unwrap_or(lowered.len());
            let span = text[start..end].trim();
            (!span.is_empty()).then(|| Commitment(span.to_string()))
        })
        .collect()
}
