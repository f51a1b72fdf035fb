//! Fixed marker vocabularies. Matching is raw substring search on lowercased text, so
//! "maybe" also counts as the calendar word "may".

pub(crate) const VAGUE_MARKERS: [&str; 10] = [
    "maybe",
    "possibly",
    "probably",
    "i think",
    "perhaps",
    "kind of",
    "sort of",
    "not sure",
    "we'll see",
    "hopefully",
];

pub(crate) const DEFLECTION_MARKERS: [&str; 6] = [
    "let's talk about",
    "what about",
    "but first",
    "before we get to that",
    "can we discuss",
    "moving on",
];

pub(crate) const CALENDAR_MARKERS: [&str; 19] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

pub(crate) const ACTION_MARKERS: [&str; 5] =
    ["will", "commit to", "promise", "guarantee", "deliver"];

/// Iteration order here is the output order of extracted commitments.
pub(crate) const COMMITMENT_MARKERS: [&str; 8] = [
    "i will",
    "i'll",
    "i commit to",
    "i promise",
    "i guarantee",
    "we will",
    "we'll",
    "by",
];

pub(crate) const INTERRUPTION_MARKERS: [&str; 5] = ["wait", "stop", "hold on", "let me", "actually"];

pub(crate) const INTERRUPTION_MAX_WORDS: usize = 3;

pub(crate) fn contains_any(haystack: &str, markers: &[&str]) -> bool {
    markers.iter().any(|marker| haystack.contains(marker))
}
