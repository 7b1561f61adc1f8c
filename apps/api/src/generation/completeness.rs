//! Completeness heuristic for generated cover letters.
//!
//! A letter is complete when it carries a closing phrase and does not end
//! abruptly. Known false positive: a letter whose last character is a
//! lowercase letter (e.g. a signature such as "Jane") reads as abrupt.

pub const CLOSING_PHRASES: &[&str] = &[
    "sincerely",
    "best regards",
    "kind regards",
    "yours faithfully",
    "yours sincerely",
    "thank you for your consideration",
    "look forward to hearing from you",
    "look forward to discussing",
];

/// Phrase models tend to stop on when they run out of tokens mid-letter.
const UNFINISHED_CONFIDENCE: &str = "i am confident my";

const MIN_LINES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completeness {
    Complete,
    Incomplete,
}

pub fn has_closing_phrase(text: &str) -> bool {
    let lower = text.to_lowercase();
    CLOSING_PHRASES.iter().any(|phrase| lower.contains(phrase))
}

/// True when the text ends on a lowercase ASCII letter or a comma,
/// ignoring trailing whitespace.
fn ends_mid_sentence(text: &str) -> bool {
    text.trim_end()
        .chars()
        .last()
        .is_some_and(|c| c.is_ascii_lowercase() || c == ',')
}

pub fn ends_abruptly(text: &str) -> bool {
    let stalls_on_confidence =
        text.to_lowercase().contains(UNFINISHED_CONFIDENCE) && !has_closing_phrase(text);
    let too_short = text.split('\n').count() < MIN_LINES;

    ends_mid_sentence(text) || stalls_on_confidence || too_short
}

pub fn assess(text: &str) -> Completeness {
    if has_closing_phrase(text) && !ends_abruptly(text) {
        Completeness::Complete
    } else {
        Completeness::Incomplete
    }
}
