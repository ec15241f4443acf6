//! # Rulebot Text Helpers (`common::text`)
//!
//! File: cli/src/common/text.rs
//!
//! ## Overview
//!
//! Normalization and keyword matching used by both the knowledge store and
//! the rule matcher. Matching is plain token comparison: a phrase matches
//! when its words appear contiguously among the input's words. There is no
//! regex engine and no grammar involved.
//!

/// Trims, lowercases and collapses every run of whitespace to one space.
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Removes ASCII punctuation, then normalizes the remainder.
///
/// `"What is AI?"` becomes `"what is ai"`.
pub fn strip_punctuation(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect();
    normalize(&cleaned)
}

/// Splits text into words with leading/trailing punctuation removed, flagging
/// each word after which a clause ends.
///
/// Inner punctuation survives, so `"how're"` stays one word while `"hi!"`
/// becomes `"hi"`. Words that are only punctuation are dropped. The flag is
/// set when the punctuation trimmed from a word's end (or a following
/// punctuation-only token) contains one of `.,!?;:`, so in
/// `"I'm Sam. Nice day"` it is set on `"Sam"` only.
pub fn words_with_breaks(text: &str) -> Vec<(&str, bool)> {
    let mut out: Vec<(&str, bool)> = Vec::new();
    for raw in text.split_whitespace() {
        let word = raw.trim_matches(|c: char| !c.is_alphanumeric());
        let tail = match raw.rfind(|c: char| c.is_alphanumeric()) {
            Some(last) => &raw[last..],
            None => raw,
        };
        let ends_clause = tail.contains(CLAUSE_BREAKS);
        if word.is_empty() {
            if let Some((_, prev)) = out.last_mut() {
                *prev |= ends_clause;
            }
            continue;
        }
        out.push((word, ends_clause));
    }
    out
}

const CLAUSE_BREAKS: &[char] = &['.', ',', '!', '?', ';', ':'];

/// Finds `phrase` as a contiguous word sequence in `words` (ASCII case-insensitive).
///
/// Returns the index of the first word *after* the match, so callers can read
/// what follows (e.g. the name in "my name is Sam").
pub fn find_phrase(words: &[&str], phrase: &str) -> Option<usize> {
    let needle: Vec<&str> = phrase.split_whitespace().collect();
    if needle.is_empty() || needle.len() > words.len() {
        return None;
    }
    words
        .windows(needle.len())
        .position(|window| {
            window
                .iter()
                .zip(&needle)
                .all(|(w, n)| w.eq_ignore_ascii_case(n))
        })
        .map(|start| start + needle.len())
}

/// True if any of `phrases` occurs in `words`.
pub fn contains_any(words: &[&str], phrases: &[&str]) -> bool {
    phrases.iter().any(|p| find_phrase(words, p).is_some())
}
