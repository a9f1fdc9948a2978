use regex::Regex;
use std::sync::LazyLock;

pub const BIOLOGICAL_TERMS: [&str; 8] = [
    "gene", "protein", "enzyme", "dna", "rna", "cell", "molecule", "pathway",
];

pub const COMPUTATIONAL_TERMS: [&str; 6] = [
    "logic",
    "program",
    "algorithm",
    "function",
    "process",
    "system",
];

/// Spans shorter than this (in characters) are penalized.
const SHORT_SPAN_CHARS: usize = 10;

static SENTENCE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("sentence break pattern is valid"));

/// Splits text on runs of `.`, `!` and `?`, trimming fragments and dropping empty ones.
pub fn split_sentences(text: &str) -> Vec<&str> {
    SENTENCE_BREAK
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Scores a matched span against the sentence it came from.
///
/// Works in tenths so the boosts and the penalty add up exactly.
pub fn confidence(span: &str, sentence: &str) -> f64 {
    let lowered = sentence.to_lowercase();
    let boosts = BIOLOGICAL_TERMS
        .iter()
        .chain(COMPUTATIONAL_TERMS.iter())
        .filter(|term| lowered.contains(*term))
        .count() as i64;
    let penalty = if span.chars().count() < SHORT_SPAN_CHARS { 2 } else { 0 };

    let tenths = (5 + boosts - penalty).clamp(0, 10);
    tenths as f64 / 10.0
}

/// Joins the sentences within `window` of `index` (1-based), the sentence itself included.
pub fn context(sentences: &[&str], index: usize, window: usize) -> String {
    let start = index.saturating_sub(window + 1);
    let end = (index + window).min(sentences.len());
    sentences[start..end].join(" ")
}
