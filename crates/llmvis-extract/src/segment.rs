//! Sentence and word segmentation for raw answer text.

use std::sync::LazyLock;

use regex::Regex;

static SENTENCE_TERMINAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("valid sentence regex"));

/// Split raw answer text into trimmed, non-empty sentences.
///
/// Splits on runs of sentence-terminal punctuation (`.`, `!`, `?`) and
/// collapses internal whitespace runs to single spaces. Order is
/// preserved. Empty input yields an empty vector; never errors.
#[must_use]
pub fn sentences(raw: &str) -> Vec<String> {
    SENTENCE_TERMINAL_RE
        .split(raw)
        .map(|s| s.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|s| !s.is_empty())
        .collect()
}

/// Count whitespace-separated words. Empty input counts zero.
#[must_use]
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_empty() {
        assert!(sentences("").is_empty());
        assert!(sentences("   \n  ").is_empty());
    }

    #[test]
    fn splits_on_terminal_punctuation() {
        let out = sentences("First sentence. Second one! Third?");
        assert_eq!(out, vec!["First sentence", "Second one", "Third"]);
    }

    #[test]
    fn punctuation_runs_collapse() {
        let out = sentences("Really?! Yes... definitely.");
        assert_eq!(out, vec!["Really", "Yes", "definitely"]);
    }

    #[test]
    fn internal_whitespace_collapses() {
        let out = sentences("Acme   Rewards\n\tis  popular.");
        assert_eq!(out, vec!["Acme Rewards is popular"]);
    }

    #[test]
    fn counts_words_on_whitespace_runs() {
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("   "), 0);
        assert_eq!(count_words("one two  three\nfour"), 4);
    }
}
