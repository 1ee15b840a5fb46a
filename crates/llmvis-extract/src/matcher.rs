//! Ordered brand-matching strategies over single sentences.
//!
//! Strategies run in priority order and the first hit wins. Confidence
//! bands are disjoint across strategies (exact > abbreviation > partial >
//! fuzzy) so a detection's method is always recoverable from its score.

use llmvis_core::config::MatcherConfig;
use llmvis_core::facts::MatchMethod;

use crate::expand::BrandExpansions;

/// One brand plus its cached expansions, as seen by the matcher.
#[derive(Debug, Clone, Copy)]
pub struct BrandTarget<'a> {
    pub name: &'a str,
    pub slug: &'a str,
    pub expansions: &'a BrandExpansions,
}

/// A successful detection verdict.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrandMatch {
    pub confidence: f64,
    pub method: MatchMethod,
}

/// A single matching strategy; returns `None` on miss.
pub trait MatchStrategy: Send + Sync {
    fn attempt(&self, sentence: &str, brand: &BrandTarget<'_>) -> Option<BrandMatch>;
}

/// Case-insensitive word-boundary match of the full display name.
struct ExactStrategy;

impl MatchStrategy for ExactStrategy {
    fn attempt(&self, sentence: &str, brand: &BrandTarget<'_>) -> Option<BrandMatch> {
        let needle = brand.name.to_lowercase();
        if contains_word_boundary(&sentence.to_lowercase(), &needle) {
            Some(BrandMatch {
                confidence: 1.0,
                method: MatchMethod::Exact,
            })
        } else {
            None
        }
    }
}

/// Word-boundary match of any cached abbreviation form.
struct AbbreviationStrategy;

impl MatchStrategy for AbbreviationStrategy {
    fn attempt(&self, sentence: &str, brand: &BrandTarget<'_>) -> Option<BrandMatch> {
        let lower = sentence.to_lowercase();
        let hit = brand
            .expansions
            .abbreviations
            .iter()
            // Two-letter forms match too many incidental words.
            .filter(|a| a.len() >= 3)
            .any(|a| contains_word_boundary(&lower, a));
        if hit {
            Some(BrandMatch {
                confidence: 0.85,
                method: MatchMethod::Abbreviation,
            })
        } else {
            None
        }
    }
}

/// Match of a single sufficiently long, non-generic brand word.
struct PartialStrategy {
    min_len: usize,
    generic_words: Vec<String>,
}

impl MatchStrategy for PartialStrategy {
    fn attempt(&self, sentence: &str, brand: &BrandTarget<'_>) -> Option<BrandMatch> {
        let lower = sentence.to_lowercase();
        let best = brand
            .expansions
            .significant_words
            .iter()
            .filter(|w| w.len() >= self.min_len)
            .filter(|w| !self.generic_words.iter().any(|g| g == *w))
            .filter(|w| contains_word_boundary(&lower, w))
            .map(|w| w.len())
            .max()?;

        // Longer matched words are less likely to be coincidental.
        #[allow(clippy::cast_precision_loss)]
        let bonus = 0.03 * (best - self.min_len) as f64;
        Some(BrandMatch {
            confidence: (0.6 + bonus).min(0.75),
            method: MatchMethod::Partial,
        })
    }
}

/// Levenshtein similarity between brand forms and leading sentence words.
struct FuzzyStrategy {
    threshold: f64,
    window_words: usize,
    max_len: usize,
    min_word_len: usize,
    generic_words: Vec<String>,
}

impl MatchStrategy for FuzzyStrategy {
    fn attempt(&self, sentence: &str, brand: &BrandTarget<'_>) -> Option<BrandMatch> {
        let lower = sentence.to_lowercase();
        let window: Vec<&str> = lower
            .split_whitespace()
            .take(self.window_words)
            .map(|w| w.trim_matches(|c: char| !c.is_ascii_alphanumeric()))
            .filter(|w| !w.is_empty())
            .collect();
        if window.is_empty() {
            return None;
        }

        let name = brand.name.to_lowercase();
        let mut candidates: Vec<String> = Vec::new();
        if name.len() <= self.max_len {
            candidates.push(name.clone());
        }
        // Same length/genericity guards as the partial strategy; a fuzzy
        // hit on "card" would be a coincidence, not a detection.
        for word in &brand.expansions.significant_words {
            if word.len() >= self.min_word_len
                && word.len() <= self.max_len
                && !self.generic_words.iter().any(|g| g == word)
            {
                candidates.push(word.clone());
            }
        }

        let mut best = 0.0_f64;
        for candidate in &candidates {
            let span = candidate.split_whitespace().count().max(1);
            for start in 0..window.len() {
                let end = (start + span).min(window.len());
                let segment = window[start..end].join(" ");
                if segment.len() > self.max_len {
                    continue;
                }
                if let Some(sim) = similarity(candidate, &segment) {
                    best = best.max(sim);
                }
            }
        }

        if best >= self.threshold {
            // Scaled below the partial band so method ordering is
            // recoverable from confidence alone.
            Some(BrandMatch {
                confidence: (best * 0.82).min(0.59),
                method: MatchMethod::Fuzzy,
            })
        } else {
            None
        }
    }
}

/// The ordered strategy chain for one analysis.
pub struct BrandMatcher {
    strategies: Vec<Box<dyn MatchStrategy>>,
}

impl BrandMatcher {
    #[must_use]
    pub fn new(config: &MatcherConfig) -> Self {
        let strategies: Vec<Box<dyn MatchStrategy>> = vec![
            Box::new(ExactStrategy),
            Box::new(AbbreviationStrategy),
            Box::new(PartialStrategy {
                min_len: config.min_partial_len,
                generic_words: config.generic_words.clone(),
            }),
            Box::new(FuzzyStrategy {
                threshold: config.fuzzy_threshold,
                window_words: config.fuzzy_window_words,
                max_len: config.fuzzy_max_len,
                min_word_len: config.min_partial_len,
                generic_words: config.generic_words.clone(),
            }),
        ];
        Self { strategies }
    }

    /// Run the chain in priority order; first hit wins, miss yields `None`.
    #[must_use]
    pub fn match_sentence(&self, sentence: &str, brand: &BrandTarget<'_>) -> Option<BrandMatch> {
        if sentence.is_empty() {
            return None;
        }
        self.strategies
            .iter()
            .find_map(|strategy| strategy.attempt(sentence, brand))
    }
}

/// Substring match with non-alphanumeric (or string-edge) boundaries on
/// both sides. Both arguments must already be lowercase.
fn contains_word_boundary(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    let bytes = haystack.as_bytes();
    let mut search_from = 0;
    while let Some(offset) = haystack[search_from..].find(needle) {
        let start = search_from + offset;
        let end = start + needle.len();
        let left_ok = start == 0 || !bytes[start - 1].is_ascii_alphanumeric();
        let right_ok = end == haystack.len() || !bytes[end].is_ascii_alphanumeric();
        if left_ok && right_ok {
            return true;
        }
        // Advance one full character so the next slice stays on a
        // UTF-8 boundary.
        let step = haystack[start..].chars().next().map_or(1, char::len_utf8);
        search_from = start + step;
        if search_from >= haystack.len() {
            break;
        }
    }
    false
}

/// Levenshtein similarity in `[0, 1]`, or `None` when the length
/// difference alone rules the pair out (difference above 50% of the
/// longer string).
pub(crate) fn similarity(a: &str, b: &str) -> Option<f64> {
    let len_a = a.chars().count();
    let len_b = b.chars().count();
    let max_len = len_a.max(len_b);
    if max_len == 0 {
        return None;
    }
    if len_a.abs_diff(len_b) * 2 > max_len {
        return None;
    }

    let distance = levenshtein(a, b);
    #[allow(clippy::cast_precision_loss)]
    let sim = 1.0 - distance as f64 / max_len as f64;
    Some(sim)
}

/// Two-row Levenshtein distance.
fn levenshtein(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    let mut prev_row: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr_row: Vec<usize> = vec![0; b_chars.len() + 1];

    for (i, &a_char) in a_chars.iter().enumerate() {
        curr_row[0] = i + 1;
        for (j, &b_char) in b_chars.iter().enumerate() {
            let cost = usize::from(a_char != b_char);
            curr_row[j + 1] = (prev_row[j + 1] + 1)
                .min(curr_row[j] + 1)
                .min(prev_row[j] + cost);
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b_chars.len()]
}

#[cfg(test)]
#[path = "matcher_test.rs"]
mod tests;
