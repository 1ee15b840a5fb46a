//! Rule-based polarity scorer for recommendation/comparison language.

/// Word weights tuned for product-recommendation answers.
///
/// Keys are lowercase single words. Values in `(0.0, 1.0]` are positive,
/// in `[-1.0, 0.0)` are negative. The final score is clamped to `[-1.0, 1.0]`.
const LEXICON: &[(&str, f64)] = &[
    // Positive signals
    ("best", 0.5),
    ("excellent", 0.5),
    ("outstanding", 0.5),
    ("great", 0.4),
    ("recommend", 0.4),
    ("recommended", 0.4),
    ("top", 0.3),
    ("leading", 0.3),
    ("good", 0.3),
    ("strong", 0.3),
    ("popular", 0.3),
    ("reliable", 0.4),
    ("trusted", 0.4),
    ("generous", 0.4),
    ("competitive", 0.3),
    ("valuable", 0.3),
    ("favorite", 0.4),
    ("love", 0.5),
    ("ideal", 0.4),
    ("standout", 0.4),
    // Negative signals
    ("worst", -0.6),
    ("terrible", -0.6),
    ("avoid", -0.6),
    ("poor", -0.4),
    ("bad", -0.4),
    ("weak", -0.3),
    ("expensive", -0.3),
    ("hidden", -0.3),
    ("fees", -0.2),
    ("complaint", -0.4),
    ("complaints", -0.4),
    ("scam", -0.7),
    ("lawsuit", -0.5),
    ("decline", -0.3),
    ("declined", -0.3),
    ("limited", -0.2),
    ("confusing", -0.3),
    ("disappointing", -0.5),
    ("outdated", -0.3),
    ("unreliable", -0.5),
];

const NEGATORS: &[&str] = &["not", "no", "never", "hardly"];

/// Score a text string with the lexicon, clamped to `[-1.0, 1.0]`.
///
/// A negator immediately before a scored word flips its weight
/// ("not recommended" counts negative). Empty or unknown text scores
/// `0.0`. Deterministic given identical input.
#[must_use]
pub fn score_sentiment(text: &str) -> f64 {
    let mut score = 0.0_f64;
    let mut previous_negates = false;

    for word in text.split_whitespace() {
        let w = word
            .trim_matches(|c: char| !c.is_alphabetic())
            .to_lowercase();

        if let Some(&(_, weight)) = LEXICON.iter().find(|(lex_word, _)| w == *lex_word) {
            score += if previous_negates { -weight } else { weight };
        }
        previous_negates = NEGATORS.contains(&w.as_str());
    }

    score.clamp(-1.0, 1.0)
}
