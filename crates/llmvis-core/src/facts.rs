//! Immutable per-answer fact records produced by extraction.
//!
//! Facts are derived data: they are recomputed wholesale when extraction
//! logic changes, never mutated in place. Aggregation is a read-only
//! reduction over these rows.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::profile::BrandProfile;

/// Which matching strategy detected a brand in a sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMethod {
    Exact,
    Abbreviation,
    Partial,
    Fuzzy,
}

impl std::fmt::Display for MatchMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchMethod::Exact => write!(f, "exact"),
            MatchMethod::Abbreviation => write!(f, "abbreviation"),
            MatchMethod::Partial => write!(f, "partial"),
            MatchMethod::Fuzzy => write!(f, "fuzzy"),
        }
    }
}

/// One sentence in which a brand was detected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentionSentence {
    pub text: String,
    /// 1-based sentence position within the answer.
    pub position: usize,
    pub word_count: usize,
}

/// Brand-mention record for one (answer, brand) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentionFact {
    pub brand_slug: String,
    pub detected: bool,
    /// Detection confidence in `[0, 1]`; max over matching sentences.
    pub confidence: f64,
    /// Method of the first (earliest) matching sentence.
    pub method: Option<MatchMethod>,
    /// 1-based position of the first matching sentence.
    pub first_position: Option<usize>,
    /// Number of distinct sentences mentioning the brand.
    pub mention_count: usize,
    pub sentences: Vec<MentionSentence>,
    /// Word count of the whole answer, for depth-of-mention denominators.
    pub total_word_count: usize,
    /// Sentence count of the whole answer, for position-decay weighting.
    pub total_sentence_count: usize,
}

impl MentionFact {
    /// A non-detection for a brand in an answer.
    #[must_use]
    pub fn miss(brand_slug: String, total_word_count: usize, total_sentence_count: usize) -> Self {
        Self {
            brand_slug,
            detected: false,
            confidence: 0.0,
            method: None,
            first_position: None,
            mention_count: 0,
            sentences: Vec::new(),
            total_word_count,
            total_sentence_count,
        }
    }
}

/// Classification bucket for a cited URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CitationType {
    /// Brand-owned property (the brand's own domain or a variant of it).
    Brand,
    /// Third-party editorial content; the default bucket.
    Earned,
    /// Social or sharing platform.
    Social,
}

/// Classification record for one cited URL in an answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitationFact {
    pub url: String,
    pub domain: String,
    pub citation_type: CitationType,
    /// Brand slug this citation counts toward, when one applies.
    pub attributed_brand: Option<String>,
    pub confidence: f64,
}

impl CitationFact {
    /// Build a brand-owned citation.
    ///
    /// Taking the matched profile (rather than a free-form slug) is what
    /// keeps the closed-set invariant: a `Brand`-type fact can only ever
    /// name a profile that exists in the analysis.
    #[must_use]
    pub fn brand_owned(url: String, domain: String, profile: &BrandProfile, confidence: f64) -> Self {
        Self {
            url,
            domain,
            citation_type: CitationType::Brand,
            attributed_brand: Some(profile.slug()),
            confidence,
        }
    }

    #[must_use]
    pub fn earned(
        url: String,
        domain: String,
        attributed_brand: Option<String>,
        confidence: f64,
    ) -> Self {
        Self {
            url,
            domain,
            citation_type: CitationType::Earned,
            attributed_brand,
            confidence,
        }
    }

    #[must_use]
    pub fn social(
        url: String,
        domain: String,
        attributed_brand: Option<String>,
        confidence: f64,
    ) -> Self {
        Self {
            url,
            domain,
            citation_type: CitationType::Social,
            attributed_brand,
            confidence,
        }
    }
}

/// Answer-level sentiment polarity in `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentFact {
    pub polarity: f64,
}

/// The scope-tagged fact bundle for one answer: the aggregation input row.
///
/// Carries the answer's scope tags so the aggregator never needs the raw
/// `AnswerRecord` back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerFacts {
    pub answer_id: Uuid,
    pub platform: String,
    pub topic: String,
    pub persona: String,
    pub mentions: Vec<MentionFact>,
    pub citations: Vec<CitationFact>,
    pub sentiment: SentimentFact,
}
