//! Immutable engine configuration.
//!
//! Every tunable constant lives here and is passed explicitly into the
//! matcher, classifier, and aggregator constructors. Nothing in the engine
//! reads ambient global state. The `Default` impls carry the tuned values;
//! none of them is assumed optimal and all are overridable per analysis.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Thresholds for the ordered brand-matching strategies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Minimum length of a significant brand word for a partial match,
    /// keeps generic words like "bank" or "card" from matching alone.
    pub min_partial_len: usize,
    /// Words never accepted as partial matches regardless of length.
    pub generic_words: Vec<String>,
    /// Minimum Levenshtein similarity for a fuzzy hit.
    pub fuzzy_threshold: f64,
    /// How many leading sentence words the fuzzy window scans.
    pub fuzzy_window_words: usize,
    /// Longest candidate string the fuzzy comparator will consider.
    pub fuzzy_max_len: usize,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            min_partial_len: 5,
            generic_words: [
                "rewards", "points", "services", "solutions", "group", "global",
                "digital", "systems", "holdings", "partners", "capital", "financial",
            ]
            .iter()
            .map(ToString::to_string)
            .collect(),
            fuzzy_threshold: 0.7,
            fuzzy_window_words: 8,
            fuzzy_max_len: 50,
        }
    }
}

/// Controls for abbreviation and domain-variant generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpanderConfig {
    /// Words stripped from display names before expansion: articles,
    /// prepositions, and corporate suffixes.
    pub stop_words: Vec<String>,
    /// Generic TLDs crossed with the base forms when building domain variants.
    pub tlds: Vec<String>,
    /// Hard cap on generated domain variants per brand.
    pub max_domain_variants: usize,
}

impl Default for ExpanderConfig {
    fn default() -> Self {
        Self {
            stop_words: [
                "the", "a", "an", "and", "of", "for", "by", "in", "on", "at",
                "inc", "corp", "corporation", "ltd", "llc", "co", "company",
            ]
            .iter()
            .map(ToString::to_string)
            .collect(),
            tlds: ["com", "io", "co", "net", "org", "ai"]
                .iter()
                .map(ToString::to_string)
                .collect(),
            max_domain_variants: 64,
        }
    }
}

/// Citation classification confidences and the social-platform list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CitationConfig {
    /// Exact match of the cited domain against a brand variant.
    pub brand_exact_confidence: f64,
    /// Cited domain starts with / contains a sufficiently long variant.
    pub brand_variant_confidence: f64,
    /// Minimum variant length for the starts-with/contains check.
    pub brand_variant_min_len: usize,
    /// Minimum fuzzy similarity between cited domain and a brand variant.
    pub brand_fuzzy_threshold: f64,
    /// Hosts treated as social/sharing platforms (registrable domain only;
    /// `www.`/`m.` and country subdomains are normalized away first).
    pub social_domains: Vec<String>,
    pub social_confidence: f64,
    /// Earned-media keyword families, each with its own confidence.
    pub news_keywords: Vec<String>,
    pub news_confidence: f64,
    pub review_keywords: Vec<String>,
    pub review_confidence: f64,
    pub industry_keywords: Vec<String>,
    pub industry_confidence: f64,
    /// Anything matching no family still classifies as earned at this floor.
    pub earned_baseline_confidence: f64,
}

impl Default for CitationConfig {
    fn default() -> Self {
        Self {
            brand_exact_confidence: 0.95,
            brand_variant_confidence: 0.85,
            brand_variant_min_len: 6,
            brand_fuzzy_threshold: 0.7,
            social_domains: [
                "facebook.com", "instagram.com", "twitter.com", "x.com",
                "linkedin.com", "youtube.com", "youtu.be", "tiktok.com",
                "reddit.com", "redd.it", "pinterest.com", "threads.net",
                "medium.com", "quora.com", "fb.com", "t.co",
            ]
            .iter()
            .map(ToString::to_string)
            .collect(),
            social_confidence: 0.92,
            news_keywords: [
                "news", "times", "post", "herald", "tribune", "journal",
                "daily", "gazette", "reuters", "bloomberg", "press",
            ]
            .iter()
            .map(ToString::to_string)
            .collect(),
            news_confidence: 0.8,
            review_keywords: [
                "review", "reviews", "compare", "comparison", "vs", "best",
                "top10", "rating", "ratings", "wirecutter", "trustpilot",
            ]
            .iter()
            .map(ToString::to_string)
            .collect(),
            review_confidence: 0.82,
            industry_keywords: [
                "insider", "weekly", "magazine", "report", "wire", "digest",
                "industry", "trade", "analyst",
            ]
            .iter()
            .map(ToString::to_string)
            .collect(),
            industry_confidence: 0.78,
            earned_baseline_confidence: 0.7,
        }
    }
}

/// Smoothing, confidence-interval, and quality-flag parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregationConfig {
    /// Minimum detection confidence for a mention to count toward visibility.
    pub match_threshold: f64,
    /// Answer count below which visibility is pulled toward the neutral prior.
    pub min_sample_size: usize,
    /// Citation count below which citation share gets the same smoothing.
    pub min_citation_sample: usize,
    /// Coefficient-of-variation cutoff above which a scope is flagged
    /// high-variance.
    pub cv_flag_threshold: f64,
    /// Type weights for the citation-share numerator and denominator.
    pub brand_citation_weight: f64,
    pub earned_citation_weight: f64,
    pub social_citation_weight: f64,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            match_threshold: 0.5,
            min_sample_size: 20,
            min_citation_sample: 10,
            cv_flag_threshold: 1.0,
            brand_citation_weight: 1.0,
            earned_citation_weight: 0.9,
            social_citation_weight: 0.8,
        }
    }
}

/// The complete engine configuration, fixed for the lifetime of an analysis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    pub matcher: MatcherConfig,
    pub expander: ExpanderConfig,
    pub citation: CitationConfig,
    pub aggregation: AggregationConfig,
}

impl EngineConfig {
    /// Check that thresholds are within their meaningful ranges.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn unit_range(name: &str, value: f64) -> Result<(), ConfigError> {
            if (0.0..=1.0).contains(&value) {
                Ok(())
            } else {
                Err(ConfigError::Validation(format!(
                    "{name} must be in [0, 1], got {value}"
                )))
            }
        }

        unit_range("matcher.fuzzy_threshold", self.matcher.fuzzy_threshold)?;
        unit_range(
            "citation.brand_exact_confidence",
            self.citation.brand_exact_confidence,
        )?;
        unit_range(
            "citation.brand_variant_confidence",
            self.citation.brand_variant_confidence,
        )?;
        unit_range(
            "citation.brand_fuzzy_threshold",
            self.citation.brand_fuzzy_threshold,
        )?;
        unit_range("citation.social_confidence", self.citation.social_confidence)?;
        unit_range(
            "citation.earned_baseline_confidence",
            self.citation.earned_baseline_confidence,
        )?;
        unit_range("aggregation.match_threshold", self.aggregation.match_threshold)?;

        if self.matcher.min_partial_len == 0 {
            return Err(ConfigError::Validation(
                "matcher.min_partial_len must be at least 1".to_string(),
            ));
        }
        if self.expander.max_domain_variants == 0 {
            return Err(ConfigError::Validation(
                "expander.max_domain_variants must be at least 1".to_string(),
            ));
        }
        if self.aggregation.min_sample_size == 0 {
            return Err(ConfigError::Validation(
                "aggregation.min_sample_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        EngineConfig::default().validate().unwrap();
    }

    #[test]
    fn out_of_range_threshold_rejected() {
        let mut config = EngineConfig::default();
        config.matcher.fuzzy_threshold = 1.5;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("fuzzy_threshold"), "{err}");
    }

    #[test]
    fn zero_sample_size_rejected() {
        let mut config = EngineConfig::default();
        config.aggregation.min_sample_size = 0;
        assert!(config.validate().is_err());
    }
}
