//! Per-answer extraction orchestration.

use llmvis_core::config::EngineConfig;
use llmvis_core::facts::{
    AnswerFacts, CitationFact, MentionFact, MentionSentence, SentimentFact,
};
use llmvis_core::profile::ProfileSet;
use llmvis_core::AnswerRecord;

use crate::citation::classify_citation;
use crate::expand::ExpansionCache;
use crate::matcher::{BrandMatcher, BrandTarget};
use crate::segment::{count_words, sentences};
use crate::sentiment::score_sentiment;

/// The structured facts extracted from one answer.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub mentions: Vec<MentionFact>,
    pub citations: Vec<CitationFact>,
    pub sentiment: SentimentFact,
}

impl Extraction {
    /// Bundle the facts with the answer's scope tags into the row shape
    /// the aggregator consumes.
    #[must_use]
    pub fn into_answer_facts(self, answer: &AnswerRecord) -> AnswerFacts {
        AnswerFacts {
            answer_id: answer.id,
            platform: answer.platform.clone(),
            topic: answer.topic.clone(),
            persona: answer.persona.clone(),
            mentions: self.mentions,
            citations: self.citations,
            sentiment: self.sentiment,
        }
    }
}

/// Extracts mention, citation, and sentiment facts from answers for one
/// analysis.
///
/// The matcher and the per-brand expansion cache are built once at
/// construction and shared read-only across every `extract` call, so the
/// extractor can be handed to concurrent workers behind an `Arc`.
pub struct MetricsExtractor {
    config: EngineConfig,
    profiles: ProfileSet,
    matcher: BrandMatcher,
    cache: ExpansionCache,
}

impl MetricsExtractor {
    #[must_use]
    pub fn new(config: EngineConfig, profiles: ProfileSet) -> Self {
        let matcher = BrandMatcher::new(&config.matcher);
        let cache = ExpansionCache::for_profiles(&profiles, &config.expander);
        Self {
            config,
            profiles,
            matcher,
            cache,
        }
    }

    #[must_use]
    pub fn profiles(&self) -> &ProfileSet {
        &self.profiles
    }

    /// Extract all facts from one answer.
    ///
    /// Pure function of the answer and the analysis state fixed at
    /// construction: no I/O, no randomness. Re-running on the same input
    /// yields identical output.
    #[must_use]
    pub fn extract(&self, answer: &AnswerRecord) -> Extraction {
        let answer_sentences = sentences(&answer.raw_text);
        let total_sentence_count = answer_sentences.len();
        let total_word_count: usize = answer_sentences.iter().map(|s| count_words(s)).sum();

        let mentions = self
            .profiles
            .iter()
            .map(|profile| {
                self.mention_fact(
                    profile.slug(),
                    &profile.name,
                    &answer_sentences,
                    total_word_count,
                )
            })
            .collect::<Vec<_>>();

        let citations: Vec<CitationFact> = answer
            .cited_urls
            .iter()
            .filter_map(|raw| {
                classify_citation(raw, &self.profiles, &self.cache, &self.config.citation)
            })
            .collect();

        let sentiment = SentimentFact {
            polarity: score_sentiment(&answer.raw_text),
        };

        tracing::debug!(
            answer_id = %answer.id,
            platform = %answer.platform,
            sentences = total_sentence_count,
            detected = mentions.iter().filter(|m| m.detected).count(),
            citations = citations.len(),
            dropped_urls = answer.cited_urls.len() - citations.len(),
            "extracted answer facts"
        );

        Extraction {
            mentions,
            citations,
            sentiment,
        }
    }

    fn mention_fact(
        &self,
        slug: String,
        name: &str,
        answer_sentences: &[String],
        total_word_count: usize,
    ) -> MentionFact {
        let expansions = self
            .cache
            .get(&slug)
            .expect("expansion cache built from the same closed profile set");
        let target = BrandTarget {
            name,
            slug: &slug,
            expansions,
        };

        let mut matched: Vec<MentionSentence> = Vec::new();
        let mut best_confidence = 0.0_f64;
        let mut first_method = None;

        for (index, sentence) in answer_sentences.iter().enumerate() {
            if let Some(hit) = self.matcher.match_sentence(sentence, &target) {
                if first_method.is_none() {
                    first_method = Some(hit.method);
                }
                best_confidence = best_confidence.max(hit.confidence);
                matched.push(MentionSentence {
                    text: sentence.clone(),
                    position: index + 1,
                    word_count: count_words(sentence),
                });
            }
        }

        if matched.is_empty() {
            return MentionFact::miss(slug, total_word_count, answer_sentences.len());
        }

        MentionFact {
            brand_slug: slug,
            detected: true,
            confidence: best_confidence,
            method: first_method,
            first_position: matched.first().map(|s| s.position),
            mention_count: matched.len(),
            sentences: matched,
            total_word_count,
            total_sentence_count: answer_sentences.len(),
        }
    }
}
