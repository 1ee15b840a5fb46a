//! Scope aggregation: the read-only reduction from facts to metric rows.

use llmvis_core::config::AggregationConfig;
use llmvis_core::facts::{AnswerFacts, CitationType, MentionFact};
use llmvis_core::metrics::{
    AggregatedMetric, MetricRankChanges, MetricRanks, Scope, ScopeSummary,
};
use llmvis_core::profile::ProfileSet;

use crate::rank::{assign_ranks, Direction, RankEntry};
use crate::stats::{binomial_ci, coefficient_of_variation, mean, smooth_toward_prior};

/// Computes per-brand statistics for one scope at a time.
///
/// Each scope's computation is independent: the aggregator holds no
/// mutable state, so callers may run scopes in parallel and re-run any
/// scope idempotently.
pub struct Aggregator {
    config: AggregationConfig,
}

/// Per-brand running sums gathered in one pass over the scope's rows.
#[derive(Debug, Default)]
struct BrandAccumulator {
    detected_answers: usize,
    confidence_sum: f64,
    mention_count: usize,
    first_positions: Vec<f64>,
    depth_numerator: f64,
    polarities: Vec<f64>,
    citation_weight: f64,
}

impl Aggregator {
    #[must_use]
    pub fn new(config: AggregationConfig) -> Self {
        Self { config }
    }

    /// Aggregate one scope with no rank history.
    #[must_use]
    pub fn aggregate(
        &self,
        facts: &[AnswerFacts],
        scope: Scope,
        scope_value: &str,
        profiles: &ProfileSet,
    ) -> ScopeSummary {
        self.aggregate_with_previous(facts, scope, scope_value, profiles, &[])
    }

    /// Aggregate one scope, computing rank deltas against a previous run.
    ///
    /// The scope's rows are recomputed wholesale from `facts`; nothing is
    /// patched incrementally. Identical inputs yield bit-identical rows.
    ///
    /// # Panics
    ///
    /// Panics if a fact row violates the closed-set invariant (a mention
    /// or brand-owned citation naming a slug outside `profiles`). That is
    /// a programming error upstream, not recoverable data.
    #[must_use]
    pub fn aggregate_with_previous(
        &self,
        facts: &[AnswerFacts],
        scope: Scope,
        scope_value: &str,
        profiles: &ProfileSet,
        previous: &[AggregatedMetric],
    ) -> ScopeSummary {
        let rows: Vec<&AnswerFacts> = facts
            .iter()
            .filter(|f| in_scope(f, scope, scope_value))
            .collect();
        assert_closed_set(&rows, profiles);

        let answer_count = rows.len();
        let citation_count: usize = rows.iter().map(|r| r.citations.len()).sum();
        let slugs = profiles.slugs();
        #[allow(clippy::cast_precision_loss)]
        let equal_share_prior = 100.0 / slugs.len() as f64;

        let accumulators: Vec<BrandAccumulator> = slugs
            .iter()
            .map(|slug| self.accumulate(slug, &rows))
            .collect();

        let total_mentions: usize = accumulators.iter().map(|a| a.mention_count).sum();
        let total_citation_weight: f64 = rows
            .iter()
            .flat_map(|r| &r.citations)
            .map(|c| c.confidence * self.type_weight(c.citation_type))
            .sum();
        let total_word_count: usize = rows
            .iter()
            .filter_map(|r| r.mentions.first().map(|m| m.total_word_count))
            .sum();

        let mut metrics: Vec<AggregatedMetric> = slugs
            .iter()
            .zip(&accumulators)
            .map(|(slug, acc)| {
                self.brand_row(
                    slug.clone(),
                    acc,
                    answer_count,
                    citation_count,
                    total_mentions,
                    total_citation_weight,
                    total_word_count,
                    equal_share_prior,
                )
            })
            .collect();

        let max_cv = rank_and_flag(&mut metrics, previous);
        let low_sample = answer_count < self.config.min_sample_size;
        let high_variance = max_cv > self.config.cv_flag_threshold;

        if low_sample || high_variance {
            tracing::warn!(
                %scope,
                scope_value,
                answer_count,
                max_cv,
                low_sample,
                high_variance,
                "scope aggregated with data-quality flags"
            );
        } else {
            tracing::info!(%scope, scope_value, answer_count, citation_count, "scope aggregated");
        }

        ScopeSummary {
            scope,
            scope_value: scope_value.to_string(),
            answer_count,
            citation_count,
            low_sample,
            high_variance,
            max_cv,
            rows: metrics,
        }
    }

    fn accumulate(&self, slug: &str, rows: &[&AnswerFacts]) -> BrandAccumulator {
        let mut acc = BrandAccumulator::default();

        for row in rows {
            let Some(mention) = row.mentions.iter().find(|m| m.brand_slug == slug) else {
                continue;
            };
            acc.mention_count += mention.mention_count;

            if mention.detected && mention.confidence >= self.config.match_threshold {
                acc.detected_answers += 1;
                acc.confidence_sum += mention.confidence;
                if let Some(position) = mention.first_position {
                    #[allow(clippy::cast_precision_loss)]
                    acc.first_positions.push(position as f64);
                }
                acc.depth_numerator += depth_weight(mention);
                acc.polarities.push(row.sentiment.polarity);
            }

            for citation in &row.citations {
                if citation.attributed_brand.as_deref() == Some(slug) {
                    acc.citation_weight +=
                        citation.confidence * self.type_weight(citation.citation_type);
                }
            }
        }

        acc
    }

    #[allow(clippy::too_many_arguments)]
    fn brand_row(
        &self,
        slug: String,
        acc: &BrandAccumulator,
        answer_count: usize,
        citation_count: usize,
        total_mentions: usize,
        total_citation_weight: f64,
        total_word_count: usize,
        equal_share_prior: f64,
    ) -> AggregatedMetric {
        if answer_count == 0 {
            return AggregatedMetric::zero(slug);
        }
        #[allow(clippy::cast_precision_loss)]
        let answers = answer_count as f64;

        let raw_visibility = (acc.confidence_sum / answers * 100.0).clamp(0.0, 100.0);
        let visibility_score = smooth_toward_prior(
            raw_visibility,
            answer_count,
            self.config.min_sample_size,
            equal_share_prior,
        )
        .clamp(0.0, 100.0);
        let visibility_ci = binomial_ci(acc.confidence_sum / answers, answer_count);

        let share_of_voice = if total_mentions == 0 {
            0.0
        } else {
            #[allow(clippy::cast_precision_loss)]
            let share = acc.mention_count as f64 / total_mentions as f64 * 100.0;
            share
        };

        let avg_position = mean(&acc.first_positions);

        let depth_of_mention = if total_word_count == 0 {
            0.0
        } else {
            #[allow(clippy::cast_precision_loss)]
            let depth = acc.depth_numerator / total_word_count as f64 * 100.0;
            depth.clamp(0.0, 100.0)
        };

        let citation_share = if total_citation_weight <= 0.0 {
            0.0
        } else {
            let raw = (acc.citation_weight / total_citation_weight * 100.0).clamp(0.0, 100.0);
            smooth_toward_prior(
                raw,
                citation_count,
                self.config.min_citation_sample,
                equal_share_prior,
            )
            .clamp(0.0, 100.0)
        };

        let sentiment_score = if acc.polarities.is_empty() {
            0.0
        } else {
            ((mean(&acc.polarities) + 1.0) / 2.0 * 100.0).clamp(0.0, 100.0)
        };

        AggregatedMetric {
            brand_slug: slug,
            visibility_score,
            visibility_ci,
            share_of_voice,
            avg_position,
            depth_of_mention,
            citation_share,
            sentiment_score,
            answers_detected: acc.detected_answers,
            mention_count: acc.mention_count,
            ranks: MetricRanks::default(),
            rank_changes: MetricRankChanges::default(),
        }
    }

    fn type_weight(&self, citation_type: CitationType) -> f64 {
        match citation_type {
            CitationType::Brand => self.config.brand_citation_weight,
            CitationType::Earned => self.config.earned_citation_weight,
            CitationType::Social => self.config.social_citation_weight,
        }
    }
}

/// Assign every metric's ranks and rank deltas; returns the largest
/// coefficient of variation observed across the six metrics.
fn rank_and_flag(metrics: &mut [AggregatedMetric], previous: &[AggregatedMetric]) -> f64 {
    let mut max_cv = 0.0_f64;

    let metric_views: [(fn(&AggregatedMetric) -> f64, Direction); 6] = [
        (|m| m.visibility_score, Direction::Descending),
        (|m| m.share_of_voice, Direction::Descending),
        (|m| m.avg_position, Direction::Ascending),
        (|m| m.depth_of_mention, Direction::Descending),
        (|m| m.citation_share, Direction::Descending),
        (|m| m.sentiment_score, Direction::Descending),
    ];

    for (metric_index, (value_of, direction)) in metric_views.into_iter().enumerate() {
        let entries: Vec<RankEntry> = metrics
            .iter()
            .map(|m| RankEntry {
                slug: m.brand_slug.clone(),
                value: value_of(m),
                has_data: m.answers_detected > 0,
                mention_count: m.mention_count,
            })
            .collect();
        let ranks = assign_ranks(&entries, direction);

        let values: Vec<f64> = metrics.iter().map(value_of).collect();
        if let Some(cv) = coefficient_of_variation(&values) {
            max_cv = max_cv.max(cv);
        }

        for (metric, rank) in metrics.iter_mut().zip(ranks) {
            let slot = match metric_index {
                0 => &mut metric.ranks.visibility,
                1 => &mut metric.ranks.share_of_voice,
                2 => &mut metric.ranks.avg_position,
                3 => &mut metric.ranks.depth_of_mention,
                4 => &mut metric.ranks.citation_share,
                _ => &mut metric.ranks.sentiment,
            };
            *slot = rank;
        }
    }

    for metric in metrics.iter_mut() {
        if let Some(prev) = previous.iter().find(|p| p.brand_slug == metric.brand_slug) {
            metric.rank_changes = rank_deltas(&prev.ranks, &metric.ranks);
        }
    }

    max_cv
}

fn in_scope(facts: &AnswerFacts, scope: Scope, scope_value: &str) -> bool {
    match scope {
        Scope::Overall => true,
        Scope::Platform => facts.platform == scope_value,
        Scope::Topic => facts.topic == scope_value,
        Scope::Persona => facts.persona == scope_value,
    }
}

/// Exponential position decay: early, substantial mentions outweigh
/// late, token ones.
fn depth_weight(mention: &MentionFact) -> f64 {
    if mention.total_sentence_count == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let total = mention.total_sentence_count as f64;
    mention
        .sentences
        .iter()
        .map(|s| {
            #[allow(clippy::cast_precision_loss)]
            let weight = s.word_count as f64 * (-(s.position as f64) / total).exp();
            weight
        })
        .sum()
}

fn assert_closed_set(rows: &[&AnswerFacts], profiles: &ProfileSet) {
    for row in rows {
        for mention in &row.mentions {
            assert!(
                profiles.contains(&mention.brand_slug),
                "mention fact names unknown brand slug '{}'",
                mention.brand_slug
            );
        }
        for citation in &row.citations {
            if citation.citation_type == CitationType::Brand {
                let slug = citation
                    .attributed_brand
                    .as_deref()
                    .expect("brand-owned citation must carry an attribution");
                assert!(
                    profiles.contains(slug),
                    "brand-owned citation attributed outside the closed set: '{slug}'"
                );
            }
        }
    }
}

fn rank_deltas(previous: &MetricRanks, current: &MetricRanks) -> MetricRankChanges {
    #[allow(clippy::cast_possible_wrap)]
    fn delta(prev: usize, curr: usize) -> i64 {
        prev as i64 - curr as i64
    }
    MetricRankChanges {
        visibility: delta(previous.visibility, current.visibility),
        share_of_voice: delta(previous.share_of_voice, current.share_of_voice),
        avg_position: delta(previous.avg_position, current.avg_position),
        depth_of_mention: delta(previous.depth_of_mention, current.depth_of_mention),
        citation_share: delta(previous.citation_share, current.citation_share),
        sentiment: delta(previous.sentiment, current.sentiment),
    }
}

#[cfg(test)]
#[path = "aggregate_test.rs"]
mod tests;
