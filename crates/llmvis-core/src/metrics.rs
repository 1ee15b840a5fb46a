//! Aggregated metric rows: the output of the aggregation engine.
//!
//! Rows are rebuilt deterministically from the full fact set every time
//! aggregation runs; they are never patched incrementally.

use serde::{Deserialize, Serialize};

/// Aggregation grouping key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Overall,
    Platform,
    Topic,
    Persona,
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scope::Overall => write!(f, "overall"),
            Scope::Platform => write!(f, "platform"),
            Scope::Topic => write!(f, "topic"),
            Scope::Persona => write!(f, "persona"),
        }
    }
}

/// Dense 1-based rank per metric within a scope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricRanks {
    pub visibility: usize,
    pub share_of_voice: usize,
    pub avg_position: usize,
    pub depth_of_mention: usize,
    pub citation_share: usize,
    pub sentiment: usize,
}

/// Signed rank delta per metric versus a previous aggregation run.
///
/// Positive means the brand moved up. All zero when no previous run was
/// supplied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricRankChanges {
    pub visibility: i64,
    pub share_of_voice: i64,
    pub avg_position: i64,
    pub depth_of_mention: i64,
    pub citation_share: i64,
    pub sentiment: i64,
}

/// One aggregated row per (scope, scope value, brand).
///
/// All scores are on a `[0, 100]` scale. Share of voice sums to ~100
/// across brands in a scope when any brand has mentions. Sentiment is
/// mapped from mean polarity via `(p + 1) / 2 * 100`, so 50 is neutral;
/// a brand with no detected answers reports 0 across the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedMetric {
    pub brand_slug: String,
    pub visibility_score: f64,
    /// 95% binomial-proportion confidence interval for visibility,
    /// as `(low, high)` on the same 0-100 scale.
    pub visibility_ci: (f64, f64),
    pub share_of_voice: f64,
    /// Mean first-mention sentence position over detected answers
    /// (1-based, lower is better); 0 when never detected.
    pub avg_position: f64,
    pub depth_of_mention: f64,
    pub citation_share: f64,
    pub sentiment_score: f64,
    /// Raw counts backing the scores, kept for tie-breaks and display.
    pub answers_detected: usize,
    pub mention_count: usize,
    pub ranks: MetricRanks,
    pub rank_changes: MetricRankChanges,
}

impl AggregatedMetric {
    /// A zero row for a brand with no qualifying data in the scope.
    #[must_use]
    pub fn zero(brand_slug: String) -> Self {
        Self {
            brand_slug,
            visibility_score: 0.0,
            visibility_ci: (0.0, 0.0),
            share_of_voice: 0.0,
            avg_position: 0.0,
            depth_of_mention: 0.0,
            citation_share: 0.0,
            sentiment_score: 0.0,
            answers_detected: 0,
            mention_count: 0,
            ranks: MetricRanks::default(),
            rank_changes: MetricRankChanges::default(),
        }
    }
}

/// The full result of aggregating one scope.
///
/// `low_sample` and `high_variance` are data-quality signals for
/// consumers, not errors; a flagged scope still carries its rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScopeSummary {
    pub scope: Scope,
    pub scope_value: String,
    pub answer_count: usize,
    pub citation_count: usize,
    pub low_sample: bool,
    pub high_variance: bool,
    /// Largest coefficient of variation observed across the six metrics.
    pub max_cv: f64,
    pub rows: Vec<AggregatedMetric>,
}
