//! Core domain types for the LLM brand-visibility metrics engine.
//!
//! Holds the closed brand-profile set for an analysis, the immutable
//! engine configuration, the per-answer fact records produced by
//! extraction, and the aggregated metric rows produced by aggregation.
//! No I/O beyond loading the profile YAML file; extraction and
//! aggregation live in `llmvis-extract` and `llmvis-aggregate`.

pub mod answer;
pub mod config;
pub mod error;
pub mod facts;
pub mod metrics;
pub mod profile;

pub use answer::AnswerRecord;
pub use config::{
    AggregationConfig, CitationConfig, EngineConfig, ExpanderConfig, MatcherConfig,
};
pub use error::ConfigError;
pub use facts::{
    AnswerFacts, CitationFact, CitationType, MatchMethod, MentionFact, MentionSentence,
    SentimentFact,
};
pub use metrics::{
    AggregatedMetric, MetricRankChanges, MetricRanks, Scope, ScopeSummary,
};
pub use profile::{load_profiles, BrandProfile, BrandRole, ProfileSet};
