//! Per-scope aggregation of extracted answer facts.
//!
//! Consumes the immutable per-answer fact rows produced by
//! `llmvis-extract` and computes per-brand statistics for one scope at a
//! time: visibility, share of voice, average position, depth of mention,
//! citation share, and sentiment, with small-sample smoothing,
//! confidence intervals, and deterministic dense ranking. Aggregation is
//! a read-only reduction: re-running on the same facts yields
//! bit-identical rows.

pub mod aggregate;
pub mod rank;
pub mod stats;

pub use aggregate::Aggregator;
