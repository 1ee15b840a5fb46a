//! Per-answer metrics extraction.
//!
//! Turns one raw LLM answer plus its cited-URL list into structured
//! mention, citation, and sentiment facts for the closed brand set.
//! Everything here is a pure, synchronous function of its inputs:
//! no I/O, no randomness, safe to re-run for reproducibility audits.

pub mod citation;
pub mod expand;
pub mod extract;
pub mod matcher;
pub mod segment;
pub mod sentiment;

pub use citation::classify_citation;
pub use expand::{BrandExpansions, ExpansionCache};
pub use extract::{Extraction, MetricsExtractor};
pub use matcher::{BrandMatch, BrandMatcher, BrandTarget, MatchStrategy};
pub use segment::{count_words, sentences};
pub use sentiment::score_sentiment;
