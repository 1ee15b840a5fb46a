use super::*;

use llmvis_core::config::ExpanderConfig;
use llmvis_core::profile::{BrandProfile, BrandRole};

fn expansions(name: &str) -> BrandExpansions {
    let profile = BrandProfile {
        name: name.to_string(),
        role: BrandRole::Portfolio,
        domain: None,
    };
    BrandExpansions::generate(&profile, &ExpanderConfig::default())
}

fn run(matcher: &BrandMatcher, sentence: &str, name: &str) -> Option<BrandMatch> {
    let exp = expansions(name);
    let target = BrandTarget {
        name,
        slug: "test-brand",
        expansions: &exp,
    };
    matcher.match_sentence(sentence, &target)
}

fn default_matcher() -> BrandMatcher {
    BrandMatcher::new(&MatcherConfig::default())
}

#[test]
fn exact_match_full_name() {
    let matcher = default_matcher();
    let hit = run(
        &matcher,
        "The Acme Rewards Card offers solid cash back",
        "Acme Rewards Card",
    )
    .unwrap();
    assert_eq!(hit.method, MatchMethod::Exact);
    assert_eq!(hit.confidence, 1.0);
}

#[test]
fn exact_match_is_case_insensitive() {
    let matcher = default_matcher();
    let hit = run(&matcher, "try ACME REWARDS CARD today", "Acme Rewards Card").unwrap();
    assert_eq!(hit.method, MatchMethod::Exact);
}

#[test]
fn abbreviation_match_first_word() {
    let matcher = default_matcher();
    let hit = run(&matcher, "Acme is a solid choice", "Acme Rewards Card").unwrap();
    assert_eq!(hit.method, MatchMethod::Abbreviation);
    assert_eq!(hit.confidence, 0.85);
}

#[test]
fn abbreviation_match_acronym() {
    let matcher = default_matcher();
    let hit = run(&matcher, "many people prefer the ARC for travel", "Acme Rewards Card").unwrap();
    assert_eq!(hit.method, MatchMethod::Abbreviation);
}

#[test]
fn abbreviation_needs_word_boundary() {
    let matcher = default_matcher();
    // "arc" appears only inside "arcade"; "card" is too short for partial.
    assert!(run(&matcher, "the arcade was fun", "Acme Rewards Card").is_none());
}

#[test]
fn partial_match_long_significant_word() {
    let matcher = default_matcher();
    let hit = run(
        &matcher,
        "Their logistics arm is efficient",
        "Northwind Logistics",
    )
    .unwrap();
    assert_eq!(hit.method, MatchMethod::Partial);
    assert!(hit.confidence >= 0.6 && hit.confidence <= 0.75, "{}", hit.confidence);
}

#[test]
fn partial_skips_generic_words() {
    let mut config = MatcherConfig::default();
    config.generic_words = vec!["logistics".to_string()];
    let matcher = BrandMatcher::new(&config);
    assert!(run(
        &matcher,
        "Their logistics arm is efficient",
        "Northwind Logistics"
    )
    .is_none());
}

#[test]
fn partial_skips_short_words() {
    let matcher = default_matcher();
    // "card" (4 chars) is below the default partial minimum of 5.
    assert!(run(&matcher, "pick any card you like", "Acme Rewards Card").is_none());
}

#[test]
fn fuzzy_match_near_miss_spelling() {
    let matcher = default_matcher();
    let hit = run(&matcher, "Northwnd ships everywhere", "Northwind Logistics").unwrap();
    assert_eq!(hit.method, MatchMethod::Fuzzy);
    assert!(hit.confidence > 0.0 && hit.confidence <= 0.59, "{}", hit.confidence);
}

#[test]
fn fuzzy_window_is_bounded() {
    let matcher = default_matcher();
    // The misspelling sits past the default 8-word window.
    let sentence = "one two three four five six seven eight Northwnd ships";
    assert!(run(&matcher, sentence, "Northwind Logistics").is_none());
}

#[test]
fn miss_yields_none() {
    let matcher = default_matcher();
    assert!(run(&matcher, "completely unrelated sentence", "Acme Rewards Card").is_none());
    assert!(run(&matcher, "", "Acme Rewards Card").is_none());
}

#[test]
fn confidence_ordering_across_strategies() {
    let matcher = default_matcher();
    let exact = run(&matcher, "Acme Rewards Card is fine", "Acme Rewards Card").unwrap();
    let abbr = run(&matcher, "Acme is fine", "Acme Rewards Card").unwrap();
    let partial = run(
        &matcher,
        "Their logistics arm is fine",
        "Northwind Logistics",
    )
    .unwrap();
    let fuzzy = run(&matcher, "Northwnd ships everywhere", "Northwind Logistics").unwrap();

    assert!(exact.confidence > abbr.confidence);
    assert!(abbr.confidence > partial.confidence);
    assert!(partial.confidence > fuzzy.confidence);
}

#[test]
fn levenshtein_known_distances() {
    assert_eq!(levenshtein("", ""), 0);
    assert_eq!(levenshtein("abc", "abc"), 0);
    assert_eq!(levenshtein("abc", ""), 3);
    assert_eq!(levenshtein("kitten", "sitting"), 3);
}

#[test]
fn similarity_early_exit_on_length_ratio() {
    assert!(similarity("ab", "abcdefgh").is_none());
    assert!(similarity("", "").is_none());
    let sim = similarity("northwind", "northwnd").unwrap();
    assert!(sim > 0.8, "{sim}");
}

#[test]
fn word_boundary_helper() {
    assert!(contains_word_boundary("the acme card", "acme"));
    assert!(contains_word_boundary("acme!", "acme"));
    assert!(contains_word_boundary("(acme) is good", "acme"));
    assert!(!contains_word_boundary("acmecorp is good", "acme"));
    assert!(!contains_word_boundary("macme is good", "acme"));
}
