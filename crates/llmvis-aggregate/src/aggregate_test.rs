use super::*;

use llmvis_core::facts::{CitationFact, MatchMethod, MentionSentence, SentimentFact};
use llmvis_core::profile::{BrandProfile, BrandRole};
use uuid::Uuid;

fn profiles(names: &[&str]) -> ProfileSet {
    ProfileSet::new(
        names
            .iter()
            .map(|name| BrandProfile {
                name: (*name).to_string(),
                role: BrandRole::Competitor,
                domain: None,
            })
            .collect(),
    )
    .unwrap()
}

fn hit(slug: &str, confidence: f64, position: usize, word_count: usize) -> MentionFact {
    MentionFact {
        brand_slug: slug.to_string(),
        detected: true,
        confidence,
        method: Some(MatchMethod::Exact),
        first_position: Some(position),
        mention_count: 1,
        sentences: vec![MentionSentence {
            text: String::new(),
            position,
            word_count,
        }],
        total_word_count: 100,
        total_sentence_count: 10,
    }
}

fn miss(slug: &str) -> MentionFact {
    MentionFact::miss(slug.to_string(), 100, 10)
}

fn row(platform: &str, mentions: Vec<MentionFact>, polarity: f64) -> AnswerFacts {
    AnswerFacts {
        answer_id: Uuid::new_v4(),
        platform: platform.to_string(),
        topic: "general".to_string(),
        persona: "general".to_string(),
        mentions,
        citations: Vec::new(),
        sentiment: SentimentFact { polarity },
    }
}

fn aggregator() -> Aggregator {
    Aggregator::new(AggregationConfig::default())
}

#[test]
fn visibility_is_confidence_weighted_and_smoothed() {
    let set = profiles(&["Acme", "Zenith"]);
    let facts = vec![
        row("chatgpt", vec![hit("acme", 1.0, 1, 10), miss("zenith")], 0.0),
        row("chatgpt", vec![hit("acme", 0.85, 2, 8), miss("zenith")], 0.0),
        row("chatgpt", vec![miss("acme"), miss("zenith")], 0.0),
        row("chatgpt", vec![miss("acme"), miss("zenith")], 0.0),
    ];
    let summary = aggregator().aggregate(&facts, Scope::Overall, "overall", &set);

    // raw = (1.0 + 0.85) / 4 * 100 = 46.25, smoothed over the 20-answer
    // minimum with a 50% equal-share prior.
    let acme = &summary.rows[0];
    let expected = (46.25 * 4.0 + 50.0 * 16.0) / 20.0;
    assert!((acme.visibility_score - expected).abs() < 1e-9, "{}", acme.visibility_score);
    assert!(summary.low_sample);

    // An undetected brand in a small sample is pulled up from zero too.
    let zenith = &summary.rows[1];
    assert!((zenith.visibility_score - 40.0).abs() < 1e-9, "{}", zenith.visibility_score);
}

#[test]
fn small_sample_pulls_toward_prior_with_wide_interval() {
    let set = profiles(&["Acme", "Zenith"]);
    let facts = vec![
        row("chatgpt", vec![hit("acme", 1.0, 1, 10), miss("zenith")], 0.0),
        row("chatgpt", vec![hit("acme", 1.0, 1, 10), miss("zenith")], 0.0),
        row("chatgpt", vec![miss("acme"), miss("zenith")], 0.0),
    ];
    let summary = aggregator().aggregate(&facts, Scope::Overall, "overall", &set);

    let acme = &summary.rows[0];
    // Raw figure is 66.7%; the smoothed score sits well below it, near
    // the 50% prior.
    assert!((acme.visibility_score - 52.5).abs() < 0.1, "{}", acme.visibility_score);
    let (low, high) = acme.visibility_ci;
    assert!(high - low > 40.0, "interval ({low}, {high}) should be wide");
}

#[test]
fn full_sample_passes_raw_visibility_through() {
    let set = profiles(&["Acme", "Zenith"]);
    let mut facts = Vec::new();
    for _ in 0..10 {
        facts.push(row("chatgpt", vec![hit("acme", 1.0, 1, 10), miss("zenith")], 0.0));
    }
    for _ in 0..10 {
        facts.push(row("chatgpt", vec![miss("acme"), miss("zenith")], 0.0));
    }
    let summary = aggregator().aggregate(&facts, Scope::Overall, "overall", &set);
    assert!((summary.rows[0].visibility_score - 50.0).abs() < 1e-9);
    assert!(!summary.low_sample);
}

#[test]
fn share_of_voice_sums_to_100() {
    let set = profiles(&["Acme", "Zenith", "Nimbus"]);
    let facts = vec![
        row(
            "chatgpt",
            vec![hit("acme", 1.0, 1, 10), hit("zenith", 1.0, 2, 5), miss("nimbus")],
            0.0,
        ),
        row(
            "claude",
            vec![hit("acme", 1.0, 3, 7), miss("zenith"), miss("nimbus")],
            0.0,
        ),
    ];
    let summary = aggregator().aggregate(&facts, Scope::Overall, "overall", &set);
    let total: f64 = summary.rows.iter().map(|r| r.share_of_voice).sum();
    assert!((total - 100.0).abs() < 0.5, "{total}");
    assert!((summary.rows[0].share_of_voice - 200.0 / 3.0).abs() < 1e-9);
}

#[test]
fn single_brand_trivially_owns_share_of_voice() {
    let set = profiles(&["Acme"]);
    let facts = vec![row("chatgpt", vec![hit("acme", 1.0, 1, 10)], 0.0)];
    let summary = aggregator().aggregate(&facts, Scope::Overall, "overall", &set);
    assert_eq!(summary.rows[0].share_of_voice, 100.0);
}

#[test]
fn average_position_means_first_positions() {
    let set = profiles(&["Acme", "Zenith"]);
    let facts = vec![
        row("chatgpt", vec![hit("acme", 1.0, 2, 10), miss("zenith")], 0.0),
        row("chatgpt", vec![hit("acme", 1.0, 4, 10), miss("zenith")], 0.0),
    ];
    let summary = aggregator().aggregate(&facts, Scope::Overall, "overall", &set);
    assert!((summary.rows[0].avg_position - 3.0).abs() < 1e-9);
    assert_eq!(summary.rows[1].avg_position, 0.0);
}

#[test]
fn early_mentions_run_deeper_than_late_ones() {
    let set = profiles(&["Acme", "Zenith"]);
    // Equal word counts, opposite ends of a ten-sentence answer.
    let facts = vec![
        row("chatgpt", vec![hit("acme", 1.0, 1, 10), miss("zenith")], 0.0),
        row("chatgpt", vec![miss("acme"), hit("zenith", 1.0, 10, 10)], 0.0),
    ];
    let summary = aggregator().aggregate(&facts, Scope::Overall, "overall", &set);
    let acme = summary.rows[0].depth_of_mention;
    let zenith = summary.rows[1].depth_of_mention;
    assert!(acme > zenith, "acme {acme} should exceed zenith {zenith}");
    assert!(zenith > 0.0);
}

#[test]
fn citation_share_weights_by_type_and_confidence() {
    let set = profiles(&["Acme", "Zenith"]);
    let acme_profile = set.get("acme").unwrap().clone();

    let mut config = AggregationConfig::default();
    config.min_citation_sample = 1;

    let mut facts = vec![row("chatgpt", vec![hit("acme", 1.0, 1, 10), miss("zenith")], 0.0)];
    facts[0].citations = vec![
        CitationFact::brand_owned(
            "https://acme.com".to_string(),
            "acme.com".to_string(),
            &acme_profile,
            1.0,
        ),
        CitationFact::social(
            "https://reddit.com/r/acme".to_string(),
            "reddit.com".to_string(),
            Some("zenith".to_string()),
            1.0,
        ),
    ];

    let summary =
        Aggregator::new(config).aggregate(&facts, Scope::Overall, "overall", &set);
    // Brand weight 1.0 vs social weight 0.8 over a 1.8 total.
    assert!((summary.rows[0].citation_share - 100.0 / 1.8).abs() < 1e-9);
    assert!((summary.rows[1].citation_share - 80.0 / 1.8).abs() < 1e-9);
    let total: f64 = summary.rows.iter().map(|r| r.citation_share).sum();
    assert!((total - 100.0).abs() < 0.5);
}

#[test]
fn sparse_citations_get_smoothed() {
    let set = profiles(&["Acme", "Zenith"]);
    let acme_profile = set.get("acme").unwrap().clone();
    let mut facts = vec![row("chatgpt", vec![hit("acme", 1.0, 1, 10), miss("zenith")], 0.0)];
    facts[0].citations = vec![CitationFact::brand_owned(
        "https://acme.com".to_string(),
        "acme.com".to_string(),
        &acme_profile,
        1.0,
    )];

    let summary = aggregator().aggregate(&facts, Scope::Overall, "overall", &set);
    // One citation out of a 10-citation minimum: 90% of the weight goes
    // to the 50% prior.
    assert!((summary.rows[0].citation_share - 55.0).abs() < 1e-9);
    assert!((summary.rows[1].citation_share - 45.0).abs() < 1e-9);
}

#[test]
fn no_citations_means_zero_share_not_prior() {
    let set = profiles(&["Acme", "Zenith"]);
    let facts = vec![row("chatgpt", vec![hit("acme", 1.0, 1, 10), miss("zenith")], 0.0)];
    let summary = aggregator().aggregate(&facts, Scope::Overall, "overall", &set);
    assert_eq!(summary.rows[0].citation_share, 0.0);
    assert_eq!(summary.rows[1].citation_share, 0.0);
}

#[test]
fn sentiment_restricted_to_detected_answers() {
    let set = profiles(&["Acme", "Zenith"]);
    let facts = vec![
        row("chatgpt", vec![hit("acme", 1.0, 1, 10), miss("zenith")], 0.5),
        row("chatgpt", vec![miss("acme"), miss("zenith")], -0.9),
    ];
    let summary = aggregator().aggregate(&facts, Scope::Overall, "overall", &set);
    // Mean polarity 0.5 maps to 75 on the 0-100 scale; the -0.9 answer
    // never mentions Acme and is excluded.
    assert!((summary.rows[0].sentiment_score - 75.0).abs() < 1e-9);
    // Never-mentioned brand reports 0, not the neutral 50.
    assert_eq!(summary.rows[1].sentiment_score, 0.0);
}

#[test]
fn empty_scope_yields_zero_rows_never_nan() {
    let set = profiles(&["Acme", "Zenith", "Nimbus"]);
    let summary = aggregator().aggregate(&[], Scope::Platform, "chatgpt", &set);

    assert_eq!(summary.answer_count, 0);
    assert!(summary.low_sample);
    assert!(!summary.high_variance);
    for metric_row in &summary.rows {
        assert_eq!(metric_row.visibility_score, 0.0);
        assert_eq!(metric_row.visibility_ci, (0.0, 0.0));
        assert_eq!(metric_row.share_of_voice, 0.0);
        assert!(metric_row.depth_of_mention.is_finite());
    }
    // Ranks still form a deterministic permutation, broken by slug.
    let mut ranks: Vec<usize> = summary.rows.iter().map(|r| r.ranks.visibility).collect();
    ranks.sort_unstable();
    assert_eq!(ranks, vec![1, 2, 3]);
}

#[test]
fn ranks_form_a_permutation_per_metric() {
    let set = profiles(&["Acme", "Zenith", "Nimbus"]);
    let facts = vec![
        row(
            "chatgpt",
            vec![hit("acme", 1.0, 1, 10), hit("zenith", 0.85, 4, 5), miss("nimbus")],
            0.4,
        ),
        row(
            "chatgpt",
            vec![hit("acme", 1.0, 2, 8), miss("zenith"), hit("nimbus", 0.6, 7, 3)],
            -0.2,
        ),
    ];
    let summary = aggregator().aggregate(&facts, Scope::Overall, "overall", &set);

    let per_metric: [Vec<usize>; 6] = [
        summary.rows.iter().map(|r| r.ranks.visibility).collect(),
        summary.rows.iter().map(|r| r.ranks.share_of_voice).collect(),
        summary.rows.iter().map(|r| r.ranks.avg_position).collect(),
        summary.rows.iter().map(|r| r.ranks.depth_of_mention).collect(),
        summary.rows.iter().map(|r| r.ranks.citation_share).collect(),
        summary.rows.iter().map(|r| r.ranks.sentiment).collect(),
    ];
    for ranks in per_metric {
        let mut sorted = ranks.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![1, 2, 3], "ranks {ranks:?} not a permutation");
    }
    // Acme leads visibility; the position metric ranks ascending.
    assert_eq!(summary.rows[0].ranks.visibility, 1);
    assert_eq!(summary.rows[0].ranks.avg_position, 1);
    assert_eq!(summary.rows[1].ranks.avg_position, 2);
}

#[test]
fn rank_changes_against_previous_run() {
    let set = profiles(&["Acme", "Zenith"]);
    let before = vec![
        row("chatgpt", vec![hit("acme", 1.0, 1, 10), miss("zenith")], 0.0),
    ];
    let after = vec![
        row("chatgpt", vec![miss("acme"), hit("zenith", 1.0, 1, 10)], 0.0),
        row("chatgpt", vec![miss("acme"), hit("zenith", 1.0, 1, 10)], 0.0),
    ];

    let agg = aggregator();
    let first = agg.aggregate(&before, Scope::Overall, "overall", &set);
    assert!(first.rows.iter().all(|r| r.rank_changes == MetricRankChanges::default()));

    let second =
        agg.aggregate_with_previous(&after, Scope::Overall, "overall", &set, &first.rows);
    let zenith = &second.rows[1];
    assert_eq!(zenith.ranks.visibility, 1);
    // Moved from rank 2 to rank 1: positive delta means improvement.
    assert_eq!(zenith.rank_changes.visibility, 1);
    assert_eq!(second.rows[0].rank_changes.visibility, -1);
}

#[test]
fn scope_filtering_selects_matching_rows() {
    let set = profiles(&["Acme"]);
    let facts = vec![
        row("chatgpt", vec![hit("acme", 1.0, 1, 10)], 0.0),
        row("claude", vec![miss("acme")], 0.0),
        row("claude", vec![miss("acme")], 0.0),
    ];
    let agg = aggregator();

    let overall = agg.aggregate(&facts, Scope::Overall, "overall", &set);
    assert_eq!(overall.answer_count, 3);

    let chatgpt = agg.aggregate(&facts, Scope::Platform, "chatgpt", &set);
    assert_eq!(chatgpt.answer_count, 1);
    assert_eq!(chatgpt.rows[0].answers_detected, 1);

    let gemini = agg.aggregate(&facts, Scope::Platform, "gemini", &set);
    assert_eq!(gemini.answer_count, 0);
}

#[test]
fn lopsided_scope_flags_high_variance() {
    let set = profiles(&["Acme", "Zenith", "Nimbus"]);
    let facts = vec![row(
        "chatgpt",
        vec![hit("acme", 1.0, 1, 10), miss("zenith"), miss("nimbus")],
        0.0,
    )];
    let summary = aggregator().aggregate(&facts, Scope::Overall, "overall", &set);
    // Share of voice is 100/0/0: coefficient of variation sqrt(2) > 1.
    assert!(summary.high_variance);
    assert!(summary.max_cv > 1.0);
}

#[test]
fn aggregation_is_bit_identical_across_runs() {
    let set = profiles(&["Acme", "Zenith"]);
    let facts = vec![
        row("chatgpt", vec![hit("acme", 0.85, 3, 12), hit("zenith", 1.0, 1, 9)], 0.3),
        row("claude", vec![miss("acme"), hit("zenith", 0.6, 5, 4)], -0.1),
    ];
    let agg = aggregator();
    let first = agg.aggregate(&facts, Scope::Overall, "overall", &set);
    let second = agg.aggregate(&facts, Scope::Overall, "overall", &set);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
#[should_panic(expected = "unknown brand slug")]
fn unknown_mention_slug_fails_loudly() {
    let set = profiles(&["Acme"]);
    let facts = vec![row("chatgpt", vec![hit("ghost", 1.0, 1, 10)], 0.0)];
    let _ = aggregator().aggregate(&facts, Scope::Overall, "overall", &set);
}

#[test]
#[should_panic(expected = "outside the closed set")]
fn brand_citation_outside_closed_set_fails_loudly() {
    let set = profiles(&["Acme"]);
    let mut facts = vec![row("chatgpt", vec![hit("acme", 1.0, 1, 10)], 0.0)];
    facts[0].citations = vec![CitationFact {
        url: "https://ghost.com".to_string(),
        domain: "ghost.com".to_string(),
        citation_type: CitationType::Brand,
        attributed_brand: Some("ghost".to_string()),
        confidence: 0.95,
    }];
    let _ = aggregator().aggregate(&facts, Scope::Overall, "overall", &set);
}
