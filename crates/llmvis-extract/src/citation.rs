//! Cited-URL classification: brand-owned, earned, or social media.

use llmvis_core::config::CitationConfig;
use llmvis_core::facts::CitationFact;
use llmvis_core::profile::ProfileSet;
use url::Url;

use crate::expand::ExpansionCache;
use crate::matcher::similarity;

/// Classify one cited URL against the closed brand set.
///
/// Returns `None` for malformed or non-http(s) URLs; invalid citations
/// are dropped before classification, never stored as zero-confidence
/// facts. Brand attribution only ever names a profile whose own variant
/// set matched the domain.
#[must_use]
pub fn classify_citation(
    raw_url: &str,
    profiles: &ProfileSet,
    cache: &ExpansionCache,
    config: &CitationConfig,
) -> Option<CitationFact> {
    let cleaned = clean_url(raw_url)?;
    let parsed = Url::parse(&cleaned).ok()?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return None;
    }
    let host = normalize_host(parsed.host_str()?);
    let path = parsed.path().to_lowercase();

    // 1. Brand-owned check, best score across the closed set wins.
    if let Some((slug, confidence)) = best_brand_match(&host, profiles, cache, config) {
        let profile = profiles
            .get(&slug)
            .expect("brand match came from the closed profile set");
        return Some(CitationFact::brand_owned(cleaned, host, profile, confidence));
    }

    let attributed = attributed_token(&host, &path, profiles, cache);

    // 2. Social platform check.
    if is_social_host(&host, &config.social_domains) {
        return Some(CitationFact::social(
            cleaned,
            host,
            attributed,
            config.social_confidence,
        ));
    }

    // 3. Earned media: keyword families, then the default bucket.
    let confidence = if family_matches(&host, &path, &config.news_keywords) {
        config.news_confidence
    } else if family_matches(&host, &path, &config.review_keywords) {
        config.review_confidence
    } else if family_matches(&host, &path, &config.industry_keywords) {
        config.industry_confidence
    } else {
        config.earned_baseline_confidence
    };
    Some(CitationFact::earned(cleaned, host, attributed, confidence))
}

/// Strip wrapping punctuation a model tends to leave around pasted URLs.
fn clean_url(raw: &str) -> Option<String> {
    let cleaned = raw
        .trim()
        .trim_start_matches(|c: char| matches!(c, '(' | '[' | '<' | '"' | '\''))
        .trim_end_matches(|c: char| matches!(c, ')' | ']' | '>' | '"' | '\'' | '.' | ',' | ';'));
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}

/// Lowercase the host and drop `www.` / mobile prefixes.
fn normalize_host(host: &str) -> String {
    let lower = host.to_lowercase();
    lower
        .strip_prefix("www.")
        .or_else(|| lower.strip_prefix("m."))
        .unwrap_or(&lower)
        .to_string()
}

fn best_brand_match(
    host: &str,
    profiles: &ProfileSet,
    cache: &ExpansionCache,
    config: &CitationConfig,
) -> Option<(String, f64)> {
    let host_label = host.split('.').next().unwrap_or(host);
    let mut best: Option<(String, f64)> = None;

    for profile in profiles {
        let slug = profile.slug();
        let exp = cache
            .get(&slug)
            .expect("expansion cache built from the same closed profile set");

        let mut score = 0.0_f64;

        if exp.domain_variants.iter().any(|v| v == host) {
            score = config.brand_exact_confidence;
        } else {
            for form in &exp.base_forms {
                if form.len() < config.brand_variant_min_len || form.contains('.') {
                    continue;
                }
                if host.starts_with(form) {
                    score = score.max(config.brand_variant_confidence);
                } else if host.contains(form) {
                    score = score.max(config.brand_variant_confidence - 0.1);
                }
            }
            if score == 0.0 {
                for form in &exp.base_forms {
                    if form.contains('.') {
                        continue;
                    }
                    if let Some(sim) = similarity(host_label, form) {
                        if sim >= config.brand_fuzzy_threshold {
                            let span = 1.0 - config.brand_fuzzy_threshold;
                            let scaled = 0.7 + 0.15 * (sim - config.brand_fuzzy_threshold) / span;
                            score = score.max(scaled);
                        }
                    }
                }
            }
        }

        if score > 0.0 && best.as_ref().map_or(true, |(_, b)| score > *b) {
            best = Some((slug, score));
        }
    }

    best
}

/// Membership in the social-domain list, tolerating regional or other
/// extra subdomains (`uk.linkedin.com`, `old.reddit.com`).
fn is_social_host(host: &str, social_domains: &[String]) -> bool {
    if social_domains.iter().any(|d| d == host) {
        return true;
    }
    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() >= 3 {
        let registrable = labels[labels.len() - 2..].join(".");
        return social_domains.iter().any(|d| *d == registrable);
    }
    false
}

/// Attribute an earned/social citation to a brand whose abbreviation
/// appears as a whole token of the host or path, else `None`.
fn attributed_token(
    host: &str,
    path: &str,
    profiles: &ProfileSet,
    cache: &ExpansionCache,
) -> Option<String> {
    let tokens: Vec<&str> = host
        .split(|c: char| !c.is_ascii_alphanumeric())
        .chain(path.split(|c: char| !c.is_ascii_alphanumeric()))
        .filter(|t| !t.is_empty())
        .collect();

    for profile in profiles {
        let slug = profile.slug();
        let exp = cache
            .get(&slug)
            .expect("expansion cache built from the same closed profile set");
        let hit = exp
            .abbreviations
            .iter()
            .filter(|a| a.len() >= 4)
            .any(|a| tokens.iter().any(|t| t == a));
        if hit {
            return Some(slug);
        }
    }
    None
}

fn family_matches(host: &str, path: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|kw| {
        if kw.len() <= 3 {
            // Short keywords only count as whole tokens ("vs", "top10").
            host.split(|c: char| !c.is_ascii_alphanumeric())
                .chain(path.split(|c: char| !c.is_ascii_alphanumeric()))
                .any(|t| t == kw)
        } else {
            host.contains(kw.as_str()) || path.contains(kw.as_str())
        }
    })
}
