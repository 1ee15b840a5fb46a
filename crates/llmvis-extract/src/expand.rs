//! Brand-name expansion: abbreviations and domain variants.
//!
//! Generated from the display name alone, with no brand-specific lookup
//! table. Expansions are computed once per profile per analysis and
//! shared read-only across extraction workers via [`ExpansionCache`].

use std::collections::BTreeMap;

use llmvis_core::config::ExpanderConfig;
use llmvis_core::profile::{BrandProfile, ProfileSet};

const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u'];

/// The derived matching surface for one brand.
#[derive(Debug, Clone)]
pub struct BrandExpansions {
    /// Display-name words minus articles, prepositions, and corporate
    /// suffixes; lowercase, order preserved.
    pub significant_words: Vec<String>,
    /// Deduplicated abbreviation forms: acronym, syllable prefixes,
    /// first-word forms, letter+word combinations.
    pub abbreviations: Vec<String>,
    /// Separator-joined name forms used for domain contains/fuzzy checks.
    pub base_forms: Vec<String>,
    /// Candidate hostnames (base forms and abbreviations crossed with
    /// generic TLDs and the `www.` prefix), capped in size. The profile's
    /// known domain always leads.
    pub domain_variants: Vec<String>,
}

impl BrandExpansions {
    /// Generate expansions for one profile.
    #[must_use]
    pub fn generate(profile: &BrandProfile, config: &ExpanderConfig) -> Self {
        let words = significant_words(&profile.name, &config.stop_words);
        let abbreviations = abbreviation_forms(&words);
        let base_forms = base_forms(&profile.name, &abbreviations);
        let domain_variants = domain_variants(profile, &base_forms, config);

        Self {
            significant_words: words,
            abbreviations,
            base_forms,
            domain_variants,
        }
    }
}

fn significant_words(name: &str, stop_words: &[String]) -> Vec<String> {
    name.to_lowercase()
        .split_whitespace()
        .map(|w| {
            w.trim_matches(|c: char| !c.is_ascii_alphanumeric())
                .to_string()
        })
        .filter(|w| !w.is_empty() && !stop_words.iter().any(|s| s == w))
        .collect()
}

fn abbreviation_forms(words: &[String]) -> Vec<String> {
    let mut forms: Vec<String> = Vec::new();
    let mut push = |form: String| {
        if form.len() >= 2 && !forms.contains(&form) {
            forms.push(form);
        }
    };

    // Acronym of significant-word initials.
    if words.len() >= 2 {
        push(words.iter().filter_map(|w| w.chars().next()).collect());
    }

    // Syllable prefixes per word.
    for word in words {
        if let Some(prefix) = syllable_prefix(word) {
            push(prefix);
        }
        if word.len() > 4 {
            push(word.chars().take(4).collect());
        }
    }

    // First-word and first-two-word forms.
    if let Some(first) = words.first() {
        push(first.clone());
        if let Some(second) = words.get(1) {
            push(format!("{first}{second}"));
            // First letter + second word, e.g. "amex"-style contractions.
            if let Some(initial) = first.chars().next() {
                push(format!("{initial}{second}"));
            }
        }
    }

    forms
}

/// First 2–4 characters of a word, cut where a vowel is followed by a
/// consonant. Returns `None` for words too short to shorten.
fn syllable_prefix(word: &str) -> Option<String> {
    let chars: Vec<char> = word.chars().collect();
    if chars.len() <= 2 {
        return None;
    }

    for cut in 2..=4.min(chars.len() - 1) {
        if VOWELS.contains(&chars[cut - 1]) && !VOWELS.contains(&chars[cut]) {
            return Some(chars[..cut].iter().collect());
        }
    }
    // No vowel boundary in range: fall back to a fixed three-char prefix.
    if chars.len() > 3 {
        Some(chars[..3].iter().collect())
    } else {
        None
    }
}

fn base_forms(name: &str, abbreviations: &[String]) -> Vec<String> {
    let lower = name.to_lowercase();
    let cleaned: String = lower
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect();
    let joined_words: Vec<&str> = cleaned.split_whitespace().collect();

    let mut forms: Vec<String> = Vec::new();
    for separator in ["", "-", ".", "_"] {
        let form = joined_words.join(separator);
        if form.len() >= 2 && !forms.contains(&form) {
            forms.push(form);
        }
    }
    for abbr in abbreviations {
        if !forms.contains(abbr) {
            forms.push(abbr.clone());
        }
    }
    forms
}

fn domain_variants(
    profile: &BrandProfile,
    base_forms: &[String],
    config: &ExpanderConfig,
) -> Vec<String> {
    let mut variants: Vec<String> = Vec::new();
    let mut push = |variant: String| {
        if !variants.contains(&variant) && variants.len() < config.max_domain_variants {
            variants.push(variant);
        }
    };

    // A user-supplied domain is authoritative and always leads.
    if let Some(domain) = &profile.domain {
        let host = domain
            .to_lowercase()
            .trim_start_matches("www.")
            .to_string();
        push(host.clone());
        push(format!("www.{host}"));
    }

    for base in base_forms {
        // Dotted forms make implausible hostnames and two-letter forms
        // collide with real unrelated domains.
        if base.contains('.') || base.len() < 3 {
            continue;
        }
        for tld in &config.tlds {
            push(format!("{base}.{tld}"));
            push(format!("www.{base}.{tld}"));
        }
    }

    variants
}

/// Read-only expansion cache for the closed profile set of one analysis.
///
/// Populated once up front; never invalidated mid-analysis.
#[derive(Debug, Clone)]
pub struct ExpansionCache {
    by_slug: BTreeMap<String, BrandExpansions>,
}

impl ExpansionCache {
    /// Compute every profile's expansions once.
    #[must_use]
    pub fn for_profiles(profiles: &ProfileSet, config: &ExpanderConfig) -> Self {
        let by_slug = profiles
            .iter()
            .map(|p| (p.slug(), BrandExpansions::generate(p, config)))
            .collect();
        Self { by_slug }
    }

    /// Expansions for a slug; `None` only for slugs outside the closed set.
    #[must_use]
    pub fn get(&self, slug: &str) -> Option<&BrandExpansions> {
        self.by_slug.get(slug)
    }
}
