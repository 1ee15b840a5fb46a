//! Brand profiles and the closed per-analysis profile set.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Whether a profile is the user's own brand or a tracked competitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrandRole {
    Portfolio,
    Competitor,
}

impl std::fmt::Display for BrandRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BrandRole::Portfolio => write!(f, "portfolio"),
            BrandRole::Competitor => write!(f, "competitor"),
        }
    }
}

/// One entity under analysis: the user's brand or a selected competitor.
///
/// Immutable for the duration of an analysis. The set of profiles is fixed
/// before any extraction runs; answers can only be attributed to profiles
/// in that set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandProfile {
    pub name: String,
    pub role: BrandRole,
    /// Known canonical domain, e.g. `acme.com`, when the user supplied one.
    pub domain: Option<String>,
}

impl BrandProfile {
    /// Generate a URL-safe slug from the brand name.
    #[must_use]
    pub fn slug(&self) -> String {
        self.name
            .to_lowercase()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' {
                    c
                } else if c == ' ' {
                    '-'
                } else {
                    '\0'
                }
            })
            .filter(|&c| c != '\0')
            .collect::<String>()
            .split('-')
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("-")
    }
}

/// The closed, validated set of brand profiles for one analysis.
///
/// Profiles keep their input order; lookups go by slug. Once constructed
/// the set never changes, which is what lets expansion caches and citation
/// attribution stay read-only across concurrent extraction workers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileSet {
    profiles: Vec<BrandProfile>,
}

impl ProfileSet {
    /// Build and validate the closed profile set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` when the set is empty, a name is
    /// blank, or two profiles collide on name or slug.
    pub fn new(profiles: Vec<BrandProfile>) -> Result<Self, ConfigError> {
        if profiles.is_empty() {
            return Err(ConfigError::Validation(
                "analysis requires at least one brand profile".to_string(),
            ));
        }

        let mut seen_names = HashSet::new();
        let mut seen_slugs = HashSet::new();

        for profile in &profiles {
            if profile.name.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "brand name must be non-empty".to_string(),
                ));
            }

            let lower_name = profile.name.to_lowercase();
            if !seen_names.insert(lower_name) {
                return Err(ConfigError::Validation(format!(
                    "duplicate brand name: '{}'",
                    profile.name
                )));
            }

            let slug = profile.slug();
            if slug.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "brand '{}' yields an empty slug",
                    profile.name
                )));
            }
            if !seen_slugs.insert(slug.clone()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate brand slug: '{}' (from brand '{}')",
                    slug, profile.name
                )));
            }
        }

        Ok(Self { profiles })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BrandProfile> {
        self.profiles.iter()
    }

    /// Look up a profile by its slug.
    #[must_use]
    pub fn get(&self, slug: &str) -> Option<&BrandProfile> {
        self.profiles.iter().find(|p| p.slug() == slug)
    }

    /// Whether a slug belongs to the closed set.
    #[must_use]
    pub fn contains(&self, slug: &str) -> bool {
        self.get(slug).is_some()
    }

    /// Slugs in input order.
    #[must_use]
    pub fn slugs(&self) -> Vec<String> {
        self.profiles.iter().map(BrandProfile::slug).collect()
    }
}

impl<'a> IntoIterator for &'a ProfileSet {
    type Item = &'a BrandProfile;
    type IntoIter = std::slice::Iter<'a, BrandProfile>;

    fn into_iter(self) -> Self::IntoIter {
        self.profiles.iter()
    }
}

#[derive(Debug, Deserialize)]
struct ProfilesFile {
    profiles: Vec<BrandProfile>,
}

/// Load and validate the brand profiles for an analysis from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation.
pub fn load_profiles(path: &Path) -> Result<ProfileSet, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ProfilesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: ProfilesFile = serde_yaml::from_str(&content)?;
    ProfileSet::new(file.profiles)
}

#[cfg(test)]
#[path = "profile_test.rs"]
mod tests;
