use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::{EntryShape, Platform};

/// Where an entry's link came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoundVia {
    Website,
    Search,
    Ai,
    Constructed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maps_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_url: Option<String>,

    #[serde(default)]
    pub verified: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub found_via: Option<FoundVia>,
}

impl PlatformEntry {
    /// Entry for a URL that passed the checks its source requires.
    #[must_use]
    pub fn verified(platform: Platform, url: &str, found_via: FoundVia) -> Self {
        let (profile_url, review_url) = match platform.entry_shape() {
            EntryShape::Profile => (url.to_string(), None),
            EntryShape::ProfileWithReviews => {
                let base = url.strip_suffix('/').unwrap_or(url);
                (url.to_string(), Some(format!("{base}/reviews")))
            }
            EntryShape::ProfileIsReview => (url.to_string(), Some(url.to_string())),
        };

        Self {
            profile_url: Some(profile_url),
            review_url,
            verified: true,
            found_via: Some(found_via),
            ..Self::default()
        }
    }

    /// Informational search-page link. Never claims to be a profile.
    #[must_use]
    pub fn search_fallback(search_url: String, note: String) -> Self {
        Self {
            search_url: Some(search_url),
            note: Some(note),
            verified: false,
            ..Self::default()
        }
    }
}

/// Resolution result: platform key to entry. Absent keys mean nothing was
/// found or the platform was not eligible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SocialMediaLinks(BTreeMap<Platform, PlatformEntry>);

impl SocialMediaLinks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, platform: Platform, entry: PlatformEntry) {
        self.0.insert(platform, entry);
    }

    #[must_use]
    pub fn get(&self, platform: Platform) -> Option<&PlatformEntry> {
        self.0.get(&platform)
    }

    #[must_use]
    pub fn contains(&self, platform: Platform) -> bool {
        self.0.contains_key(&platform)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn verified_count(&self) -> usize {
        self.0.values().filter(|e| e.verified).count()
    }
}
