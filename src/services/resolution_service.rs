//! Domain service for social presence resolution.
//!
//! Given a business name (plus optional address, website and place id),
//! finds profile and review URLs across the supported platforms.

use serde::Serialize;
use thiserror::Error;

use crate::domain::{BusinessCategory, Platform};
use crate::models::SocialMediaLinks;

/// Errors surfaced to callers of [`ResolutionService::resolve`].
///
/// Upstream and cache failures never appear here; they degrade to
/// "no result" inside the pipeline.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("businessName is required")]
    MissingBusinessName,

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Clone, Default)]
pub struct ResolveRequest {
    pub business_name: String,
    pub address: Option<String>,
    pub website: Option<String>,
    pub place_id: Option<String>,
    /// Skip the cache read. The result is still written back.
    pub skip_cache: bool,
    /// Category tags (e.g. place types) fed to the classifier.
    pub category_tags: Vec<String>,
}

impl ResolveRequest {
    #[must_use]
    pub fn new(business_name: impl Into<String>) -> Self {
        Self {
            business_name: business_name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    #[must_use]
    pub fn website(mut self, website: impl Into<String>) -> Self {
        self.website = Some(website.into());
        self
    }

    #[must_use]
    pub fn place_id(mut self, place_id: impl Into<String>) -> Self {
        self.place_id = Some(place_id.into());
        self
    }

    #[must_use]
    pub const fn skip_cache(mut self, skip: bool) -> Self {
        self.skip_cache = skip;
        self
    }

    #[must_use]
    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.category_tags = tags;
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ResolveOutcome {
    pub data: SocialMediaLinks,
    pub cached: bool,
    pub category: BusinessCategory,
    /// Platforms that went through discovery. Empty on a cache hit.
    pub attempted: Vec<Platform>,
}

/// Which discovery strategies have credentials.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyStatus {
    pub search_configured: bool,
    pub ai_providers: Vec<&'static str>,
}

#[async_trait::async_trait]
pub trait ResolutionService: Send + Sync {
    /// Runs one resolution request.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::MissingBusinessName`] for a blank name.
    /// Returns [`ResolveError::Internal`] only for unexpected failures.
    async fn resolve(&self, request: ResolveRequest) -> Result<ResolveOutcome, ResolveError>;

    /// Drops every cached resolution. Returns the number of rows removed.
    async fn clear_cache(&self) -> u64;

    /// Drops expired cached resolutions. Returns the number of rows removed.
    async fn purge_expired(&self) -> u64;

    fn strategies(&self) -> StrategyStatus;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let req = ResolveRequest::new("Blue Moon")
            .address("Leeds")
            .place_id("abc")
            .skip_cache(true);
        assert_eq!(req.business_name, "Blue Moon");
        assert_eq!(req.address.as_deref(), Some("Leeds"));
        assert!(req.website.is_none());
        assert!(req.skip_cache);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ResolveError::MissingBusinessName.to_string(),
            "businessName is required"
        );
    }
}
