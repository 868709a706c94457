//! Resolution orchestrator.
//!
//! Per request: cache check, website scrape, then every eligible platform
//! runs its own scrape → search → AI → verify pipeline concurrently. A
//! panicking platform is logged and dropped without affecting the others.

use async_trait::async_trait;
use futures::FutureExt;
use futures::future::join_all;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

use crate::clients::{
    GeminiClient, HttpFetcher, OpenAiClient, SerpApiClient, TextGenerator, WebSearch,
};
use crate::config::{Config, ResolverConfig};
use crate::db::Store;
use crate::domain::Platform;
use crate::models::{FoundVia, PlatformEntry, SocialMediaLinks};
use crate::services::ai_resolver::AiResolver;
use crate::services::cache_store::{CacheEntry, CacheStore, cache_key};
use crate::services::classifier::classify;
use crate::services::link_extractor::{LinkExtractor, ScrapedLinks};
use crate::services::resolution_service::{
    ResolutionService, ResolveError, ResolveOutcome, ResolveRequest, StrategyStatus,
};
use crate::services::search_resolver::SearchResolver;
use crate::services::settings_service::SettingsService;
use crate::services::verification::Verifier;

/// Google links are synthesized, never discovered or checked.
#[must_use]
pub fn google_entry(business_name: &str, address: Option<&str>, place_id: Option<&str>) -> PlatformEntry {
    let (review_url, maps_url) = match place_id.map(str::trim).filter(|p| !p.is_empty()) {
        Some(id) => {
            let id = urlencoding::encode(id);
            (
                format!("https://search.google.com/local/writereview?placeid={id}"),
                format!("https://www.google.com/maps/place/?q=place_id:{id}"),
            )
        }
        None => {
            let address = address.map(str::trim).filter(|a| !a.is_empty());
            let review_query = match address {
                Some(a) => format!("{business_name} reviews {a}"),
                None => format!("{business_name} reviews"),
            };
            let maps_query = match address {
                Some(a) => format!("{business_name} {a}"),
                None => business_name.to_string(),
            };
            (
                format!(
                    "https://www.google.com/search?q={}",
                    urlencoding::encode(&review_query)
                ),
                format!(
                    "https://www.google.com/maps/search/{}",
                    urlencoding::encode(&maps_query)
                ),
            )
        }
    };

    PlatformEntry {
        review_url: Some(review_url),
        maps_url: Some(maps_url),
        verified: false,
        found_via: Some(FoundVia::Constructed),
        ..PlatformEntry::default()
    }
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}

fn record_outcome(platform: Platform, outcome: &'static str) {
    metrics::counter!(
        "resolver_platform_outcomes_total",
        "platform" => platform.key(),
        "outcome" => outcome
    )
    .increment(1);
}

/// Inputs one platform pipeline needs, borrowed from the request.
struct Target<'a> {
    name: &'a str,
    address: Option<&'a str>,
    website: Option<&'a str>,
}

pub struct DefaultResolutionService {
    cache: CacheStore,
    settings: Arc<dyn SettingsService>,
    extractor: LinkExtractor,
    search: SearchResolver,
    ai: AiResolver,
    verifier: Verifier,
    config: ResolverConfig,
}

impl DefaultResolutionService {
    /// Wires the real search and AI clients from configuration, sharing
    /// `api_client` between them. Strategies without credentials are left
    /// disabled.
    pub fn from_config(
        config: &Config,
        store: Store,
        settings: Arc<dyn SettingsService>,
        api_client: &reqwest::Client,
    ) -> anyhow::Result<Self> {
        let search: Option<Arc<dyn WebSearch>> = config.search_api_key().map(|key| {
            Arc::new(SerpApiClient::new(
                api_client.clone(),
                key.to_string(),
                config.search.base_url.clone(),
                config.search.engine.clone(),
            )) as Arc<dyn WebSearch>
        });

        let mut ai: Vec<Arc<dyn TextGenerator>> = Vec::new();
        if let Some(key) = config.ai.openai_api_key.as_deref().filter(|k| !k.trim().is_empty()) {
            ai.push(Arc::new(OpenAiClient::new(
                api_client.clone(),
                key.to_string(),
                config.ai.openai_model.clone(),
                config.ai.openai_base_url.clone(),
            )));
        }
        if let Some(key) = config.ai.gemini_api_key.as_deref().filter(|k| !k.trim().is_empty()) {
            ai.push(Arc::new(GeminiClient::new(
                api_client.clone(),
                key.to_string(),
                config.ai.gemini_model.clone(),
                config.ai.gemini_base_url.clone(),
            )));
        }

        Self::with_providers(&config.resolver, store, settings, search, ai)
    }

    /// Same as [`Self::from_config`] but with explicit strategy providers.
    pub fn with_providers(
        config: &ResolverConfig,
        store: Store,
        settings: Arc<dyn SettingsService>,
        search: Option<Arc<dyn WebSearch>>,
        ai: Vec<Arc<dyn TextGenerator>>,
    ) -> anyhow::Result<Self> {
        let http = HttpFetcher::new(&config.user_agent)?;

        Ok(Self {
            cache: CacheStore::new(store),
            settings,
            extractor: LinkExtractor::new(http.clone()),
            search: SearchResolver::new(search, Duration::from_millis(config.search_timeout_ms)),
            ai: AiResolver::new(ai, Duration::from_millis(config.ai_timeout_ms)),
            verifier: Verifier::new(
                http,
                Duration::from_millis(config.existence_timeout_ms),
                Duration::from_millis(config.relevance_timeout_ms),
            ),
            config: config.clone(),
        })
    }

    /// One platform's pipeline. `None` means nothing verifiable was found.
    async fn resolve_platform(
        &self,
        platform: Platform,
        target: &Target<'_>,
        scraped: Option<&String>,
    ) -> Option<PlatformEntry> {
        if let Some(url) = scraped {
            if !platform.rechecks_scraped() {
                record_outcome(platform, "website");
                return Some(PlatformEntry::verified(platform, url, FoundVia::Website));
            }
            if self.verifier.is_relevant(url, target.name).await {
                record_outcome(platform, "website");
                return Some(PlatformEntry::verified(platform, url, FoundVia::Website));
            }
            debug!(platform = %platform, url = %url, "Scraped link failed relevance check");
        }

        let (candidate, via) = if let Some(url) = self
            .search
            .find(target.name, platform, target.address)
            .await
        {
            (url, FoundVia::Search)
        } else if let Some(url) = self
            .ai
            .find(&self.verifier, target.name, platform, target.address, target.website)
            .await
        {
            (url, FoundVia::Ai)
        } else {
            record_outcome(platform, "not_found");
            return None;
        };

        if self.verifier.verify(&candidate, target.name).await {
            record_outcome(platform, if via == FoundVia::Search { "search" } else { "ai" });
            Some(PlatformEntry::verified(platform, &candidate, via))
        } else {
            debug!(platform = %platform, url = %candidate, "Candidate failed verification");
            record_outcome(platform, "rejected");
            None
        }
    }

    async fn discover(
        &self,
        plan: &[Platform],
        target: &Target<'_>,
        scraped: &ScrapedLinks,
    ) -> Vec<(Platform, Option<PlatformEntry>)> {
        let tasks = plan.iter().map(|&platform| async move {
            let run = self.resolve_platform(platform, target, scraped.get(&platform));
            match AssertUnwindSafe(run).catch_unwind().await {
                Ok(entry) => (platform, entry),
                Err(_) => {
                    error!(platform = %platform, "Platform resolution panicked");
                    record_outcome(platform, "panic");
                    (platform, None)
                }
            }
        });

        join_all(tasks).await
    }
}

#[async_trait]
impl ResolutionService for DefaultResolutionService {
    async fn resolve(&self, request: ResolveRequest) -> Result<ResolveOutcome, ResolveError> {
        let name = request.business_name.trim();
        if name.is_empty() {
            return Err(ResolveError::MissingBusinessName);
        }

        let address = non_blank(request.address.as_ref());
        let website = non_blank(request.website.as_ref());
        let place_id = non_blank(request.place_id.as_ref());
        let category = classify(name, &request.category_tags);

        let caching_enabled = self.settings.caching_enabled().await;
        let key = cache_key(name, address, website);

        if caching_enabled && !request.skip_cache {
            if let Some(entry) = self.cache.get(&key).await {
                info!(business = %name, "Serving social links from cache");
                metrics::counter!("resolver_requests_total", "cached" => "true").increment(1);
                return Ok(ResolveOutcome {
                    data: entry.data,
                    cached: true,
                    category,
                    attempted: Vec::new(),
                });
            }
        }

        let start = Instant::now();
        let target = Target {
            name,
            address,
            website,
        };

        let scraped = match website {
            Some(site) => {
                self.extractor
                    .extract(site, Duration::from_millis(self.config.scrape_timeout_ms))
                    .await
            }
            None => ScrapedLinks::new(),
        };

        let plan = Platform::plan_for(category);
        let mut links = SocialMediaLinks::new();
        links.insert(Platform::Google, google_entry(name, address, place_id));

        for (platform, entry) in self.discover(&plan, &target, &scraped).await {
            match entry {
                Some(entry) => links.insert(platform, entry),
                None if self.config.include_search_fallbacks => {
                    if let Some((search_url, note)) = platform.search_fallback(name, address) {
                        links.insert(platform, PlatformEntry::search_fallback(search_url, note));
                    }
                }
                None => {}
            }
        }

        if caching_enabled {
            match CacheEntry::fresh(
                name,
                address,
                website,
                links.clone(),
                self.config.cache_ttl_days,
            ) {
                Some(entry) => self.cache.put(&entry).await,
                None => warn!(
                    ttl_days = self.config.cache_ttl_days,
                    "Cache expiry out of range, result not cached"
                ),
            }
        }

        metrics::counter!("resolver_requests_total", "cached" => "false").increment(1);
        metrics::histogram!("resolver_duration_seconds").record(start.elapsed().as_secs_f64());

        info!(
            business = %name,
            category = %category,
            attempted = plan.len(),
            verified = links.verified_count(),
            duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Resolved social links"
        );

        Ok(ResolveOutcome {
            data: links,
            cached: false,
            category,
            attempted: plan,
        })
    }

    async fn clear_cache(&self) -> u64 {
        let removed = self.cache.clear().await;
        info!(removed, "Cleared social media cache");
        removed
    }

    async fn purge_expired(&self) -> u64 {
        let removed = self.cache.purge_expired().await;
        info!(removed, "Purged expired social media cache entries");
        removed
    }

    fn strategies(&self) -> StrategyStatus {
        StrategyStatus {
            search_configured: self.search.is_configured(),
            ai_providers: self.ai.provider_names(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_google_entry_with_place_id() {
        let entry = google_entry("Blue Moon", Some("Leeds"), Some("ChIJ123"));
        assert_eq!(
            entry.review_url.as_deref(),
            Some("https://search.google.com/local/writereview?placeid=ChIJ123")
        );
        assert_eq!(
            entry.maps_url.as_deref(),
            Some("https://www.google.com/maps/place/?q=place_id:ChIJ123")
        );
        assert!(!entry.verified);
        assert_eq!(entry.found_via, Some(FoundVia::Constructed));
    }

    #[test]
    fn test_google_entry_without_place_id() {
        let entry = google_entry("Blue Moon Plumbing Ltd", None, None);
        assert_eq!(
            entry.review_url.as_deref(),
            Some("https://www.google.com/search?q=Blue%20Moon%20Plumbing%20Ltd%20reviews")
        );
        assert_eq!(
            entry.maps_url.as_deref(),
            Some("https://www.google.com/maps/search/Blue%20Moon%20Plumbing%20Ltd")
        );
        assert!(entry.profile_url.is_none());
    }
}
