//! Web-search strategy.
//!
//! At most two queries per platform: the full `name platform address`
//! query, then a cleaned-name query with a guessed city.

use regex::Regex;
use std::sync::Arc;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{debug, warn};

use crate::clients::{OrganicResult, WebSearch};
use crate::domain::Platform;

fn legal_suffix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)[\s,]+(?:ltd|limited|inc|llc|plc|corp|co)\.?\s*$")
            .expect("Invalid regex pattern defined in code")
    })
}

fn word_separators() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\s,&/\-]+").expect("Invalid regex pattern defined in code"))
}

/// Business name with any subtitle after ` - `, ` | ` or `: ` removed and
/// trailing legal suffixes stripped.
#[must_use]
pub fn clean_business_name(name: &str) -> String {
    let mut cleaned = name.trim();
    for separator in [" - ", " | ", ": "] {
        if let Some((head, _)) = cleaned.split_once(separator) {
            if !head.trim().is_empty() {
                cleaned = head.trim();
            }
        }
    }

    let mut cleaned = cleaned.to_string();
    loop {
        let next = legal_suffix().replace(&cleaned, "").into_owned();
        if next == cleaned || next.trim().is_empty() {
            break;
        }
        cleaned = next;
    }
    cleaned.trim().to_string()
}

#[must_use]
pub fn location_tokens(address: Option<&str>) -> Vec<String> {
    address
        .unwrap_or("")
        .split(|c: char| c == ',' || c.is_whitespace())
        .map(|t| t.trim().to_lowercase())
        .filter(|t| t.chars().count() > 2)
        .collect()
}

#[must_use]
pub fn search_name_tokens(name: &str) -> Vec<String> {
    let cleaned = clean_business_name(name).to_lowercase();
    word_separators()
        .split(&cleaned)
        .filter(|t| t.chars().count() > 2)
        .map(str::to_string)
        .collect()
}

/// First comma-separated address segment that looks like a town name.
#[must_use]
pub fn guess_city(address: Option<&str>) -> Option<String> {
    address?
        .split(',')
        .map(str::trim)
        .find(|seg| seg.chars().count() > 3 && !seg.chars().any(|c| c.is_ascii_digit()))
        .map(str::to_string)
}

fn strip_query(link: &str) -> String {
    let end = link.find(['?', '#']).unwrap_or(link.len());
    link[..end].to_string()
}

/// Picks the first eligible result pointing at one of the platform's
/// profile domains.
#[must_use]
pub fn pick_result(
    results: &[OrganicResult],
    platform: Platform,
    location_tokens: &[String],
    name_tokens: &[String],
) -> Option<String> {
    let domains = platform.search_domains();

    results.iter().find_map(|result| {
        let link = result.link.to_lowercase();
        let title = result.title.to_lowercase();
        let snippet = result.snippet.to_lowercase();
        let mentions = |token: &String| {
            link.contains(token.as_str())
                || title.contains(token.as_str())
                || snippet.contains(token.as_str())
        };

        let location_match = location_tokens.is_empty() || location_tokens.iter().any(mentions);
        let name_match = name_tokens.iter().any(mentions);
        if !location_match && !name_match {
            return None;
        }

        let on_platform = domains.iter().any(|d| link.contains(d)) && !link.contains("/search");
        on_platform.then(|| strip_query(&result.link))
    })
}

pub struct SearchResolver {
    provider: Option<Arc<dyn WebSearch>>,
    timeout: Duration,
    warned_missing: AtomicBool,
}

impl SearchResolver {
    #[must_use]
    pub fn new(provider: Option<Arc<dyn WebSearch>>, timeout: Duration) -> Self {
        Self {
            provider,
            timeout,
            warned_missing: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    async fn run_query(&self, provider: &dyn WebSearch, query: &str) -> Vec<OrganicResult> {
        match provider.search(query, self.timeout).await {
            Ok(results) => results,
            Err(e) => {
                debug!(provider = provider.name(), query = %query, error = %e, "Search failed");
                Vec::new()
            }
        }
    }

    /// Candidate profile URL for `platform`, or `None`.
    pub async fn find(
        &self,
        business_name: &str,
        platform: Platform,
        address: Option<&str>,
    ) -> Option<String> {
        let Some(provider) = self.provider.as_deref() else {
            if !self.warned_missing.swap(true, Ordering::Relaxed) {
                warn!("No search API key configured, web search strategy disabled");
            }
            return None;
        };

        let address = address.map(str::trim).filter(|a| !a.is_empty());
        let locations = location_tokens(address);
        let names = search_name_tokens(business_name);

        let primary = match address {
            Some(addr) => format!("{} {} {addr}", business_name.trim(), platform.key()),
            None => format!("{} {}", business_name.trim(), platform.key()),
        };

        let results = self.run_query(provider, &primary).await;
        if let Some(url) = pick_result(&results, platform, &locations, &names) {
            debug!(platform = %platform, url = %url, "Search found candidate");
            return Some(url);
        }

        let mut fallback = format!("{} {}", clean_business_name(business_name), platform.key());
        if let Some(city) = guess_city(address) {
            fallback.push(' ');
            fallback.push_str(&city);
        }

        let results = self.run_query(provider, &fallback).await;
        let found = pick_result(&results, platform, &locations, &names);
        if let Some(url) = &found {
            debug!(platform = %platform, url = %url, "Fallback search found candidate");
        }
        found
    }
}
