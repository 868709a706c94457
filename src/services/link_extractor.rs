//! On-site link discovery.
//!
//! Fetches the business's own website and picks, per platform, the first
//! anchor that satisfies the platform's [`LinkRule`].

use regex::Regex;
use scraper::{Html, Selector};
use std::collections::{BTreeMap, HashSet};
use std::sync::OnceLock;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use crate::clients::HttpFetcher;
use crate::domain::{LinkRule, LinkShaping, Platform};

/// Candidate URLs found on the business website, one per platform at most.
pub type ScrapedLinks = BTreeMap<Platform, String>;

fn with_scheme(link: &str) -> String {
    if link.starts_with("http") {
        link.to_string()
    } else {
        format!("https://{}", link.trim_start_matches('/'))
    }
}

fn strip_query(link: &str) -> &str {
    let end = link.find(['?', '#']).unwrap_or(link.len());
    &link[..end]
}

fn regional_linkedin() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^https?://(?:[a-z]{2}\.|www\.)?linkedin\.com/")
            .expect("Invalid regex pattern defined in code")
    })
}

/// Canonical `https://www.linkedin.com/...` form of a LinkedIn link.
///
/// Idempotent: feeding the output back in returns it unchanged.
#[must_use]
pub fn normalize_linkedin(link: &str) -> Option<String> {
    let cleaned = with_scheme(strip_query(link.trim()));
    let mut cleaned = regional_linkedin()
        .replace(&cleaned, "https://www.linkedin.com/")
        .into_owned();

    if (cleaned.contains("/in/") || cleaned.contains("/company/")) && cleaned.ends_with('/') {
        cleaned.pop();
    }

    Url::parse(&cleaned).ok().map(String::from)
}

fn shape(link: &str, rule: LinkRule) -> Option<String> {
    match rule.shaping {
        LinkShaping::Resolved => Url::parse(&with_scheme(link)).ok().map(String::from),
        LinkShaping::Channel => {
            let is_channel = ["/channel/", "/c/", "/user/", "/@"]
                .iter()
                .any(|marker| link.contains(marker));
            if !is_channel {
                return None;
            }
            Url::parse(&with_scheme(link)).ok().map(String::from)
        }
        LinkShaping::StripQuery => {
            let raw = with_scheme(link);
            match Url::parse(&raw) {
                Ok(url) => {
                    let full = format!("{}{}", url.origin().ascii_serialization(), url.path());
                    Some(full.strip_suffix('/').unwrap_or(&full).to_string())
                }
                // Keep the link even when it does not parse.
                Err(_) => Some(raw),
            }
        }
        LinkShaping::LinkedIn => normalize_linkedin(link),
    }
}

/// Lower-cased anchor targets in document order, deduplicated.
#[must_use]
pub fn collect_links(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("a[href]").expect("Invalid selector defined in code");

    let mut seen = HashSet::new();
    document
        .select(&selector)
        .filter_map(|el| el.value().attr("href"))
        .map(|href| href.trim().to_lowercase())
        .filter(|href| !href.is_empty())
        .filter(|href| seen.insert(href.clone()))
        .collect()
}

/// Applies every platform's link rule to the anchors of `html`.
#[must_use]
pub fn extract_from_html(html: &str) -> ScrapedLinks {
    let links = collect_links(html);
    let mut found = ScrapedLinks::new();

    for platform in Platform::ALL {
        let Some(rule) = platform.link_rule() else {
            continue;
        };

        let candidate = links
            .iter()
            .filter(|link| rule.patterns.iter().any(|p| link.contains(p)))
            .find_map(|link| shape(link, rule));

        if let Some(url) = candidate {
            debug!(platform = %platform, url = %url, "Found link on website");
            found.insert(platform, url);
        }
    }

    found
}

#[derive(Clone)]
pub struct LinkExtractor {
    http: HttpFetcher,
}

impl LinkExtractor {
    #[must_use]
    pub const fn new(http: HttpFetcher) -> Self {
        Self { http }
    }

    /// Scrapes `website`. Fetch errors and non-2xx responses yield an empty
    /// result.
    pub async fn extract(&self, website: &str, timeout: Duration) -> ScrapedLinks {
        let url = with_scheme(website.trim());

        let page = match self.http.get(&url, timeout).await {
            Ok(page) => page,
            Err(e) => {
                debug!(url = %url, error = %e, "Website fetch failed");
                return ScrapedLinks::new();
            }
        };

        if !page.is_success() {
            debug!(url = %url, status = page.status, "Website returned non-success status");
            return ScrapedLinks::new();
        }

        let found = extract_from_html(&page.body);
        info!(url = %url, count = found.len(), "Scraped website for profile links");
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facebook_link_is_stripped() {
        let html = r#"<a href="https://facebook.com/bluemoonplumbing/?ref=footer#top">FB</a>"#;
        let found = extract_from_html(html);
        assert_eq!(
            found.get(&Platform::Facebook).map(String::as_str),
            Some("https://facebook.com/bluemoonplumbing")
        );
    }

    #[test]
    fn test_first_match_wins_per_platform() {
        let html = r#"
            <a href="https://instagram.com/first">1</a>
            <a href="https://instagram.com/second">2</a>
            <a href="https://INSTAGRAM.com/first">dup</a>
        "#;
        let found = extract_from_html(html);
        assert_eq!(
            found.get(&Platform::Instagram).map(String::as_str),
            Some("https://instagram.com/first")
        );
        assert_eq!(collect_links(html).len(), 2);
    }

    #[test]
    fn test_youtube_requires_channel() {
        let html = r#"
            <a href="https://www.youtube.com/watch?v=abc">video</a>
            <a href="https://www.youtube.com/@bluemoon">channel</a>
        "#;
        let found = extract_from_html(html);
        assert_eq!(
            found.get(&Platform::Youtube).map(String::as_str),
            Some("https://www.youtube.com/@bluemoon")
        );

        let only_video = extract_from_html(r#"<a href="https://youtu.be/abc">v</a>"#);
        assert!(!only_video.contains_key(&Platform::Youtube));
    }

    #[test]
    fn test_schemeless_links_get_https() {
        let html = r#"<a href="twitter.com/bluemoon">X</a><a href="//www.tiktok.com/@bluemoon">T</a>"#;
        let found = extract_from_html(html);
        assert_eq!(
            found.get(&Platform::Twitter).map(String::as_str),
            Some("https://twitter.com/bluemoon")
        );
        assert_eq!(
            found.get(&Platform::Tiktok).map(String::as_str),
            Some("https://www.tiktok.com/@bluemoon")
        );
    }

    #[test]
    fn test_directory_links() {
        let html = r#"
            <a href="https://uk.trustpilot.com/review/bluemoon.co.uk">TP</a>
            <a href="https://www.checkatrade.com/trades/bluemoonplumbing">CaT</a>
            <a href="https://www.yell.com/biz/blue-moon-leeds-123/">Yell</a>
            <a href="https://www.trustpilot.com/categories">not a review</a>
        "#;
        let found = extract_from_html(html);
        assert_eq!(
            found.get(&Platform::Trustpilot).map(String::as_str),
            Some("https://uk.trustpilot.com/review/bluemoon.co.uk")
        );
        assert!(found.contains_key(&Platform::Checkatrade));
        assert!(found.contains_key(&Platform::Yell));
        assert!(!found.contains_key(&Platform::Tripadvisor));
    }

    #[test]
    fn test_linkedin_normalization_is_idempotent() {
        let regional = normalize_linkedin("https://de.linkedin.com/company/acme/").unwrap();
        let canonical = normalize_linkedin("https://www.linkedin.com/company/acme").unwrap();
        assert_eq!(regional, "https://www.linkedin.com/company/acme");
        assert_eq!(regional, canonical);
        assert_eq!(normalize_linkedin(&canonical).unwrap(), canonical);

        let bare = normalize_linkedin("linkedin.com/in/jane-doe/?trk=x").unwrap();
        assert_eq!(bare, "https://www.linkedin.com/in/jane-doe");
    }

    #[test]
    fn test_unrelated_page_yields_nothing() {
        let found = extract_from_html(r#"<a href="/contact">Contact</a><a href="mailto:a@b.c">m</a>"#);
        assert!(found.is_empty());
    }
}
