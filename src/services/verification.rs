//! Reachability and content-relevance checks.
//!
//! A candidate is only ever marked verified after [`Verifier::verify`]
//! returned true for the exact URL being stored.

use regex::Regex;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::debug;

use crate::clients::HttpFetcher;
use crate::constants::relevance::{CONTENT_MATCH_THRESHOLD, URL_MATCH_THRESHOLD};

const STOP_WORDS: &[&str] = &["the", "and", "for"];

fn trailing_suffix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\s+(?:ltd|limited|inc|llc|plc|restaurant|cafe|bar|pub|hotel|grill|house)\.?\s*$")
            .expect("Invalid regex pattern defined in code")
    })
}

fn token_separators() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\s,&\-]+").expect("Invalid regex pattern defined in code"))
}

/// Significant lower-cased tokens of a business name.
#[must_use]
pub fn name_tokens(business_name: &str) -> Vec<String> {
    let lowered = business_name.trim().to_lowercase();
    let stripped = trailing_suffix().replace(&lowered, "");

    token_separators()
        .split(&stripped)
        .filter(|t| t.chars().count() >= 3 && !STOP_WORDS.contains(t))
        .map(str::to_string)
        .collect()
}

/// Fraction of name tokens found in the page body and in the URL.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelevanceScore {
    pub content_ratio: f64,
    pub url_ratio: f64,
}

impl RelevanceScore {
    #[must_use]
    pub fn passes(&self) -> bool {
        self.content_ratio >= CONTENT_MATCH_THRESHOLD || self.url_ratio >= URL_MATCH_THRESHOLD
    }
}

/// Scores `body` and `url` against the name. `None` when the name has no
/// significant tokens, which counts as a failed check.
#[must_use]
pub fn score_relevance(business_name: &str, url: &str, body: &str) -> Option<RelevanceScore> {
    let tokens = name_tokens(business_name);
    if tokens.is_empty() {
        return None;
    }

    let body = body.to_lowercase();
    let url = url.to_lowercase();
    #[allow(clippy::cast_precision_loss)]
    let total = tokens.len() as f64;
    #[allow(clippy::cast_precision_loss)]
    let ratio = |haystack: &str| {
        tokens.iter().filter(|t| haystack.contains(t.as_str())).count() as f64 / total
    };

    Some(RelevanceScore {
        content_ratio: ratio(&body),
        url_ratio: ratio(&url),
    })
}

#[derive(Clone)]
pub struct Verifier {
    http: HttpFetcher,
    existence_timeout: Duration,
    relevance_timeout: Duration,
}

impl Verifier {
    #[must_use]
    pub const fn new(
        http: HttpFetcher,
        existence_timeout: Duration,
        relevance_timeout: Duration,
    ) -> Self {
        Self {
            http,
            existence_timeout,
            relevance_timeout,
        }
    }

    /// Any final status in [200, 400) counts as reachable.
    pub async fn exists(&self, url: &str) -> bool {
        match self.http.probe(url, self.existence_timeout).await {
            Ok(status) => {
                let ok = (200..400).contains(&status);
                debug!(url = %url, status, reachable = ok, "Existence check");
                ok
            }
            Err(e) => {
                debug!(url = %url, error = %e, "Existence check failed");
                false
            }
        }
    }

    pub async fn is_relevant(&self, url: &str, business_name: &str) -> bool {
        let page = match self.http.get(url, self.relevance_timeout).await {
            Ok(page) if page.is_success() => page,
            Ok(page) => {
                debug!(url = %url, status = page.status, "Relevance fetch returned non-success");
                return false;
            }
            Err(e) => {
                debug!(url = %url, error = %e, "Relevance fetch failed");
                return false;
            }
        };

        let Some(score) = score_relevance(business_name, url, &page.body) else {
            debug!(business = %business_name, "No significant name tokens, relevance fails");
            return false;
        };

        debug!(
            url = %url,
            content_ratio = score.content_ratio,
            url_ratio = score.url_ratio,
            "Relevance check"
        );
        score.passes()
    }

    /// Existence, then relevance. The relevance fetch is skipped when the
    /// URL is unreachable.
    pub async fn verify(&self, url: &str, business_name: &str) -> bool {
        if !self.exists(url).await {
            return false;
        }
        self.is_relevant(url, business_name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, http::StatusCode, routing::get};

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn verifier() -> Verifier {
        Verifier::new(
            HttpFetcher::new("test-agent").unwrap(),
            Duration::from_secs(2),
            Duration::from_secs(2),
        )
    }

    #[test]
    fn test_name_tokens_strip_suffix_and_stop_words() {
        assert_eq!(name_tokens("Blue Moon Cafe"), vec!["blue", "moon"]);
        assert_eq!(name_tokens("The Fish & Chip Co-op Ltd"), vec!["fish", "chip"]);
        assert!(name_tokens("The Bar").is_empty());
    }

    #[test]
    fn test_content_threshold() {
        let half = score_relevance("Blue Moon Cafe", "https://example.com/x", "<p>Blue skies</p>")
            .unwrap();
        assert!((half.content_ratio - 0.5).abs() < f64::EPSILON);
        assert!(!half.passes());

        let full = score_relevance(
            "Blue Moon Cafe",
            "https://example.com/x",
            "<p>Blue skies over the moon</p>",
        )
        .unwrap();
        assert!((full.content_ratio - 1.0).abs() < f64::EPSILON);
        assert!(full.passes());
    }

    #[test]
    fn test_url_match_alone_passes() {
        let score = score_relevance(
            "Blue Moon Cafe",
            "https://facebook.com/BlueMoonLeeds",
            "<html>login wall</html>",
        )
        .unwrap();
        assert!((score.content_ratio).abs() < f64::EPSILON);
        assert!(score.passes());
    }

    #[test]
    fn test_no_tokens_fails() {
        assert!(score_relevance("The Bar", "https://x.test", "the bar").is_none());
    }

    #[tokio::test]
    async fn test_existence_follows_redirects_and_falls_back_to_get() {
        let app = Router::new()
            .route("/ok", get(|| async { "ok" }))
            .route(
                "/moved",
                get(|| async { axum::response::Redirect::permanent("/ok") }),
            )
            .route("/missing", get(|| async { StatusCode::NOT_FOUND }))
            .route(
                "/get-only",
                get(|| async { "fine" }).head(|| async { StatusCode::METHOD_NOT_ALLOWED }),
            );
        let base = serve(app).await;
        let v = verifier();

        assert!(v.exists(&format!("{base}/ok")).await);
        assert!(v.exists(&format!("{base}/moved")).await);
        assert!(!v.exists(&format!("{base}/missing")).await);
        assert!(v.exists(&format!("{base}/get-only")).await);
        assert!(!v.exists("http://127.0.0.1:9/unreachable").await);
    }

    #[tokio::test]
    async fn test_verify_requires_relevant_content() {
        let app = Router::new()
            .route("/blue", get(|| async { "<h1>Blue Moon Plumbing</h1>" }))
            .route("/other", get(|| async { "<h1>Somebody else</h1>" }));
        let base = serve(app).await;
        let v = verifier();

        assert!(v.verify(&format!("{base}/blue"), "Blue Moon Plumbing Ltd").await);
        assert!(!v.verify(&format!("{base}/other"), "Blue Moon Plumbing Ltd").await);
    }
}
