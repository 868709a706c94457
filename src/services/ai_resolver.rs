//! Generative-model fallback, tried only after web search came up empty.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::clients::TextGenerator;
use crate::constants::ai::{NOT_FOUND_SENTINEL, TRUSTPILOT_URL_SHAPE};
use crate::domain::Platform;
use crate::services::verification::Verifier;

#[must_use]
pub fn build_prompt(
    business_name: &str,
    platform: Platform,
    address: Option<&str>,
    website: Option<&str>,
) -> String {
    let label = platform.label();
    let mut prompt = format!(
        "Find the exact {label} review/profile URL for this business:\nBusiness Name: {business_name}\n"
    );
    if let Some(address) = address.filter(|a| !a.trim().is_empty()) {
        prompt.push_str(&format!("Address: {address}\n"));
    }
    if let Some(website) = website.filter(|w| !w.trim().is_empty()) {
        prompt.push_str(&format!("Website: {website}\n"));
    }
    prompt.push_str(&format!(
        "\nInstructions:\n\
         - Search for their official {label} page\n\
         - Return ONLY the direct {label} review/profile URL\n"
    ));
    if platform == Platform::Trustpilot {
        prompt.push_str(&format!("- It should be in the format: {TRUSTPILOT_URL_SHAPE}\n"));
    }
    prompt.push_str(&format!(
        "- If you cannot find a verified page, return \"{NOT_FOUND_SENTINEL}\"\n\
         - Do not guess or make up URLs\n\
         - Verify the business actually has a {label} presence\n\
         \nResponse format: Just the URL or \"{NOT_FOUND_SENTINEL}\""
    ));
    prompt
}

/// A completion is usable only if it is a bare `http...` answer.
#[must_use]
pub fn accept_completion(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() || text == NOT_FOUND_SENTINEL || !text.starts_with("http") {
        return None;
    }
    Some(text.to_string())
}

pub struct AiResolver {
    /// Tried in order until one yields a usable URL.
    providers: Vec<Arc<dyn TextGenerator>>,
    timeout: Duration,
}

impl AiResolver {
    #[must_use]
    pub fn new(providers: Vec<Arc<dyn TextGenerator>>, timeout: Duration) -> Self {
        Self { providers, timeout }
    }

    #[must_use]
    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    async fn ask(&self, prompt: &str) -> Option<String> {
        for provider in &self.providers {
            match provider.complete(prompt, self.timeout).await {
                Ok(Some(text)) => {
                    if let Some(url) = accept_completion(&text) {
                        info!(provider = provider.name(), url = %url, "AI suggested URL");
                        return Some(url);
                    }
                    debug!(provider = provider.name(), "AI answer not usable");
                }
                Ok(None) => debug!(provider = provider.name(), "AI returned no text"),
                Err(e) => debug!(provider = provider.name(), error = %e, "AI request failed"),
            }
        }
        None
    }

    /// Suggested URL that is at least reachable, or `None`.
    pub async fn find(
        &self,
        verifier: &Verifier,
        business_name: &str,
        platform: Platform,
        address: Option<&str>,
        website: Option<&str>,
    ) -> Option<String> {
        if self.providers.is_empty() {
            return None;
        }

        let prompt = build_prompt(business_name, platform, address, website);
        let url = self.ask(&prompt).await?;

        if verifier.exists(&url).await {
            Some(url)
        } else {
            debug!(platform = %platform, url = %url, "AI suggestion unreachable, discarded");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::HttpFetcher;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Canned {
        answer: anyhow::Result<Option<String>>,
        calls: AtomicUsize,
    }

    impl Canned {
        fn new(answer: anyhow::Result<Option<String>>) -> Arc<Self> {
            Arc::new(Self {
                answer,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl TextGenerator for Canned {
        fn name(&self) -> &'static str {
            "canned"
        }

        async fn complete(&self, _prompt: &str, _timeout: Duration) -> anyhow::Result<Option<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.answer {
                Ok(text) => Ok(text.clone()),
                Err(e) => Err(anyhow::anyhow!("{e}")),
            }
        }
    }

    #[test]
    fn test_accept_completion() {
        assert_eq!(
            accept_completion(" https://x.com/bluemoon\n").as_deref(),
            Some("https://x.com/bluemoon")
        );
        assert!(accept_completion("NOT_FOUND").is_none());
        assert!(accept_completion("").is_none());
        assert!(accept_completion("Sure! https://x.com/bluemoon").is_none());
    }

    #[test]
    fn test_prompt_mentions_context() {
        let prompt = build_prompt(
            "Blue Moon",
            Platform::Trustpilot,
            Some("Leeds"),
            Some("https://bluemoon.co.uk"),
        );
        assert!(prompt.contains("Trustpilot"));
        assert!(prompt.contains("Address: Leeds"));
        assert!(prompt.contains("Website: https://bluemoon.co.uk"));
        assert!(prompt.contains("NOT_FOUND"));
        assert!(prompt.contains("https://www.trustpilot.com/review/"));

        let bare = build_prompt("Blue Moon", Platform::Facebook, None, Some("  "));
        assert!(!bare.contains("Address:"));
        assert!(!bare.contains("Website:"));
        assert!(!bare.contains("trustpilot.com/review/"));
    }

    #[tokio::test]
    async fn test_secondary_used_when_primary_unusable() {
        let primary = Canned::new(Ok(Some("NOT_FOUND".to_string())));
        let secondary = Canned::new(Ok(Some("https://example.invalid/x".to_string())));
        let resolver = AiResolver::new(
            vec![primary.clone() as Arc<dyn TextGenerator>, secondary.clone()],
            Duration::from_secs(1),
        );

        assert_eq!(
            resolver.ask("prompt").await.as_deref(),
            Some("https://example.invalid/x")
        );
        assert_eq!(primary.calls.load(Ordering::SeqCst), 1);
        assert_eq!(secondary.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unreachable_suggestion_is_discarded() {
        let provider = Canned::new(Ok(Some("http://127.0.0.1:9/nothing".to_string())));
        let resolver = AiResolver::new(vec![provider as Arc<dyn TextGenerator>], Duration::from_secs(1));
        let verifier = Verifier::new(
            HttpFetcher::new("test-agent").unwrap(),
            Duration::from_secs(1),
            Duration::from_secs(1),
        );

        let found = resolver
            .find(&verifier, "Blue Moon", Platform::Facebook, None, None)
            .await;
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_no_providers_is_silent() {
        let resolver = AiResolver::new(vec![], Duration::from_secs(1));
        assert!(resolver.provider_names().is_empty());
        let failing = Canned::new(Err(anyhow::anyhow!("boom")));
        let resolver_with_error = AiResolver::new(vec![failing as Arc<dyn TextGenerator>], Duration::from_secs(1));
        assert!(resolver_with_error.ask("prompt").await.is_none());
    }
}
