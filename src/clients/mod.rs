//! Outbound HTTP collaborators.
//!
//! Every call takes an explicit timeout. Callers treat any `Err` as
//! "no result" for that stage.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub mod gemini;
pub mod http;
pub mod openai;
pub mod serpapi;

pub use gemini::GeminiClient;
pub use http::{FetchedPage, HttpFetcher};
pub use openai::OpenAiClient;
pub use serpapi::SerpApiClient;

/// One organic web-search hit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganicResult {
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub snippet: String,
}

#[async_trait]
pub trait WebSearch: Send + Sync {
    fn name(&self) -> &'static str;

    async fn search(&self, query: &str, timeout: Duration) -> anyhow::Result<Vec<OrganicResult>>;
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    fn name(&self) -> &'static str;

    /// Returns the trimmed completion text, or `None` when the model
    /// produced nothing.
    async fn complete(&self, prompt: &str, timeout: Duration) -> anyhow::Result<Option<String>>;
}
