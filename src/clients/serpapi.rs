use anyhow::{Result, bail};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::{OrganicResult, WebSearch};

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    organic_results: Vec<OrganicResult>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Clone)]
pub struct SerpApiClient {
    client: Client,
    api_key: String,
    base_url: String,
    engine: String,
}

impl SerpApiClient {
    #[must_use]
    pub fn new(client: Client, api_key: String, base_url: String, engine: String) -> Self {
        Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            engine,
        }
    }

    fn search_url(&self, query: &str) -> Result<Url> {
        let mut url = Url::parse(&format!("{}/search.json", self.base_url))?;
        url.query_pairs_mut()
            .append_pair("engine", &self.engine)
            .append_pair("q", query)
            .append_pair("api_key", &self.api_key);
        Ok(url)
    }
}

#[async_trait]
impl WebSearch for SerpApiClient {
    fn name(&self) -> &'static str {
        "serpapi"
    }

    async fn search(&self, query: &str, timeout: Duration) -> Result<Vec<OrganicResult>> {
        let url = self.search_url(query)?;

        debug!(query = %query, "Querying SerpAPI");

        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;
        let status = response.status();
        if !status.is_success() {
            bail!("SerpAPI returned HTTP {status}");
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(reqwest::Error::without_url)?;
        if let Some(error) = body.error {
            bail!("SerpAPI error: {error}");
        }

        Ok(body.organic_results)
    }
}
