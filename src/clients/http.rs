use anyhow::Result;
use reqwest::{Client, Method, StatusCode};
use std::time::Duration;
use tracing::debug;

/// Status plus body of a fetched page.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub status: u16,
    pub body: String,
}

impl FetchedPage {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Browser-like page client shared by the link extractor and the
/// verification checks.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self { client })
    }

    /// GET the page and read the whole body.
    pub async fn get(&self, url: &str, timeout: Duration) -> Result<FetchedPage> {
        let response = self.client.get(url).timeout(timeout).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(url = %url, status, bytes = body.len(), "Fetched page");
        Ok(FetchedPage { status, body })
    }

    /// Status of `url` after redirects. HEAD first; servers that refuse
    /// HEAD are asked again with GET.
    pub async fn probe(&self, url: &str, timeout: Duration) -> Result<u16> {
        let status = self.status_of(Method::HEAD, url, timeout).await?;

        if status == StatusCode::METHOD_NOT_ALLOWED || status == StatusCode::NOT_IMPLEMENTED {
            debug!(url = %url, status = status.as_u16(), "HEAD refused, retrying with GET");
            return Ok(self.status_of(Method::GET, url, timeout).await?.as_u16());
        }

        Ok(status.as_u16())
    }

    async fn status_of(&self, method: Method, url: &str, timeout: Duration) -> Result<StatusCode> {
        let response = self
            .client
            .request(method, url)
            .timeout(timeout)
            .send()
            .await?;
        Ok(response.status())
    }
}
