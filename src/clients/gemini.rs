use anyhow::{Result, bail};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use super::TextGenerator;
use crate::constants::ai::{MAX_TOKENS, TEMPERATURE};

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    fn into_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }
}

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    #[must_use]
    pub fn new(client: Client, api_key: String, model: String, base_url: String) -> Self {
        Self {
            client,
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self) -> Result<Url> {
        Ok(Url::parse(&format!(
            "{}/models/{}:generateContent",
            self.base_url, self.model
        ))?)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn complete(&self, prompt: &str, timeout: Duration) -> Result<Option<String>> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                max_output_tokens: MAX_TOKENS,
            },
        };

        let response = self
            .client
            .post(self.endpoint()?)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request)
            .timeout(timeout)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        let status = response.status();
        if !status.is_success() {
            bail!("Gemini returned HTTP {status}");
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(reqwest::Error::without_url)?;
        Ok(body.into_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_uses_camel_case() {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: "hi" }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.1,
                max_output_tokens: 200,
            },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 200);
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hi");
    }

    #[test]
    fn test_response_text_extraction() {
        let body: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"NOT_FOUND\n"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(body.into_text().as_deref(), Some("NOT_FOUND"));

        let empty: GenerateResponse = serde_json::from_str(r#"{"candidates":[{}]}"#).unwrap();
        assert!(empty.into_text().is_none());
    }

    fn client_for(base_url: &str, key: &str) -> GeminiClient {
        GeminiClient::new(
            Client::new(),
            key.to_string(),
            "gemini-pro".to_string(),
            base_url.to_string(),
        )
    }

    #[test]
    fn test_endpoint_keeps_key_out_of_url() {
        let url = client_for("https://example.test/v1beta/", "k")
            .endpoint()
            .unwrap();
        assert_eq!(url.path(), "/v1beta/models/gemini-pro:generateContent");
        assert_eq!(url.query(), None);
    }

    #[tokio::test]
    async fn test_key_sent_as_header() {
        use axum::{Json, Router, http::HeaderMap, routing::post};

        let app = Router::new().route(
            "/v1beta/models/gemini-pro:generateContent",
            post(|headers: HeaderMap| async move {
                let key = headers
                    .get(API_KEY_HEADER)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                Json(serde_json::json!({
                    "candidates": [{"content": {"parts": [{"text": key}]}}]
                }))
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let text = client_for(&format!("http://{addr}/v1beta"), "header-key")
            .complete("hi", Duration::from_secs(2))
            .await
            .unwrap();
        assert_eq!(text.as_deref(), Some("header-key"));
    }

    #[tokio::test]
    async fn test_transport_error_does_not_leak_key() {
        let err = client_for("http://127.0.0.1:9/v1beta", "SUPERSECRETKEY")
            .complete("hi", Duration::from_secs(2))
            .await
            .unwrap_err();
        let rendered = format!("{err:#}");
        assert!(!rendered.contains("SUPERSECRETKEY"));
        assert!(!rendered.contains("127.0.0.1:9"));
    }
}
