use anyhow::{Result, bail};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::TextGenerator;
use crate::constants::ai::{MAX_TOKENS, TEMPERATURE};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatResponse {
    fn into_text(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }
}

#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiClient {
    #[must_use]
    pub fn new(client: Client, api_key: String, model: String, base_url: String) -> Self {
        Self {
            client,
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn complete(&self, prompt: &str, timeout: Duration) -> Result<Option<String>> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .timeout(timeout)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        let status = response.status();
        if !status.is_success() {
            bail!("OpenAI returned HTTP {status}");
        }

        let body: ChatResponse = response
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
    fn test_response_text_is_trimmed() {
        let body: ChatResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"content":"  https://x.com/bluemoon \n"}}]}"#,
        )
        .unwrap();
        assert_eq!(body.into_text().as_deref(), Some("https://x.com/bluemoon"));
    }

    #[test]
    fn test_empty_choices_yield_none() {
        let body: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(body.into_text().is_none());

        let body: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":"   "}}]}"#).unwrap();
        assert!(body.into_text().is_none());
    }
}
