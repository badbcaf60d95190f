//! Perplexity chat-completions client
//!
//! Speaks the OpenAI-compatible `chat/completions` wire format, so any
//! compatible endpoint works when `PERPLEXITY_API_URL` points at it.

use super::prompt::AdvicePrompt;
use super::{AdviceClient, AdviceError};
use crate::config::AdviceConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// HTTP advice client for Perplexity (and compatible endpoints).
pub struct PerplexityClient {
    client: Client,
    config: AdviceConfig,
}

impl PerplexityClient {
    pub fn new(config: AdviceConfig) -> Result<Self, AdviceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AdviceError::Request(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client, config })
    }

    fn request_body<'a>(&'a self, prompt: &'a AdvicePrompt) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        }
    }
}

/// Pull the first choice's content out of a completions response body.
fn parse_completion(body: &str) -> Result<String, AdviceError> {
    let response: ChatResponse =
        serde_json::from_str(body).map_err(|e| AdviceError::Parse(e.to_string()))?;
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|c| !c.trim().is_empty())
        .ok_or(AdviceError::EmptyResponse)
}

#[async_trait]
impl AdviceClient for PerplexityClient {
    async fn is_available(&self) -> bool {
        self.config.api_url.is_some()
    }

    async fn complete(&self, prompt: &AdvicePrompt) -> Result<String, AdviceError> {
        let url = self
            .config
            .api_url
            .as_deref()
            .ok_or(AdviceError::NotConfigured)?;

        tracing::debug!(url, model = %self.config.model, "sending advice request");

        let mut request = self.client.post(url).json(&self.request_body(prompt));
        if let Some(key) = self.config.api_key.as_deref() {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AdviceError::Request(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AdviceError::Request(e.to_string()))?;

        if !status.is_success() {
            return Err(AdviceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        parse_completion(&body)
    }
}
