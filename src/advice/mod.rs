//! Advice composition and the advice-service client
//!
//! Defines the client trait for chat-completion style advice services.
//! Two implementations:
//! - `PerplexityClient`: HTTP client for the Perplexity API (production)
//! - `MockAdviceClient`: returns preconfigured replies (testing)
//!
//! `AdviceComposer` turns a chart and a question into a prompt and relays
//! it through whichever client it was built with.

mod mock;
mod perplexity;
mod prompt;

pub use mock::MockAdviceClient;
pub use perplexity::PerplexityClient;
pub use prompt::{chart_summary, compose_prompt, AdvicePrompt, SYSTEM_MESSAGE};

use crate::chart::MedicalChart;
use async_trait::async_trait;
use std::sync::Arc;

/// Errors from advice client operations.
#[derive(Debug, thiserror::Error)]
pub enum AdviceError {
    #[error("advice service not configured (set PERPLEXITY_API_URL)")]
    NotConfigured,
    #[error("advice service unavailable: {0}")]
    Unavailable(String),
    #[error("advice request failed: {0}")]
    Request(String),
    #[error("advice service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("advice response parse error: {0}")]
    Parse(String),
    #[error("advice service returned no content")]
    EmptyResponse,
}

/// Client trait for advice services.
///
/// Abstracts over transport (HTTP, mock) so the service layer doesn't
/// depend on how the provider is reached.
#[async_trait]
pub trait AdviceClient: Send + Sync {
    /// Whether the client can currently make requests.
    async fn is_available(&self) -> bool;

    /// Send a composed prompt and return the reply text.
    async fn complete(&self, prompt: &AdvicePrompt) -> Result<String, AdviceError>;
}

/// Builds prompts from charts and relays them to an [`AdviceClient`].
#[derive(Clone)]
pub struct AdviceComposer {
    client: Arc<dyn AdviceClient>,
}

impl AdviceComposer {
    pub fn new(client: Arc<dyn AdviceClient>) -> Self {
        Self { client }
    }

    /// Ask `question` in the context of `chart`.
    pub async fn advise(&self, chart: &MedicalChart, question: &str) -> Result<String, AdviceError> {
        let prompt = compose_prompt(chart, question);
        self.client.complete(&prompt).await
    }

    pub async fn is_available(&self) -> bool {
        self.client.is_available().await
    }
}
