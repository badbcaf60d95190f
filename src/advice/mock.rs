//! Mock advice client for testing: returns a preconfigured reply.

use super::prompt::AdvicePrompt;
use super::{AdviceClient, AdviceError};
use async_trait::async_trait;
use std::sync::Mutex;

/// Deterministic [`AdviceClient`] that records every prompt it receives.
pub struct MockAdviceClient {
    available: bool,
    reply: Result<String, String>,
    prompts: Mutex<Vec<AdvicePrompt>>,
}

impl MockAdviceClient {
    /// Create a mock client that answers every prompt with `reply`.
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            available: true,
            reply: Ok(reply.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock client whose requests fail with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            available: true,
            reply: Err(reason.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock client that reports as unavailable.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            reply: Err("unavailable".to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<AdvicePrompt> {
        self.prompts
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl AdviceClient for MockAdviceClient {
    async fn is_available(&self) -> bool {
        self.available
    }

    async fn complete(&self, prompt: &AdvicePrompt) -> Result<String, AdviceError> {
        if !self.available {
            return Err(AdviceError::Unavailable(
                "mock client configured as unavailable".to_string(),
            ));
        }
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.clone());
        }
        self.reply.clone().map_err(AdviceError::Request)
    }
}
