//! Mock LLM client for analyzer tests.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::llm::{CompletionRequest, CompletionResponse, LlmClient, LlmError, LlmUsage};

/// Canned answer of the mock engine.
#[derive(Debug)]
enum Reply {
    Text(String),
    Error(LlmError),
}

/// Mock implementation of the LlmClient trait.
///
/// Answers every completion with the same text (or error) after an
/// optional delay, and records the requests it receives.
#[derive(Debug)]
pub struct MockLlmClient {
    reply: Reply,
    delay: Duration,
    requests: Arc<RwLock<Vec<CompletionRequest>>>,
}

impl MockLlmClient {
    /// Answer every request with `text`.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            reply: Reply::Text(text.into()),
            delay: Duration::ZERO,
            requests: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Fail every request with `error`.
    pub fn with_error(error: LlmError) -> Self {
        Self {
            reply: Reply::Error(error),
            delay: Duration::ZERO,
            requests: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Wait this long before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Get recorded completion requests.
    pub async fn recorded_requests(&self) -> Vec<CompletionRequest> {
        self.requests.read().await.clone()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    fn provider(&self) -> &str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock-model"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.requests.write().await.push(request);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        match &self.reply {
            Reply::Text(text) => Ok(CompletionResponse {
                text: text.clone(),
                usage: LlmUsage::default(),
                model: "mock-model".to_string(),
            }),
            // LlmError is not Clone; rebuild an equivalent value.
            Reply::Error(error) => Err(match error {
                LlmError::Http(msg) => LlmError::Http(msg.clone()),
                LlmError::Api { status, message } => LlmError::Api {
                    status: *status,
                    message: message.clone(),
                },
                LlmError::Json(msg) => LlmError::Json(msg.clone()),
            }),
        }
    }
}
