//! Chat provider trait and types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use super::session::ChatMessage;
use super::{Error, Result};

pub const DEFAULT_MODEL: &str = "gpt-4";

/// Configuration for a chat completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub model_id: String,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub timeout: Duration,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model_id: DEFAULT_MODEL.to_string(),
            max_tokens: None,
            temperature: None,
            timeout: Duration::from_secs(60),
        }
    }
}

/// Result of a chat completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResult {
    pub text: String,
    pub model_id: String,
    pub tokens_used: Option<u32>,
}

/// Trait for chat-completion LLM providers (e.g., OpenAI)
///
/// A provider receives the whole conversation, system prompt first, and
/// returns the assistant's next turn. Implementations must bound each
/// request by `config.timeout`.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Complete the conversation with the next assistant message
    async fn complete(
        &self,
        messages: &[ChatMessage],
        config: &GenerationConfig,
    ) -> Result<GenerationResult>;

    /// Get the model ID being used
    fn model_id(&self) -> &str;
}

#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Fail(String),
}

/// In-memory provider returning canned replies.
///
/// Queued replies are consumed in order; once the queue is empty the
/// fallback reply repeats. Every call's messages are recorded.
pub struct MockChatProvider {
    model_id: String,
    queue: Mutex<VecDeque<MockReply>>,
    fallback: MockReply,
    delay: Option<Duration>,
    calls: Mutex<Vec<Vec<ChatMessage>>>,
}

impl MockChatProvider {
    pub fn with_response(text: impl Into<String>) -> Self {
        Self::build(MockReply::Text(text.into()))
    }

    /// A provider whose every call fails with an `LLMProvider` error
    pub fn failing(message: impl Into<String>) -> Self {
        Self::build(MockReply::Fail(message.into()))
    }

    fn build(fallback: MockReply) -> Self {
        Self {
            model_id: "mock-model".to_string(),
            queue: Mutex::new(VecDeque::new()),
            fallback,
            delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn then_reply(self, text: impl Into<String>) -> Self {
        self.push(MockReply::Text(text.into()))
    }

    pub fn then_fail(self, message: impl Into<String>) -> Self {
        self.push(MockReply::Fail(message.into()))
    }

    /// Sleep before answering, to exercise timeouts and cancellation
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    fn push(self, reply: MockReply) -> Self {
        self.queue
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(reply);
        self
    }

    /// Messages sent on each call so far
    pub fn calls(&self) -> Vec<Vec<ChatMessage>> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[async_trait]
impl ChatProvider for MockChatProvider {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        config: &GenerationConfig,
    ) -> Result<GenerationResult> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(messages.to_vec());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let reply = self
            .queue
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());

        match reply {
            MockReply::Text(text) => Ok(GenerationResult {
                text,
                model_id: config.model_id.clone(),
                tokens_used: None,
            }),
            MockReply::Fail(message) => Err(Error::LLMProvider(message)),
        }
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}
