//! WCAG assistant that answers accessibility questions through a chat provider

use std::future::Future;

use wca_core::{ChatProvider, ChatSession, Error, GenerationConfig, Result};

/// System prompt fixing the assistant's role for every session
pub const WCAG_SYSTEM_PROMPT: &str = "You are a web accessibility expert. \
For the text, color information, or HTML structure the user provides, give feedback \
based on the WCAG 2.1 success criteria. Focus on color contrast, text size, semantic \
structure, readability, and auto-playing content, and answer the user's question with \
short, practical improvements.";

/// Assistant that owns the provider but not the conversation.
///
/// Callers create a [`ChatSession`] with [`WcagAssistant::new_session`] and
/// pass it to every [`WcagAssistant::ask`].
pub struct WcagAssistant<P: ChatProvider> {
    provider: P,
    system_prompt: String,
    config: GenerationConfig,
}

impl<P: ChatProvider> WcagAssistant<P> {
    /// Create a new assistant using the provider's model
    pub fn new(provider: P) -> Self {
        let config = GenerationConfig {
            model_id: provider.model_id().to_string(),
            ..Default::default()
        };
        Self {
            provider,
            system_prompt: WCAG_SYSTEM_PROMPT.to_string(),
            config,
        }
    }

    pub fn with_config(mut self, config: GenerationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// Start a conversation seeded with the system prompt
    pub fn new_session(&self) -> ChatSession {
        ChatSession::new(self.system_prompt.clone())
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn model_id(&self) -> &str {
        &self.config.model_id
    }

    /// Ask a question and record the exchange in `session`
    pub async fn ask(&self, session: &mut ChatSession, question: &str) -> Result<String> {
        self.ask_until(session, question, std::future::pending()).await
    }

    /// Like [`ask`](Self::ask), but gives up with [`Error::Cancelled`] once
    /// `cancel` resolves.
    ///
    /// A failed or cancelled exchange leaves `session` as it was before the call.
    pub async fn ask_until<F>(
        &self,
        session: &mut ChatSession,
        question: &str,
        cancel: F,
    ) -> Result<String>
    where
        F: Future<Output = ()>,
    {
        let question = question.trim();
        if question.is_empty() {
            return Err(Error::EmptyInput("question must not be empty".to_string()));
        }

        session.push_user(question);
        tracing::debug!(turn = session.turns(), model = %self.config.model_id, "asking assistant");

        let outcome = tokio::select! {
            result = self.provider.complete(session.messages(), &self.config) => result,
            _ = cancel => Err(Error::Cancelled),
        };

        match outcome {
            Ok(result) => {
                session.push_assistant(result.text.clone());
                Ok(result.text)
            }
            Err(e) => {
                tracing::warn!(error = %e, "assistant exchange failed, rolling back");
                session.rollback_last_user();
                Err(e)
            }
        }
    }
}
