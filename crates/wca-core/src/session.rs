//! Caller-owned conversation log
//!
//! A session starts with the system prompt and grows by one user and one
//! assistant message per successful exchange. `reset` returns it to the
//! state it was created in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        };
        f.write_str(name)
    }
}

/// One message in the chat-completion wire shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

#[derive(Debug, Clone)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    started_at: DateTime<Utc>,
}

impl ChatSession {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage::system(system_prompt)],
            started_at: Utc::now(),
        }
    }

    pub fn system_prompt(&self) -> &str {
        &self.messages[0].content
    }

    /// Every message including the system prompt, oldest first
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// The visible conversation, without the system prompt
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.messages[1..]
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::user(content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::assistant(content));
    }

    /// Drop a trailing user message left by an exchange that did not complete
    pub fn rollback_last_user(&mut self) -> Option<ChatMessage> {
        if self.messages.last().is_some_and(|m| m.role == Role::User) {
            self.messages.pop()
        } else {
            None
        }
    }

    /// Forget the conversation, keeping the system prompt
    pub fn reset(&mut self) {
        self.messages.truncate(1);
        self.started_at = Utc::now();
    }

    /// Number of user messages
    pub fn turns(&self) -> usize {
        self.messages.iter().filter(|m| m.role == Role::User).count()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.len() == 1
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}
