//! OpenAI integration for the WCA assistant
//!
//! This crate provides the OpenAI implementation of the ChatProvider trait.

mod client;
mod config;


pub use client::OpenAIClient;
pub use config::{OpenAIConfig, DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};

// Re-export core types for convenience
pub use wca_core::{ChatMessage, ChatProvider, Error, GenerationConfig, GenerationResult, Result};
