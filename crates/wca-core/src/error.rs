//! Error types for the WCA accessibility tools

use thiserror::Error;

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types shared by the metrics engine and the chat assistant
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("LLM provider error: {0}")]
    LLMProvider(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Timeout error: {0}")]
    Timeout(String),

    #[error("Request cancelled")]
    Cancelled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the error was caused by user input rather than the environment.
    ///
    /// Validation errors are reported next to the offending field and the
    /// user is asked to resubmit.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::InvalidColor(_) | Error::EmptyInput(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
