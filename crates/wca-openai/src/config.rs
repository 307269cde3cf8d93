//! OpenAI configuration

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use wca_core::llm::DEFAULT_MODEL;
use wca_core::{Error, Result};

pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Configuration for the OpenAI client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIConfig {
    pub api_key: String,
    pub model: String,
    pub api_url: String,
    pub timeout_secs: u64,
}

impl OpenAIConfig {
    /// Create configuration from environment variables (and `.env`)
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Create configuration from any variable lookup
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("OPENAI_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                Error::Configuration("OPENAI_API_KEY environment variable not found".to_string())
            })?;

        let model = lookup("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let api_url = lookup("OPENAI_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let timeout_secs = match lookup("OPENAI_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                Error::Configuration(format!("OPENAI_TIMEOUT_SECS must be a number of seconds, got '{}'", raw))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            return Err(Error::Configuration(
                "OPENAI_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            api_key,
            model,
            api_url,
            timeout_secs,
        })
    }

    /// Create configuration with explicit key and defaults for the rest
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_key() {
        let err = OpenAIConfig::from_vars(lookup(&[])).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));

        let err = OpenAIConfig::from_vars(lookup(&[("OPENAI_API_KEY", "  ")])).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_defaults() {
        let config = OpenAIConfig::from_vars(lookup(&[("OPENAI_API_KEY", "sk-test")])).unwrap();
        assert_eq!(config.model, "gpt-4");
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_overrides() {
        let config = OpenAIConfig::from_vars(lookup(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_MODEL", "gpt-4o-mini"),
            ("OPENAI_API_URL", "http://localhost:8080/v1/"),
            ("OPENAI_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.api_url, "http://localhost:8080/v1");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn test_bad_timeout() {
        let err = OpenAIConfig::from_vars(lookup(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("OPENAI_TIMEOUT_SECS"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        for raw in ["0", " 0 "] {
            let err = OpenAIConfig::from_vars(lookup(&[
                ("OPENAI_API_KEY", "sk-test"),
                ("OPENAI_TIMEOUT_SECS", raw),
            ]))
            .unwrap_err();
            assert!(matches!(err, Error::Configuration(_)));
            assert!(err.to_string().contains("greater than zero"), "{err}");
        }
    }
}
