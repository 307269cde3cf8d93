//! OpenAI chat-completion client implementation

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tokio::time::timeout;

use wca_core::{ChatMessage, ChatProvider, Error, GenerationConfig, GenerationResult, Result};

use crate::config::OpenAIConfig;

/// OpenAI chat-completion client
pub struct OpenAIClient {
    config: OpenAIConfig,
    client: Client,
    current_model: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    total_tokens: u32,
}

/// Completion text and token usage extracted from a response body
#[derive(Debug, PartialEq)]
pub(crate) struct Completion {
    pub text: String,
    pub tokens_used: Option<u32>,
}

impl OpenAIClient {
    /// Model constants
    pub const GPT_4: &'static str = "gpt-4";
    pub const GPT_4O_MINI: &'static str = "gpt-4o-mini";

    /// Create a new OpenAI client from configuration.
    ///
    /// Requests are bounded per call by `GenerationConfig::timeout`, not by
    /// the HTTP client.
    pub fn new(config: OpenAIConfig) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        let current_model = config.model.clone();
        Ok(Self {
            config,
            client,
            current_model,
        })
    }

    /// Create a new OpenAI client from environment variables
    pub fn from_env() -> Result<Self> {
        let config = OpenAIConfig::from_env()?;
        Self::new(config)
    }

    /// Set the model to use for completions
    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.current_model = model_id.into();
        self
    }

    /// Generation settings matching this client's model and timeout
    pub fn generation_config(&self) -> GenerationConfig {
        GenerationConfig {
            model_id: self.current_model.clone(),
            timeout: self.config.timeout(),
            ..Default::default()
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.api_url)
    }

    async fn perform_completion(
        &self,
        messages: &[ChatMessage],
        config: &GenerationConfig,
    ) -> Result<Completion> {
        let request_body = build_request(messages, config);

        tracing::debug!(
            model = %config.model_id,
            messages = messages.len(),
            "sending chat completion request"
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            tracing::warn!(%status, "chat completion request failed");
            return Err(status_error(status, &body));
        }

        parse_completion(&body)
    }
}

pub(crate) fn build_request<'a>(
    messages: &'a [ChatMessage],
    config: &'a GenerationConfig,
) -> ChatCompletionRequest<'a> {
    ChatCompletionRequest {
        model: &config.model_id,
        messages,
        max_tokens: config.max_tokens,
        temperature: config.temperature,
    }
}

pub(crate) fn parse_completion(body: &str) -> Result<Completion> {
    let response: ChatCompletionResponse = serde_json::from_str(body)?;

    let text = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
        .ok_or_else(|| {
            Error::LLMProvider(format!("Empty response from OpenAI API. Raw response: {}", body))
        })?;

    Ok(Completion {
        text,
        tokens_used: response.usage.map(|u| u.total_tokens),
    })
}

fn transport_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::Timeout(err.to_string())
    } else {
        Error::Network(err.to_string())
    }
}

pub(crate) fn status_error(status: StatusCode, body: &str) -> Error {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::Authentication(format!(
            "OpenAI API rejected the credentials ({}): {}",
            status, body
        )),
        _ => Error::LLMProvider(format!(
            "OpenAI API request failed with status {}: {}",
            status, body
        )),
    }
}

#[async_trait]
impl ChatProvider for OpenAIClient {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        config: &GenerationConfig,
    ) -> Result<GenerationResult> {
        let completion_future = self.perform_completion(messages, config);

        let completion = match timeout(config.timeout, completion_future).await {
            Ok(result) => result?,
            Err(_) => return Err(Error::Timeout("Request timed out".to_string())),
        };

        tracing::debug!(tokens = ?completion.tokens_used, "chat completion received");

        Ok(GenerationResult {
            text: completion.text,
            model_id: config.model_id.clone(),
            tokens_used: completion.tokens_used,
        })
    }

    fn model_id(&self) -> &str {
        &self.current_model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_completion() {
        let body = r#"{
            "id": "chatcmpl-1",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "  Use a 4.5:1 ratio.\n"}, "finish_reason": "stop"}
            ],
            "usage": {"prompt_tokens": 10, "completion_tokens": 6, "total_tokens": 16}
        }"#;

        let completion = parse_completion(body).unwrap();
        assert_eq!(completion.text, "Use a 4.5:1 ratio.");
        assert_eq!(completion.tokens_used, Some(16));
    }

    #[test]
    fn test_parse_completion_without_choices() {
        let err = parse_completion(r#"{"choices": []}"#).unwrap_err();
        assert!(matches!(err, Error::LLMProvider(_)));

        let err = parse_completion(r#"{"choices": [{"message": {"content": null}}]}"#).unwrap_err();
        assert!(matches!(err, Error::LLMProvider(_)));
    }

    #[test]
    fn test_parse_completion_malformed() {
        let err = parse_completion("<html>bad gateway</html>").unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn test_status_error() {
        assert!(matches!(
            status_error(StatusCode::UNAUTHORIZED, "nope"),
            Error::Authentication(_)
        ));
        let err = status_error(StatusCode::TOO_MANY_REQUESTS, "slow down");
        assert!(matches!(err, Error::LLMProvider(_)));
        assert!(err.to_string().contains("429"));
    }

    #[test]
    fn test_client_uses_configured_model() {
        let mut config = OpenAIConfig::new("sk-test".to_string());
        config.model = OpenAIClient::GPT_4O_MINI.to_string();
        let client = OpenAIClient::new(config).unwrap();
        assert_eq!(client.model_id(), "gpt-4o-mini");
        assert_eq!(client.generation_config().model_id, "gpt-4o-mini");

        let client = client.with_model(OpenAIClient::GPT_4);
        assert_eq!(client.model_id(), "gpt-4");
    }

    mod over_http {
        use super::*;
        use std::time::Duration;
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        use tokio::net::{TcpListener, TcpStream};

        fn client_for(addr: std::net::SocketAddr, timeout_secs: u64) -> OpenAIClient {
            let mut config = OpenAIConfig::new("sk-test".to_string());
            config.api_url = format!("http://{}/v1", addr);
            config.timeout_secs = timeout_secs;
            OpenAIClient::new(config).unwrap()
        }

        /// Accepts connections and never answers.
        async fn silent_server() -> std::net::SocketAddr {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            tokio::spawn(async move {
                let mut held = Vec::new();
                while let Ok((stream, _)) = listener.accept().await {
                    held.push(stream);
                }
            });
            addr
        }

        async fn read_request(stream: &mut TcpStream) {
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            let header_end = loop {
                let n = stream.read(&mut chunk).await.unwrap();
                if n == 0 {
                    return;
                }
                buf.extend_from_slice(&chunk[..n]);
                if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                    break pos + 4;
                }
            };

            let headers = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
            let content_length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|value| value.trim().parse::<usize>().ok())
                .unwrap_or(0);

            while buf.len() < header_end + content_length {
                let n = stream.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }
        }

        /// Answers every request with a fixed status line and JSON body.
        async fn canned_server(status: &'static str, body: &'static str) -> std::net::SocketAddr {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            tokio::spawn(async move {
                while let Ok((mut stream, _)) = listener.accept().await {
                    read_request(&mut stream).await;
                    let response = format!(
                        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        status,
                        body.len(),
                        body
                    );
                    stream.write_all(response.as_bytes()).await.unwrap();
                    stream.shutdown().await.ok();
                }
            });
            addr
        }

        #[tokio::test]
        async fn test_hung_server_times_out() {
            let client = client_for(silent_server().await, 1);

            let result = tokio::time::timeout(
                Duration::from_secs(10),
                client.complete(&[ChatMessage::user("hi")], &client.generation_config()),
            )
            .await
            .expect("request should be bounded by the configured timeout");

            let err = result.unwrap_err();
            assert!(matches!(err, Error::Timeout(_)), "got {err:?}");
        }

        #[tokio::test]
        async fn test_unauthorized_maps_to_authentication() {
            let addr = canned_server(
                "401 Unauthorized",
                r#"{"error": {"message": "Incorrect API key provided"}}"#,
            )
            .await;
            let client = client_for(addr, 5);

            let err = client
                .complete(&[ChatMessage::user("hi")], &client.generation_config())
                .await
                .unwrap_err();
            assert!(matches!(err, Error::Authentication(_)), "got {err:?}");
            assert!(err.to_string().contains("Incorrect API key"));
        }

        #[tokio::test]
        async fn test_successful_completion() {
            let addr = canned_server(
                "200 OK",
                r#"{"choices": [{"message": {"role": "assistant", "content": "Use 4.5 to 1."}}], "usage": {"total_tokens": 12}}"#,
            )
            .await;
            let client = client_for(addr, 5);

            let result = client
                .complete(&[ChatMessage::user("hi")], &client.generation_config())
                .await
                .unwrap();
            assert_eq!(result.text, "Use 4.5 to 1.");
            assert_eq!(result.tokens_used, Some(12));
            assert_eq!(result.model_id, "gpt-4");
        }
    }
}
