//! LLM agent module for summarisation.
//!
//! Talks to any OpenAI-compatible chat-completions endpoint.

use crate::config::Config;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("LLM request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("LLM API returned HTTP {status}: {message}")]
    Api { status: u16, message: String },
    #[error("LLM returned no completion text")]
    EmptyResponse,
}

/// Anything that can turn a block of text into a summary.
#[async_trait]
pub trait Summarize {
    async fn summarize(&self, content: &str) -> Result<String, AgentError>;
}

#[async_trait]
impl<T: Summarize + Sync + ?Sized> Summarize for &T {
    async fn summarize(&self, content: &str) -> Result<String, AgentError> {
        (**self).summarize(content).await
    }
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [Message<'a>; 2],
    temperature: f64,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Chat-completions client with the generation settings fixed at construction.
pub struct ChatClient {
    http: Client,
    endpoint: String,
    api_key: String,
    model: String,
    prompt: String,
    temperature: f64,
    max_tokens: u32,
    timeout: Duration,
}

impl ChatClient {
    pub fn new(config: &Config) -> Result<Self, AgentError> {
        let http = Client::builder()
            .user_agent(concat!("rss-summa/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            prompt: config.prompt.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            timeout: Duration::from_secs(config.timeout),
        })
    }

    /// Full URL requests are posted to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Summarize for ChatClient {
    async fn summarize(&self, content: &str) -> Result<String, AgentError> {
        let request = ChatRequest {
            model: &self.model,
            messages: [
                Message {
                    role: "system",
                    content: &self.prompt,
                },
                Message {
                    role: "user",
                    content,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        tracing::debug!(
            endpoint = %self.endpoint,
            model = %self.model,
            chars = content.chars().count(),
            "requesting completion"
        );

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "completion request rejected");
            return Err(AgentError::Api {
                status: status.as_u16(),
                message: extract_error_message(&body),
            });
        }

        let parsed: ChatResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(AgentError::EmptyResponse)
    }
}

/// Pull `error.message` out of an OpenAI-style error body, else return the body as-is
fn extract_error_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => parsed.error.message,
        Err(_) => body.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> Config {
        Config {
            rss_url: "https://example.com/feed.xml".to_string(),
            model: "test-model".to_string(),
            api_key: "sk-test".to_string(),
            base_url: base_url.to_string(),
            prompt: "Summarise.".to_string(),
            temperature: 0.2,
            max_tokens: 64,
            timeout: 5,
        }
    }

    #[test]
    fn endpoint_trims_trailing_slash() {
        let client = ChatClient::new(&config("https://api.example.com/v1/")).unwrap();
        assert_eq!(client.endpoint(), "https://api.example.com/v1/chat/completions");
    }

    #[test]
    fn error_message_prefers_openai_shape() {
        let body = r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#;
        assert_eq!(extract_error_message(body), "Incorrect API key provided");
        assert_eq!(extract_error_message(" bad gateway \n"), "bad gateway");
    }

    #[test]
    fn request_serialises_both_messages() {
        let request = ChatRequest {
            model: "m",
            messages: [
                Message {
                    role: "system",
                    content: "sys",
                },
                Message {
                    role: "user",
                    content: "hello",
                },
            ],
            temperature: 0.5,
            max_tokens: 10,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "model": "m",
                "messages": [
                    {"role": "system", "content": "sys"},
                    {"role": "user", "content": "hello"}
                ],
                "temperature": 0.5,
                "max_tokens": 10
            })
        );
    }
}
