//! OpenAI provider implementation for StatefulChat
//!
//! Sends the whole conversation to an OpenAI-compatible `/chat/completions`
//! endpoint and returns the first choice's text.

use crate::config::ProviderConfig;
use crate::conversation::Message;
use crate::error::{ChatError, Result};
use crate::providers::{CompletionResponse, Credentials, Provider, TokenUsage};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// OpenAI chat completions provider
///
/// # Examples
///
/// ```no_run
/// use statefulchat::config::ProviderConfig;
/// use statefulchat::conversation::Message;
/// use statefulchat::providers::{Credentials, OpenAiProvider, Provider};
///
/// # async fn example() -> statefulchat::error::Result<()> {
/// let config = ProviderConfig::default();
/// let credentials = Credentials::from_env(&config.api_key_env);
/// let provider = OpenAiProvider::new(config, credentials)?;
/// let completion = provider.complete(&[Message::user("Hello!")]).await?;
/// println!("{}", completion.content);
/// # Ok(())
/// # }
/// ```
pub struct OpenAiProvider {
    client: Client,
    config: ProviderConfig,
    credentials: Credentials,
}

/// Request body for /chat/completions
#[derive(Debug, Serialize)]
struct OpenAiRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
}

/// Response body from /chat/completions
#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    #[serde(default)]
    choices: Vec<OpenAiChoice>,
    usage: Option<OpenAiUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAiMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiUsage {
    #[serde(default)]
    prompt_tokens: usize,
    #[serde(default)]
    completion_tokens: usize,
}

impl OpenAiProvider {
    /// Create a new OpenAI provider instance
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    pub fn new(config: ProviderConfig, credentials: Credentials) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("statefulchat/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ChatError::Gateway(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config,
            credentials,
        })
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.api_base.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
    async fn complete(&self, messages: &[Message]) -> Result<CompletionResponse> {
        let api_key = self
            .credentials
            .api_key()
            .ok_or_else(|| ChatError::MissingCredentials(self.credentials.source.clone()))?;

        let request = OpenAiRequest {
            model: &self.config.model,
            messages,
        };

        tracing::debug!(
            "Sending completion request: model={}, {} messages",
            request.model,
            messages.len()
        );

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Completion request failed: {}", e);
                ChatError::Gateway(format!("Request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Completion endpoint returned {}: {}", status, error_text);
            return Err(ChatError::Gateway(format!(
                "Server returned {}: {}",
                status, error_text
            ))
            .into());
        }

        let body: OpenAiResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse completion response: {}", e);
            ChatError::Gateway(format!("Failed to parse response: {}", e))
        })?;

        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ChatError::Gateway("Response contained no message content".into()))?;

        match body.usage {
            Some(usage) => {
                let usage = TokenUsage::new(usage.prompt_tokens, usage.completion_tokens);
                tracing::debug!(
                    "Completion usage: prompt={}, completion={}",
                    usage.prompt_tokens,
                    usage.completion_tokens
                );
                Ok(CompletionResponse::with_usage(content, usage))
            }
            None => Ok(CompletionResponse::new(content)),
        }
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider_with_base(api_base: &str) -> OpenAiProvider {
        let config = ProviderConfig {
            api_base: api_base.to_string(),
            ..Default::default()
        };
        OpenAiProvider::new(config, Credentials::with_key("TEST", "sk-test")).unwrap()
    }

    #[test]
    fn test_provider_creation() {
        let provider = provider_with_base("https://api.openai.com/v1");
        assert_eq!(provider.model(), "gpt-4o-mini");
    }

    #[test]
    fn test_completions_url_trims_trailing_slash() {
        let provider = provider_with_base("http://localhost:8080/v1/");
        assert_eq!(
            provider.completions_url(),
            "http://localhost:8080/v1/chat/completions"
        );
    }

    #[test]
    fn test_request_serialization() {
        let messages = vec![Message::system("sys"), Message::user("Hello")];
        let request = OpenAiRequest {
            model: "gpt-4o-mini",
            messages: &messages,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "gpt-4o-mini");
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["content"], "Hello");
    }

    #[tokio::test]
    async fn test_missing_credentials_fails_on_first_use() {
        let config = ProviderConfig::default();
        let provider = OpenAiProvider::new(config, Credentials::default()).unwrap();

        let err = provider.complete(&[Message::user("hi")]).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ChatError>(),
            Some(ChatError::MissingCredentials(_))
        ));
    }
}
