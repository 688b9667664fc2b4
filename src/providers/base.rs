//! Base provider trait and common types for StatefulChat
//!
//! This module defines the Provider trait that completion backends implement,
//! along with the response and credential types passed across that boundary.

use crate::conversation::Message;
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Token usage information from a completion
///
/// Tracks the number of tokens used in prompts and completions,
/// as reported by the AI provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Number of tokens in the prompt
    pub prompt_tokens: usize,
    /// Number of tokens in the completion
    pub completion_tokens: usize,
    /// Total tokens used (prompt + completion)
    pub total_tokens: usize,
}

impl TokenUsage {
    /// Create a new TokenUsage instance
    ///
    /// # Examples
    ///
    /// ```
    /// use statefulchat::providers::TokenUsage;
    ///
    /// let usage = TokenUsage::new(100, 50);
    /// assert_eq!(usage.total_tokens, 150);
    /// ```
    pub fn new(prompt_tokens: usize, completion_tokens: usize) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }
}

/// Completion returned by a provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResponse {
    /// Completion text as returned by the provider (untrimmed)
    pub content: String,
    /// Optional token usage information
    pub usage: Option<TokenUsage>,
}

impl CompletionResponse {
    /// Create a new CompletionResponse without usage data
    ///
    /// # Examples
    ///
    /// ```
    /// use statefulchat::providers::CompletionResponse;
    ///
    /// let response = CompletionResponse::new("Hello!");
    /// assert_eq!(response.content, "Hello!");
    /// assert!(response.usage.is_none());
    /// ```
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            usage: None,
        }
    }

    /// Create a new CompletionResponse with token usage
    pub fn with_usage(content: impl Into<String>, usage: TokenUsage) -> Self {
        Self {
            content: content.into(),
            usage: Some(usage),
        }
    }
}

/// API credential read once at startup
///
/// The key is optional here: a missing key only fails the first request.
#[derive(Clone, Default)]
pub struct Credentials {
    /// Environment variable the key was read from
    pub source: String,
    api_key: Option<String>,
}

impl Credentials {
    /// Read the API key from the named environment variable
    ///
    /// Empty values are treated as missing.
    pub fn from_env(var: &str) -> Self {
        let api_key = std::env::var(var).ok().filter(|k| !k.trim().is_empty());
        if api_key.is_none() {
            tracing::debug!("No credential found in {}", var);
        }
        Self {
            source: var.to_string(),
            api_key,
        }
    }

    /// Build credentials from an explicit key
    pub fn with_key(source: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            api_key: Some(api_key.into()),
        }
    }

    /// The API key, if one was found
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("source", &self.source)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Completion backend
///
/// Given the full ordered message list, returns a single completion or fails.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Completes a conversation with the given messages
    ///
    /// # Errors
    ///
    /// Returns `ChatError::Gateway` or `ChatError::MissingCredentials` if the
    /// request cannot be made or the response is unusable.
    async fn complete(&self, messages: &[Message]) -> Result<CompletionResponse>;

    /// Model identifier sent with each request
    fn model(&self) -> &str;
}
