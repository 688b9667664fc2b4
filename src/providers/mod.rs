//! Provider module for StatefulChat
//!
//! This module contains the completion provider abstraction and the OpenAI
//! implementation used by the interactive chat.

pub mod base;
pub mod openai;

pub use base::{CompletionResponse, Credentials, Provider, TokenUsage};
pub use openai::OpenAiProvider;

use crate::config::ProviderConfig;
use crate::error::Result;

/// Create the configured provider
///
/// # Errors
///
/// Returns error if provider initialization fails
pub fn create_provider(
    config: &ProviderConfig,
    credentials: Credentials,
) -> Result<Box<dyn Provider>> {
    Ok(Box::new(OpenAiProvider::new(config.clone(), credentials)?))
}
