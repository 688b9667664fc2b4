//! Test utilities for StatefulChat
//!
//! Provides a scripted completion provider for session tests.

use crate::conversation::Message;
use crate::error::{ChatError, Result};
use crate::providers::{CompletionResponse, Provider};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Provider that replays canned replies and records every request
///
/// Clones share state, so a test can keep one handle and give another to
/// the session under test.
#[derive(Clone, Default)]
pub struct MockProvider {
    replies: Arc<Mutex<VecDeque<String>>>,
    calls: Arc<Mutex<Vec<Vec<Message>>>>,
    failure: Option<String>,
}

impl MockProvider {
    /// Reply with each string in turn; fail once they run out
    pub fn replying<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Arc::new(Mutex::new(
                replies.into_iter().map(Into::into).collect(),
            )),
            ..Default::default()
        }
    }

    /// Fail every request with `message`
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Default::default()
        }
    }

    /// Message lists received so far, one entry per request
    pub fn calls(&self) -> Vec<Vec<Message>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn complete(&self, messages: &[Message]) -> Result<CompletionResponse> {
        self.calls.lock().unwrap().push(messages.to_vec());

        if let Some(message) = &self.failure {
            return Err(ChatError::Gateway(message.clone()).into());
        }

        match self.replies.lock().unwrap().pop_front() {
            Some(reply) => Ok(CompletionResponse::new(reply)),
            None => Err(ChatError::Gateway("no scripted reply left".to_string()).into()),
        }
    }

    fn model(&self) -> &str {
        "mock-model"
    }
}
