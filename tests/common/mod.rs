use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use statefulchat::conversation::Message;
use statefulchat::error::{ChatError, Result};
use statefulchat::providers::{CompletionResponse, Provider};
use statefulchat::storage::SessionStore;

/// Provider that returns predetermined replies in order and records requests.
///
/// A `None` entry fails that request with a gateway error.
#[derive(Clone, Default)]
pub struct MockProvider {
    replies: Arc<Mutex<VecDeque<Option<String>>>>,
    calls: Arc<Mutex<Vec<Vec<Message>>>>,
}

#[allow(dead_code)]
impl MockProvider {
    pub fn new(replies: Vec<Option<&str>>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(
                replies
                    .into_iter()
                    .map(|r| r.map(str::to_string))
                    .collect(),
            )),
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> Vec<Vec<Message>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn complete(&self, messages: &[Message]) -> Result<CompletionResponse> {
        self.calls.lock().unwrap().push(messages.to_vec());
        match self.replies.lock().unwrap().pop_front().flatten() {
            Some(reply) => Ok(CompletionResponse::new(reply)),
            None => Err(ChatError::Gateway("service unavailable".to_string()).into()),
        }
    }

    fn model(&self) -> &str {
        "mock-model"
    }
}

#[allow(dead_code)]
pub fn create_temp_store() -> (SessionStore, TempDir) {
    let tmp = TempDir::new().expect("failed to create tempdir");
    let store = SessionStore::new(tmp.path().join("logs"));
    (store, tmp)
}

#[allow(dead_code)]
pub fn json_files(store: &SessionStore) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(store.dir())
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .map(|e| e.file_name().to_string_lossy().to_string())
                .filter(|n| n.ends_with(".json"))
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}
