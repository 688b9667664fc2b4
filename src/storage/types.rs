use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::conversation::Message;

/// Value shown when an artifact carries no `saved_at`
pub const UNKNOWN_SAVED_AT: &str = "unknown";

/// Metadata block of a structured artifact
///
/// Field order is the on-disk order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionMetadata {
    /// Human-readable save time (`DD/MM/YYYY a las HH:MM:SS`)
    #[serde(default = "default_saved_at")]
    pub saved_at: String,
    /// ISO-8601 save time
    #[serde(default)]
    pub timestamp: String,
    /// Number of messages in `conversation` at save time
    #[serde(default)]
    pub total_messages: usize,
}

fn default_saved_at() -> String {
    UNKNOWN_SAVED_AT.to_string()
}

impl Default for SessionMetadata {
    fn default() -> Self {
        Self {
            saved_at: default_saved_at(),
            timestamp: String::new(),
            total_messages: 0,
        }
    }
}

/// Structured artifact written to `log_<YYYYMMDD>_<HHMMSS>.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionArtifact {
    #[serde(default)]
    pub metadata: SessionMetadata,
    #[serde(default)]
    pub conversation: Vec<Message>,
}

/// Read-only listing entry for a saved session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    /// File name inside the logs directory
    pub filename: String,
    /// Full path to the structured artifact
    pub filepath: PathBuf,
    /// Filesystem modification time
    pub modified_time: DateTime<Local>,
    /// `metadata.total_messages`, 0 when missing
    pub total_messages: u64,
    /// `metadata.saved_at`, "unknown" when missing
    pub saved_at: String,
}

/// Result of inspecting one candidate file during listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// The file is a readable session artifact
    Listed(SessionSummary),
    /// The file was left out of the listing
    Skipped { filename: String, reason: String },
}

/// Paths produced by a full save
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedArtifacts {
    /// Human-readable transcript
    pub text_path: PathBuf,
    /// Structured artifact used for resume
    pub json_path: PathBuf,
}
