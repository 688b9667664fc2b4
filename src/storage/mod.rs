use crate::conversation::{Conversation, Message};
use crate::error::{ChatError, Result};
use chrono::{DateTime, Local};
use std::fmt::Write as _;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

pub mod types;
pub use types::{
    SavedArtifacts, ScanOutcome, SessionArtifact, SessionMetadata, SessionSummary,
    UNKNOWN_SAVED_AT,
};

/// Prefix shared by every artifact file name
pub const ARTIFACT_PREFIX: &str = "log_";

const SAVED_AT_FORMAT: &str = "%d/%m/%Y a las %H:%M:%S";
const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";
const NAME_FORMAT: &str = "%Y%m%d_%H%M%S";
const HEADER_RULE_WIDTH: usize = 60;
const MESSAGE_RULE_WIDTH: usize = 40;

/// File-based storage for conversation snapshots
///
/// Each save produces new files named after the save time; existing
/// snapshots are never overwritten.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    /// Create a store rooted at `dir`
    ///
    /// The directory is created on the first write, not here.
    ///
    /// # Examples
    ///
    /// ```
    /// use statefulchat::storage::SessionStore;
    ///
    /// let store = SessionStore::new("logs");
    /// assert_eq!(store.dir(), std::path::Path::new("logs"));
    /// ```
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the artifacts
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write both the text transcript and the structured artifact
    ///
    /// # Errors
    ///
    /// Returns `ChatError::Io` if the directory cannot be created or a file
    /// cannot be written.
    pub fn save_full(&self, conversation: &Conversation) -> Result<SavedArtifacts> {
        self.save_full_at(conversation, Local::now())
    }

    /// Same as [`save_full`](Self::save_full) with an explicit save time
    pub fn save_full_at(
        &self,
        conversation: &Conversation,
        now: DateTime<Local>,
    ) -> Result<SavedArtifacts> {
        self.ensure_dir()?;
        let base = self.unique_base_name(&now);

        let text_path = self.dir.join(format!("{}.txt", base));
        std::fs::write(&text_path, render_transcript(conversation, &now))
            .map_err(ChatError::Io)?;
        tracing::debug!("Wrote transcript to {}", text_path.display());

        let json_path = self.dir.join(format!("{}.json", base));
        self.write_artifact(&json_path, conversation, &now)?;

        Ok(SavedArtifacts {
            text_path,
            json_path,
        })
    }

    /// Write only the structured artifact
    ///
    /// # Errors
    ///
    /// Returns `ChatError::Io` if the directory cannot be created or the file
    /// cannot be written.
    pub fn save_json_only(&self, conversation: &Conversation) -> Result<PathBuf> {
        self.save_json_only_at(conversation, Local::now())
    }

    /// Same as [`save_json_only`](Self::save_json_only) with an explicit save time
    pub fn save_json_only_at(
        &self,
        conversation: &Conversation,
        now: DateTime<Local>,
    ) -> Result<PathBuf> {
        self.ensure_dir()?;
        let base = self.unique_base_name(&now);
        let json_path = self.dir.join(format!("{}.json", base));
        self.write_artifact(&json_path, conversation, &now)?;
        Ok(json_path)
    }

    /// List saved sessions, most recently modified first
    ///
    /// A missing directory yields an empty list. Files that cannot be read or
    /// parsed are left out.
    pub fn list_sessions(&self) -> Result<Vec<SessionSummary>> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(ChatError::Io(e).into()),
        };

        let mut sessions = scan_entries(entries.map(|entry| entry.map(|e| e.path())));
        sessions.sort_by(|a, b| {
            b.modified_time
                .cmp(&a.modified_time)
                .then_with(|| b.filename.cmp(&a.filename))
        });

        Ok(sessions)
    }

    /// Load a structured artifact
    ///
    /// # Errors
    ///
    /// Returns `ChatError::Load` carrying the underlying cause if the file is
    /// missing, unreadable, or not a valid artifact.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<(Conversation, SessionMetadata)> {
        let path = path.as_ref();
        let load_err = |source: Box<dyn std::error::Error + Send + Sync>| ChatError::Load {
            path: path.to_path_buf(),
            source,
        };

        let contents = std::fs::read_to_string(path).map_err(|e| load_err(Box::new(e)))?;
        let artifact: SessionArtifact =
            serde_json::from_str(&contents).map_err(|e| load_err(Box::new(e)))?;

        tracing::debug!(
            "Loaded {} messages from {}",
            artifact.conversation.len(),
            path.display()
        );

        Ok((
            Conversation::from_messages(artifact.conversation),
            artifact.metadata,
        ))
    }

    fn ensure_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.dir).map_err(ChatError::Io)?;
        Ok(())
    }

    /// Pick `log_<stamp>` or, if already taken, `log_<stamp>_<n>`
    fn unique_base_name(&self, now: &DateTime<Local>) -> String {
        let stamp = format!("{}{}", ARTIFACT_PREFIX, now.format(NAME_FORMAT));
        let mut base = stamp.clone();
        let mut n = 2;
        while self.dir.join(format!("{}.json", base)).exists()
            || self.dir.join(format!("{}.txt", base)).exists()
        {
            base = format!("{}_{}", stamp, n);
            n += 1;
        }
        base
    }

    fn write_artifact(
        &self,
        path: &Path,
        conversation: &Conversation,
        now: &DateTime<Local>,
    ) -> Result<()> {
        let artifact = build_artifact(conversation, now);
        let json = serde_json::to_string_pretty(&artifact).map_err(ChatError::Serialization)?;
        std::fs::write(path, json).map_err(ChatError::Io)?;
        tracing::debug!(
            "Wrote {} messages to {}",
            artifact.metadata.total_messages,
            path.display()
        );
        Ok(())
    }
}

/// Summarize every artifact among `entries`
///
/// Entries that cannot be enumerated, read or parsed are logged and left
/// out; they never fail the scan.
pub fn scan_entries<I>(entries: I) -> Vec<SessionSummary>
where
    I: IntoIterator<Item = io::Result<PathBuf>>,
{
    let mut sessions = Vec::new();
    for entry in entries {
        let filepath = match entry {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!("Skipping unreadable directory entry: {}", e);
                continue;
            }
        };

        let filename = match filepath.file_name() {
            Some(name) => name.to_string_lossy().to_string(),
            None => continue,
        };
        if !is_artifact_name(&filename) {
            continue;
        }

        let modified = std::fs::metadata(&filepath).and_then(|m| m.modified());
        let contents = std::fs::read_to_string(&filepath);

        match inspect_candidate(&filename, filepath, modified, contents) {
            ScanOutcome::Listed(summary) => sessions.push(summary),
            ScanOutcome::Skipped { filename, reason } => {
                tracing::warn!("Skipping session file {}: {}", filename, reason);
            }
        }
    }
    sessions
}

/// True for file names that look like structured artifacts
pub fn is_artifact_name(filename: &str) -> bool {
    filename.starts_with(ARTIFACT_PREFIX) && filename.ends_with(".json")
}

/// Build the structured artifact for a conversation saved at `now`
pub fn build_artifact(conversation: &Conversation, now: &DateTime<Local>) -> SessionArtifact {
    SessionArtifact {
        metadata: SessionMetadata {
            saved_at: now.format(SAVED_AT_FORMAT).to_string(),
            timestamp: now.format(ISO_FORMAT).to_string(),
            total_messages: conversation.len(),
        },
        conversation: conversation.messages().to_vec(),
    }
}

/// Render the human-readable transcript
///
/// Every message carries the save time, not its creation time.
pub fn render_transcript(conversation: &Conversation, now: &DateTime<Local>) -> String {
    let clock = now.format("%H:%M:%S").to_string();
    let mut out = String::new();

    let _ = writeln!(
        out,
        "CONVERSACIÓN GUARDADA EL {}",
        now.format(SAVED_AT_FORMAT)
    );
    let _ = writeln!(out, "{}", "=".repeat(HEADER_RULE_WIDTH));
    out.push('\n');

    for Message { role, content } in conversation {
        let _ = writeln!(out, "[{} - {}] {}", role.label(), clock, content);
        let _ = writeln!(out, "{}", "-".repeat(MESSAGE_RULE_WIDTH));
    }

    out
}

/// Turn one directory entry into a listing outcome
///
/// Kept free of filesystem access so every skip path can be tested directly.
pub fn inspect_candidate(
    filename: &str,
    filepath: PathBuf,
    modified: io::Result<SystemTime>,
    contents: io::Result<String>,
) -> ScanOutcome {
    let skipped = |reason: String| ScanOutcome::Skipped {
        filename: filename.to_string(),
        reason,
    };

    let modified = match modified {
        Ok(time) => time,
        Err(e) => return skipped(format!("cannot stat file: {}", e)),
    };
    let contents = match contents {
        Ok(contents) => contents,
        Err(e) => return skipped(format!("cannot read file: {}", e)),
    };
    let data: serde_json::Value = match serde_json::from_str(&contents) {
        Ok(data) => data,
        Err(e) => return skipped(format!("invalid JSON: {}", e)),
    };
    let Some(root) = data.as_object() else {
        return skipped("top-level value is not an object".to_string());
    };

    let empty = serde_json::Map::new();
    let metadata = match root.get("metadata") {
        None => &empty,
        Some(serde_json::Value::Object(map)) => map,
        Some(_) => return skipped("metadata is not an object".to_string()),
    };

    ScanOutcome::Listed(SessionSummary {
        filename: filename.to_string(),
        filepath,
        modified_time: DateTime::<Local>::from(modified),
        total_messages: metadata
            .get("total_messages")
            .and_then(|v| v.as_u64())
            .unwrap_or(0),
        saved_at: metadata
            .get("saved_at")
            .and_then(|v| v.as_str())
            .unwrap_or(UNKNOWN_SAVED_AT)
            .to_string(),
    })
}
