//! Error types for StatefulChat
//!
//! This module defines the error taxonomy used throughout the application,
//! using `thiserror` for ergonomic error handling.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for StatefulChat operations
///
/// Every failure below the interactive loop is converted into one of these
/// variants and reported to the user. Only [`ChatError::Interrupted`] is
/// allowed to end a session.
#[derive(Error, Debug)]
pub enum ChatError {
    /// Invalid menu choice or session index
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Directory or file create/write failures
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A structured artifact could not be loaded
    #[error("Failed to load conversation from {}: {source}", path.display())]
    Load {
        /// Path of the artifact that failed to load
        path: PathBuf,
        /// Underlying cause (missing file, unreadable, malformed JSON)
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Remote completion failure of any kind
    #[error("Completion error: {0}")]
    Gateway(String),

    /// No credential was available when the gateway was first used
    #[error("Missing credentials: environment variable {0} is not set")]
    MissingCredentials(String),

    /// The user cancelled a blocking prompt (Ctrl-C / Ctrl-D)
    #[error("Interrupted by user")]
    Interrupted,

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ChatError {
    /// Returns true if `err` wraps [`ChatError::Interrupted`]
    pub fn is_interrupt(err: &anyhow::Error) -> bool {
        matches!(err.downcast_ref::<ChatError>(), Some(ChatError::Interrupted))
    }
}

/// Result type alias for StatefulChat operations
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let error = ChatError::Validation("enter 1 or 2".to_string());
        assert_eq!(error.to_string(), "Invalid input: enter 1 or 2");
    }

    #[test]
    fn test_gateway_error_display() {
        let error = ChatError::Gateway("rate limited".to_string());
        assert_eq!(error.to_string(), "Completion error: rate limited");
    }

    #[test]
    fn test_load_error_carries_path_and_cause() {
        let error = ChatError::Load {
            path: PathBuf::from("logs/log_20240101_120000.json"),
            source: "expected value at line 1".into(),
        };
        let s = error.to_string();
        assert!(s.contains("logs/log_20240101_120000.json"));
        assert!(s.contains("expected value at line 1"));
    }

    #[test]
    fn test_missing_credentials_display() {
        let error = ChatError::MissingCredentials("OPENAI_API_KEY".to_string());
        assert_eq!(
            error.to_string(),
            "Missing credentials: environment variable OPENAI_API_KEY is not set"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error: ChatError = io_error.into();
        assert!(matches!(error, ChatError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("{invalid").unwrap_err();
        let error: ChatError = json_error.into();
        assert!(matches!(error, ChatError::Serialization(_)));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>("a: [b").unwrap_err();
        let error: ChatError = yaml_error.into();
        assert!(matches!(error, ChatError::Yaml(_)));
        assert!(error.to_string().starts_with("YAML error: "));
    }

    #[test]
    fn test_is_interrupt() {
        let err: anyhow::Error = ChatError::Interrupted.into();
        assert!(ChatError::is_interrupt(&err));

        let other: anyhow::Error = ChatError::Gateway("x".into()).into();
        assert!(!ChatError::is_interrupt(&other));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ChatError>();
    }
}
