//! Conversation log
//!
//! An ordered, append-only sequence of role-tagged messages. The whole log is
//! sent to the completion provider on every chat turn, so ordering defines the
//! conversational context.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default system prompt used to seed a new session
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Role of a message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions that seed the session
    System,
    /// Text typed by the user
    User,
    /// Completion returned by the provider
    Assistant,
}

impl Role {
    /// Wire name used by the JSON artifact and the provider API
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }

    /// Fixed label used in transcripts and history rendering
    pub fn label(&self) -> &'static str {
        match self {
            Self::System => "SISTEMA",
            Self::User => "USUARIO",
            Self::Assistant => "ASISTENTE",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single role-tagged message
///
/// # Examples
///
/// ```
/// use statefulchat::conversation::{Message, Role};
///
/// let msg = Message::user("Hello");
/// assert_eq!(msg.role, Role::User);
/// assert_eq!(msg.content, "Hello");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message sender
    pub role: Role,
    /// Message text
    pub content: String,
}

impl Message {
    /// Creates a new message with an explicit role
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Creates a new system message
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Creates a new user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Creates a new assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// Ordered message log for one session
///
/// Messages can only be appended. The log is replaced wholesale when a saved
/// session is loaded, never edited in place.
///
/// # Examples
///
/// ```
/// use statefulchat::conversation::{Conversation, Role};
///
/// let mut conversation = Conversation::seeded("You are a helpful assistant.");
/// conversation.add_user_message("Hello");
/// conversation.add_assistant_message("Hi there");
/// assert_eq!(conversation.len(), 3);
/// assert_eq!(conversation.messages()[0].role, Role::System);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    /// Creates an empty conversation
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a conversation seeded with a single system message
    pub fn seeded(system_prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::system(system_prompt)],
        }
    }

    /// Builds a conversation from already-ordered messages (used on load)
    pub fn from_messages(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    /// Appends a user message
    pub fn add_user_message(&mut self, content: impl Into<String>) {
        self.messages.push(Message::user(content));
    }

    /// Appends an assistant message
    pub fn add_assistant_message(&mut self, content: impl Into<String>) {
        self.messages.push(Message::assistant(content));
    }

    /// All messages in turn order
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of messages
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// True if no message has been added yet
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Iterates over messages in turn order
    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }
}

impl<'a> IntoIterator for &'a Conversation {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_conversation_has_single_system_message() {
        let conversation = Conversation::seeded(DEFAULT_SYSTEM_PROMPT);
        assert_eq!(conversation.len(), 1);
        assert_eq!(
            conversation.messages()[0],
            Message::system("You are a helpful assistant.")
        );
    }

    #[test]
    fn test_messages_append_in_order() {
        let mut conversation = Conversation::seeded(DEFAULT_SYSTEM_PROMPT);
        conversation.add_user_message("Hello");
        conversation.add_assistant_message("Hi there");

        let roles: Vec<Role> = conversation.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::System, Role::User, Role::Assistant]);
        assert_eq!(conversation.messages()[1].content, "Hello");
        assert_eq!(conversation.messages()[2].content, "Hi there");
    }

    #[test]
    fn test_new_conversation_is_empty() {
        let conversation = Conversation::new();
        assert!(conversation.is_empty());
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&Message::assistant("ok")).unwrap();
        assert_eq!(json, r#"{"role":"assistant","content":"ok"}"#);
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let result = serde_json::from_str::<Message>(r#"{"role":"tool","content":"x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_role_labels() {
        assert_eq!(Role::System.label(), "SISTEMA");
        assert_eq!(Role::User.label(), "USUARIO");
        assert_eq!(Role::Assistant.label(), "ASISTENTE");
    }
}
