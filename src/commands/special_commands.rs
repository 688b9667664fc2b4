//! Command parser for interactive chat mode
//!
//! Each input line is either a control command or a chat message. Commands
//! are matched case-insensitively after trimming, and have English and
//! Spanish aliases.

/// Classification of one input line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatCommand {
    /// Save the full transcript and leave the session
    Exit,

    /// Print every message of the conversation
    ShowHistory,

    /// Save transcript and structured log, then continue
    SaveFull,

    /// Save only the structured log, then continue
    SaveJson,

    /// Not a command; send the line to the model
    Message,
}

/// Keywords that end the session
pub const EXIT_KEYWORDS: &[&str] = &["exit", "quit"];

/// Keywords that print the conversation history
pub const HISTORY_KEYWORDS: &[&str] = &[
    "contexto",
    "context",
    "conversación",
    "conversacion",
    "historial",
    "history",
];

/// Keywords that run a full save
pub const SAVE_KEYWORDS: &[&str] = &["guardar", "save", "exportar", "export"];

/// Keywords that run a JSON-only save
pub const JSON_KEYWORDS: &[&str] = &["json", "exportar json", "export json"];

/// Classify a user input line
///
/// First match wins: exit, history, save, json, otherwise a chat message.
///
/// # Examples
///
/// ```
/// use statefulchat::commands::special_commands::{parse_chat_command, ChatCommand};
///
/// assert_eq!(parse_chat_command("  QUIT "), ChatCommand::Exit);
/// assert_eq!(parse_chat_command("Historial"), ChatCommand::ShowHistory);
/// assert_eq!(parse_chat_command("export json"), ChatCommand::SaveJson);
/// assert_eq!(parse_chat_command("save me a seat"), ChatCommand::Message);
/// ```
pub fn parse_chat_command(input: &str) -> ChatCommand {
    let normalized = input.trim().to_lowercase();

    let matches = |keywords: &[&str]| keywords.contains(&normalized.as_str());

    if matches(EXIT_KEYWORDS) {
        ChatCommand::Exit
    } else if matches(HISTORY_KEYWORDS) {
        ChatCommand::ShowHistory
    } else if matches(SAVE_KEYWORDS) {
        ChatCommand::SaveFull
    } else if matches(JSON_KEYWORDS) {
        ChatCommand::SaveJson
    } else {
        ChatCommand::Message
    }
}

/// One-line summary of the commands, shown when a session starts
pub fn command_summary() -> String {
    format!(
        "Commands: '{}' to save and leave, '{}' to show the history, '{}' to save, '{}' to save JSON only",
        EXIT_KEYWORDS.join("' / '"),
        HISTORY_KEYWORDS[4],
        SAVE_KEYWORDS[1],
        JSON_KEYWORDS[0]
    )
}
