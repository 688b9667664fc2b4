//! Interactive chat session
//!
//! Owns the conversation for the lifetime of the process and routes each
//! input line to a control command or a chat turn.

use crate::commands::input::LineSource;
use crate::commands::special_commands::{command_summary, parse_chat_command, ChatCommand};
use crate::conversation::{Conversation, Role};
use crate::error::Result;
use crate::providers::Provider;
use crate::storage::SessionStore;
use colored::{ColoredString, Colorize};

/// Prompt shown for each chat line
pub const CHAT_PROMPT: &str = "You: ";

/// What the loop should do after a line was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    /// Read the next line
    Continue,
    /// Leave the loop
    Exit,
}

/// Chat session state
///
/// The conversation only grows: a user message on every chat turn, followed
/// by an assistant message when the provider succeeds.
pub struct ChatSession {
    provider: Box<dyn Provider>,
    store: SessionStore,
    conversation: Conversation,
}

impl ChatSession {
    /// Create a session around an initial conversation
    pub fn new(
        provider: Box<dyn Provider>,
        store: SessionStore,
        conversation: Conversation,
    ) -> Self {
        Self {
            provider,
            store,
            conversation,
        }
    }

    /// Current conversation
    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Store used for save commands
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Read and handle lines until the user leaves
    ///
    /// # Errors
    ///
    /// Returns `ChatError::Interrupted` if the user cancels at the prompt; in
    /// that case nothing is saved.
    pub async fn run(&mut self, input: &mut dyn LineSource) -> Result<()> {
        println!(
            "{}\n",
            format!("Chat started with {}. {}", self.provider.model(), command_summary())
                .bold()
                .blue()
        );

        loop {
            let line = input.read_line(CHAT_PROMPT)?;
            if !line.trim().is_empty() {
                input.add_history(line.trim());
            }

            if self.handle_line(&line).await == LineOutcome::Exit {
                break;
            }
        }

        println!("\n{}", "Goodbye!".bold().yellow());
        Ok(())
    }

    /// Handle one input line
    ///
    /// Errors from saving or from the provider are reported to the user and
    /// never end the session.
    pub async fn handle_line(&mut self, line: &str) -> LineOutcome {
        match parse_chat_command(line) {
            ChatCommand::Exit => {
                self.save_full_and_report("Conversation saved automatically:");
                LineOutcome::Exit
            }
            ChatCommand::ShowHistory => {
                print_history(&self.conversation);
                LineOutcome::Continue
            }
            ChatCommand::SaveFull => {
                self.save_full_and_report("Conversation saved:");
                LineOutcome::Continue
            }
            ChatCommand::SaveJson => {
                match self.store.save_json_only(&self.conversation) {
                    Ok(path) => println!(
                        "\n{} {}\n",
                        "Conversation saved as JSON:".bold().green(),
                        path.display()
                    ),
                    Err(e) => eprintln!("\n{} {}\n", "Error saving JSON:".bold().red(), e),
                }
                LineOutcome::Continue
            }
            ChatCommand::Message => {
                match self.chat_turn(line).await {
                    Ok(reply) => println!("Bot: {}", reply),
                    Err(e) => eprintln!("{} {}", "Error:".red(), e),
                }
                LineOutcome::Continue
            }
        }
    }

    /// Send `input` to the provider with the whole conversation as context
    ///
    /// The user message stays in the conversation even if the provider fails.
    ///
    /// # Errors
    ///
    /// Returns the provider error; no assistant message is added in that case.
    pub async fn chat_turn(&mut self, input: &str) -> Result<String> {
        self.conversation.add_user_message(input);

        let response = self.provider.complete(self.conversation.messages()).await?;
        if let Some(usage) = response.usage {
            tracing::debug!("Turn used {} tokens", usage.total_tokens);
        }

        let reply = response.content.trim().to_string();
        self.conversation.add_assistant_message(reply.clone());
        Ok(reply)
    }

    fn save_full_and_report(&self, heading: &str) {
        match self.store.save_full(&self.conversation) {
            Ok(saved) => {
                println!("\n{}", heading.bold().green());
                println!("TXT:  {}", saved.text_path.display());
                println!("JSON: {}\n", saved.json_path.display());
            }
            Err(e) => eprintln!("\n{} {}\n", "Error saving conversation:".bold().red(), e),
        }
    }
}

/// Render each message as a titled block, in order
pub fn history_blocks(conversation: &Conversation) -> Vec<String> {
    conversation
        .iter()
        .map(|message| format!("{}\n{}", role_title(message.role), message.content))
        .collect()
}

fn role_title(role: Role) -> ColoredString {
    let title = format!("[{}]", role.label());
    match role {
        Role::System => title.bold().green(),
        Role::User => title.bold().blue(),
        Role::Assistant => title.bold().magenta(),
    }
}

/// Print the conversation history
pub fn print_history(conversation: &Conversation) {
    println!("\n{}\n", "CONVERSATION CONTEXT".bold().blue());
    for block in history_blocks(conversation) {
        println!("{}\n", block);
    }
    println!("{}\n", "End of context".dimmed());
}
