/*!
Command handlers for the CLI

- `chat`             — startup flow and the interactive loop entry point
- `input`            — line input abstraction over rustyline
- `selector`         — start menu and saved-session picker
- `session`          — per-line dispatch and chat turns
- `special_commands` — classification of input lines
*/

pub mod input;
pub mod selector;
pub mod session;
pub mod special_commands;

// Chat command handler
pub mod chat {
    //! Interactive chat entry point.
    //!
    //! Builds the provider and store from configuration, decides whether to
    //! start fresh or resume a saved conversation, then runs the loop.

    use crate::commands::input::{LineSource, RustylineSource};
    use crate::commands::selector::{choose_session, prompt_start_choice, StartChoice};
    use crate::commands::session::ChatSession;
    use crate::config::Config;
    use crate::conversation::Conversation;
    use crate::error::{ChatError, Result};
    use crate::providers::{create_provider, Credentials, Provider};
    use crate::storage::SessionStore;
    use colored::Colorize;

    /// Start interactive chat mode
    ///
    /// Returns `Ok(())` both on a normal exit and when the user interrupts a
    /// prompt; an interrupt skips the final save.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use statefulchat::commands::chat;
    /// use statefulchat::config::Config;
    ///
    /// # async fn example() -> statefulchat::error::Result<()> {
    /// chat::run_chat(Config::default()).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run_chat(config: Config) -> Result<()> {
        tracing::info!("Starting interactive chat mode");

        let credentials = Credentials::from_env(&config.provider.api_key_env);
        let provider = create_provider(&config.provider, credentials)?;
        let store = SessionStore::new(&config.storage.logs_dir);
        let mut input = RustylineSource::new()?;

        let system_prompt = config.chat.system_prompt.clone();
        match converse(provider, store, &mut input, &system_prompt).await {
            Err(e) if ChatError::is_interrupt(&e) => {
                println!("\n\n{}", "Exiting...".bold().yellow());
                Ok(())
            }
            other => other,
        }
    }

    async fn converse(
        provider: Box<dyn Provider>,
        store: SessionStore,
        input: &mut dyn LineSource,
        system_prompt: &str,
    ) -> Result<()> {
        let conversation = start_conversation(input, &store, system_prompt)?;
        let mut session = ChatSession::new(provider, store, conversation);
        session.run(input).await
    }

    /// Produce the initial conversation from the start menu
    ///
    /// Any failure to list or load saved sessions falls back to a fresh
    /// conversation seeded with `system_prompt`.
    ///
    /// # Errors
    ///
    /// Returns `ChatError::Interrupted` if the user cancels a prompt.
    pub fn start_conversation(
        input: &mut dyn LineSource,
        store: &SessionStore,
        system_prompt: &str,
    ) -> Result<Conversation> {
        let new_conversation = || {
            println!("\n{}", "Starting a new chat...".bold().green());
            Conversation::seeded(system_prompt)
        };

        if prompt_start_choice(input)? == StartChoice::New {
            return Ok(new_conversation());
        }

        let sessions = store.list_sessions().unwrap_or_else(|e| {
            tracing::warn!("Failed to list saved sessions: {}", e);
            Vec::new()
        });

        let Some(selected) = choose_session(&sessions, input)? else {
            return Ok(new_conversation());
        };

        match SessionStore::load(&selected.filepath) {
            Ok((conversation, metadata)) => {
                println!("\n{}", "Conversation loaded successfully!".bold().green());
                println!("File:     {}", selected.filename);
                println!("Messages: {}", metadata.total_messages);
                println!("Saved:    {}\n", metadata.saved_at);
                Ok(conversation)
            }
            Err(e) => {
                eprintln!("\n{} {}", "Error loading conversation:".bold().red(), e);
                Ok(new_conversation())
            }
        }
    }

}
