//! StatefulChat - interactive chat CLI library
//!
//! This library provides a chat client that keeps a linear conversation with
//! a language model, saves it to disk, and can resume a saved conversation.
//!
//! # Architecture
//!
//! - `conversation`: the ordered, append-only message log
//! - `storage`: text and JSON snapshots, session listing, and loading
//! - `commands`: start menu, session picker, and the interactive loop
//! - `providers`: completion provider abstraction and the OpenAI implementation
//! - `config`: configuration management and validation
//! - `error`: error types and result aliases
//! - `cli`: command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use statefulchat::conversation::Conversation;
//! use statefulchat::storage::SessionStore;
//!
//! # fn main() -> statefulchat::error::Result<()> {
//! let mut conversation = Conversation::seeded("You are a helpful assistant.");
//! conversation.add_user_message("Hello");
//!
//! let store = SessionStore::new("logs");
//! let saved = store.save_full(&conversation)?;
//! let (loaded, _metadata) = SessionStore::load(&saved.json_path)?;
//! assert_eq!(loaded, conversation);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod conversation;
pub mod error;
pub mod providers;
pub mod storage;

// Re-export commonly used types
pub use config::Config;
pub use conversation::{Conversation, Message, Role};
pub use error::{ChatError, Result};
pub use storage::SessionStore;

#[cfg(test)]
pub mod test_utils;
