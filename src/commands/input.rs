//! Line input for the interactive prompts
//!
//! The menu, session picker and chat loop all read through [`LineSource`], so
//! they can be driven by rustyline in a terminal or by a script in tests.

use crate::error::{ChatError, Result};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::collections::VecDeque;

/// Source of interactive input lines
pub trait LineSource {
    /// Show `prompt` and block until a line is entered
    ///
    /// # Errors
    ///
    /// Returns `ChatError::Interrupted` when the user cancels (Ctrl-C or
    /// end of input).
    fn read_line(&mut self, prompt: &str) -> Result<String>;

    /// Remember an accepted line for recall at later prompts
    fn add_history(&mut self, _line: &str) {}
}

/// Terminal input backed by rustyline
pub struct RustylineSource {
    editor: DefaultEditor,
}

impl RustylineSource {
    /// Create a new line editor
    pub fn new() -> Result<Self> {
        let editor = DefaultEditor::new().map_err(|e| ChatError::Io(readline_io_error(e)))?;
        Ok(Self { editor })
    }
}

impl LineSource for RustylineSource {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(line),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                Err(ChatError::Interrupted.into())
            }
            Err(err) => {
                tracing::error!("Readline error: {:?}", err);
                Err(ChatError::Io(readline_io_error(err)).into())
            }
        }
    }

    fn add_history(&mut self, line: &str) {
        if let Err(e) = self.editor.add_history_entry(line) {
            tracing::debug!("Failed to add history entry: {}", e);
        }
    }
}

fn readline_io_error(err: ReadlineError) -> std::io::Error {
    match err {
        ReadlineError::Io(e) => e,
        other => std::io::Error::new(std::io::ErrorKind::Other, other.to_string()),
    }
}

/// Pre-recorded input, returned one line per prompt
///
/// Once the script runs out every further read reports an interrupt, the
/// same as end of input on a terminal.
///
/// # Examples
///
/// ```
/// use statefulchat::commands::input::{LineSource, ScriptedInput};
///
/// let mut input = ScriptedInput::new(["1", "hello"]);
/// assert_eq!(input.read_line("> ").unwrap(), "1");
/// assert_eq!(input.read_line("> ").unwrap(), "hello");
/// assert!(input.read_line("> ").is_err());
/// ```
#[derive(Debug, Default, Clone)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
    prompts: Vec<String>,
    history: Vec<String>,
}

impl ScriptedInput {
    /// Create a script from the given lines
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
            history: Vec::new(),
        }
    }

    /// Prompts shown so far, in order
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Lines added to history so far
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Lines not yet consumed
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl LineSource for ScriptedInput {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        self.prompts.push(prompt.to_string());
        self.lines
            .pop_front()
            .ok_or_else(|| ChatError::Interrupted.into())
    }

    fn add_history(&mut self, line: &str) {
        self.history.push(line.to_string());
    }
}
