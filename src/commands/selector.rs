//! Start menu and saved-session picker
//!
//! Both prompts repeat until they get valid input. An interrupt is returned
//! as `ChatError::Interrupted` for the caller to end the program.

use crate::commands::input::LineSource;
use crate::error::{ChatError, Result};
use crate::storage::SessionSummary;
use colored::Colorize;
use prettytable::{format, Table};

/// How the session should begin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartChoice {
    /// Fresh conversation seeded with the system prompt
    New,
    /// Pick a saved conversation
    Resume,
}

/// Parse the start menu answer
///
/// # Errors
///
/// Returns `ChatError::Validation` for anything other than `1` or `2`.
pub fn parse_start_choice(input: &str) -> std::result::Result<StartChoice, ChatError> {
    match input.trim() {
        "1" => Ok(StartChoice::New),
        "2" => Ok(StartChoice::Resume),
        other => Err(ChatError::Validation(format!(
            "'{}' is not a valid option. Please enter 1 or 2.",
            other
        ))),
    }
}

/// Parse a session number
///
/// `0` cancels and yields `None`; `1..=count` yields the zero-based index.
///
/// # Errors
///
/// Returns `ChatError::Validation` for non-numeric or out-of-range input.
pub fn parse_session_index(
    input: &str,
    count: usize,
) -> std::result::Result<Option<usize>, ChatError> {
    let trimmed = input.trim();
    let number: usize = trimmed
        .parse()
        .map_err(|_| ChatError::Validation("Please enter a valid number.".to_string()))?;

    match number {
        0 => Ok(None),
        n if n <= count => Ok(Some(n - 1)),
        _ => Err(ChatError::Validation(format!(
            "Invalid number. Enter a number between 1 and {}.",
            count
        ))),
    }
}

/// Show the start menu and wait for a valid choice
///
/// # Errors
///
/// Returns `ChatError::Interrupted` if the user cancels.
pub fn prompt_start_choice(input: &mut dyn LineSource) -> Result<StartChoice> {
    println!("\n{}", "=".repeat(60));
    println!("{}", "STATEFUL CHAT - START MENU".bold().blue());
    println!("{}\n", "=".repeat(60));
    println!("Choose an option:");
    println!("1. {}", "New chat".bold().green());
    println!("2. {}\n", "Continue a previous chat".bold().blue());

    loop {
        let line = input.read_line("Enter your option (1 or 2): ")?;
        match parse_start_choice(&line) {
            Ok(choice) => return Ok(choice),
            Err(e) => println!("{}", e.to_string().red()),
        }
    }
}

/// Let the user pick one of `summaries`
///
/// Returns `Ok(None)` without prompting when there is nothing to pick, and
/// when the user enters `0`.
///
/// # Errors
///
/// Returns `ChatError::Interrupted` if the user cancels.
pub fn choose_session(
    summaries: &[SessionSummary],
    input: &mut dyn LineSource,
) -> Result<Option<SessionSummary>> {
    if summaries.is_empty() {
        println!("{}", "No previous conversations were found.".red());
        return Ok(None);
    }

    println!("\n{}", "Previous conversations:".bold().blue());
    print_session_table(summaries);

    let prompt = format!(
        "Enter the conversation number (1-{}) or '0' to cancel: ",
        summaries.len()
    );

    loop {
        let line = input.read_line(&prompt)?;
        match parse_session_index(&line, summaries.len()) {
            Ok(Some(index)) => return Ok(Some(summaries[index].clone())),
            Ok(None) => return Ok(None),
            Err(e) => println!("{}", e.to_string().red()),
        }
    }
}

/// Print saved sessions as a numbered table
pub fn print_session_table(summaries: &[SessionSummary]) {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);

    table.add_row(prettytable::row![
        "#".bold(),
        "File".bold(),
        "Saved".bold(),
        "Messages".bold(),
        "Modified".bold()
    ]);

    for (i, summary) in summaries.iter().enumerate() {
        let number = i + 1;
        let modified = summary.modified_time.format("%d/%m/%Y %H:%M:%S");
        table.add_row(prettytable::row![
            number,
            summary.filename.cyan(),
            summary.saved_at,
            summary.total_messages,
            modified
        ]);
    }

    table.printstd();
    println!();
}
