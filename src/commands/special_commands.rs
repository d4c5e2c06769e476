//! Special commands parser for interactive chat mode
//!
//! Commands are prefixed with `/` and are case-insensitive. Anything else is
//! a message for the model.

/// Special commands that can be executed during interactive chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Show the conversation so far
    History,
    /// Toggle between raw text and rendered HTML replies
    ToggleHtml,
    /// Display help information
    Help,
    /// Exit the session
    Exit,
    /// Unrecognized `/command`
    Unknown(String),
    /// Not a special command
    None,
}

/// Parse a line of input into a special command
///
/// # Examples
///
/// ```
/// use flashgate::commands::special_commands::{parse_special_command, SpecialCommand};
///
/// assert_eq!(parse_special_command("/EXIT"), SpecialCommand::Exit);
/// assert_eq!(parse_special_command("hello"), SpecialCommand::None);
/// ```
pub fn parse_special_command(input: &str) -> SpecialCommand {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return SpecialCommand::None;
    }

    match trimmed.to_lowercase().as_str() {
        "/history" => SpecialCommand::History,
        "/html" => SpecialCommand::ToggleHtml,
        "/help" | "/?" => SpecialCommand::Help,
        "/exit" | "/quit" => SpecialCommand::Exit,
        _ => SpecialCommand::Unknown(trimmed.to_string()),
    }
}

/// Print the list of special commands
pub fn print_help() {
    println!("Special commands:");
    println!("  /history   Show the conversation so far");
    println!("  /html      Toggle rendered HTML output");
    println!("  /help      Show this help");
    println!("  /exit      Leave the chat");
    println!();
}
