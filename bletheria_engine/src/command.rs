//! Command module
//!
//! Describes the commands a player can issue during play and turns a raw input
//! line into one of them.
use crate::normalize::{capitalize, squash_whitespace};

use variantly::Variantly;

/// Commands that can be executed by the player.
///
/// Arguments are kept as typed (whitespace squashed); each handler applies its
/// own normalization.
#[derive(Debug, Clone, PartialEq, Eq, Variantly)]
pub enum Command {
    Travel(String),
    Equip(String),
    Hint(String),
    Rooms,
    Exit,
    Invalid,
}

/// Command words offered for tab completion.
pub const COMMAND_WORDS: &[&str] = &["travel", "equip", "hint", "rooms", "exit"];

/// Split a line into its action word (capitalized) and the rest of the line.
///
/// The argument keeps every remaining word, re-joined with single spaces, so
/// multi-word room and item names survive.
pub fn split_action(input: &str) -> (String, String) {
    let trimmed = input.trim();
    match trimmed.split_once(char::is_whitespace) {
        Some((action, rest)) => (capitalize(action), squash_whitespace(rest)),
        None => (capitalize(trimmed), String::new()),
    }
}

/// Parses an input line into a `Command`. Blank or unrecognized input is `Command::Invalid`.
pub fn parse_command(input: &str) -> Command {
    let (action, argument) = split_action(input);
    match action.as_str() {
        "Travel" => Command::Travel(argument),
        "Equip" => Command::Equip(argument),
        "Hint" => Command::Hint(argument),
        "Rooms" => Command::Rooms,
        "Exit" => Command::Exit,
        _ => Command::Invalid,
    }
}
