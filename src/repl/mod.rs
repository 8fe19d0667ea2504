//! REPL Module
//!
//! Turns lines typed at the `Pokedex > ` prompt into commands and runs them
//! against a [`Session`].

mod command;
mod session;

pub use command::{Command, COMMANDS};
pub use session::{catch_succeeds, Outcome, Session};

/// Prompt printed before each line of input.
pub const PROMPT: &str = "Pokedex > ";

/// Trims, lowercases and splits a line on whitespace.
pub fn clean_input(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}
