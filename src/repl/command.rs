//! Command parsing for the REPL.

/// Command names and their help text, in the order `help` lists them.
pub const COMMANDS: &[(&str, &str)] = &[
    ("catch", "Attempts to catch a Pokemon by name"),
    ("exit", "Exit the Pokedex"),
    ("explore", "Explore a location area to find Pokemon"),
    ("help", "Displays a help message"),
    ("inspect", "Displays details about a caught Pokemon"),
    ("map", "Displays the next 20 location areas"),
    ("mapb", "Displays the previous 20 location areas"),
    ("pokedex", "Lists all Pokemon you have caught"),
];

/// A parsed line of input.
///
/// Argument-taking commands keep their argument optional here; a missing one
/// is reported when the command runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Exit,
    Map,
    MapBack,
    Explore(Option<String>),
    Catch(Option<String>),
    Inspect(Option<String>),
    Pokedex,
    Unknown(String),
}

impl Command {
    /// Parses cleaned input words. Returns `None` for an empty line.
    ///
    /// Words past the first argument are ignored.
    pub fn parse(words: &[String]) -> Option<Self> {
        let (name, args) = words.split_first()?;
        let arg = args.first().cloned();

        let command = match name.as_str() {
            "help" => Self::Help,
            "exit" => Self::Exit,
            "map" => Self::Map,
            "mapb" => Self::MapBack,
            "explore" => Self::Explore(arg),
            "catch" => Self::Catch(arg),
            "inspect" => Self::Inspect(arg),
            "pokedex" => Self::Pokedex,
            other => Self::Unknown(other.to_string()),
        };
        Some(command)
    }
}
