//! Error types for the Pokedex
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Pokedex Error Enum ==
/// Unified error type for the cache, the API client and the REPL.
#[derive(Error, Debug)]
pub enum PokedexError {
    /// Cache constructed with a zero time-to-live
    #[error("Cache interval must be greater than zero")]
    InvalidInterval,

    /// Cache constructed outside a tokio runtime, so the reaper cannot run
    #[error("Cache requires a running tokio runtime")]
    NoRuntime,

    /// Transport-level HTTP failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Remote answered with something other than 200 OK
    #[error("Unexpected status {status} from {url}")]
    UnexpectedStatus { url: String, status: u16 },

    /// Response body was not the JSON we expected
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Command invoked without its required argument
    #[error("Please provide {0}")]
    MissingArgument(&'static str),

    /// Writing REPL output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// == Result Type Alias ==
/// Convenience Result type for the Pokedex.
pub type Result<T> = std::result::Result<T, PokedexError>;
