//! Pokedex - A command-line Pokedex explorer
//!
//! Browses PokeAPI from a REPL, memoizing responses in a time-expiring cache.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod pokedex;
pub mod repl;
pub mod tasks;

pub use api::PokeApiClient;
pub use cache::ExpiringCache;
pub use config::Config;
pub use error::{PokedexError, Result};
