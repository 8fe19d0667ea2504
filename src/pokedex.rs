//! Pokedex Module
//!
//! In-memory registry of caught Pokemon, owned by the REPL session.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::models::Pokemon;

/// A Pokemon together with the moment it was caught.
#[derive(Debug, Clone)]
pub struct CaughtPokemon {
    pub pokemon: Pokemon,
    pub caught_at: DateTime<Utc>,
}

/// Caught Pokemon keyed by lowercase name.
#[derive(Debug, Default)]
pub struct Pokedex {
    entries: HashMap<String, CaughtPokemon>,
}

impl Pokedex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a catch. Returns false, leaving the registry unchanged, if the
    /// Pokemon was already caught.
    pub fn insert(&mut self, pokemon: Pokemon) -> bool {
        let name = pokemon.name.to_lowercase();
        if self.entries.contains_key(&name) {
            return false;
        }
        self.entries.insert(
            name,
            CaughtPokemon {
                pokemon,
                caught_at: Utc::now(),
            },
        );
        true
    }

    pub fn get(&self, name: &str) -> Option<&CaughtPokemon> {
        self.entries.get(&name.to_lowercase())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&name.to_lowercase())
    }

    /// Caught names in alphabetical order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
