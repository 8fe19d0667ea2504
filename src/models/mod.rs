//! Response models for the PokeAPI
//!
//! This module defines the DTOs (Data Transfer Objects) decoded from the raw
//! response bodies held in the cache.

pub mod responses;

// Re-export commonly used types
pub use responses::{
    LocationAreaDetail, LocationAreaPage, NamedResource, Pokemon, PokemonEncounter, PokemonStat,
    PokemonType,
};
