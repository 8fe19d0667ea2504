//! API Module
//!
//! HTTP access to PokeAPI, answered from the expiring cache when possible.
//!
//! # Endpoints
//! - `GET /location-area/` - Paged list of location areas
//! - `GET /location-area/{name}` - Pokemon encountered in an area
//! - `GET /pokemon/{name}` - Details of a single Pokemon

pub mod client;

pub use client::PokeApiClient;
