//! PokeAPI Client
//!
//! Fetches PokeAPI resources, keyed in the cache by their full request URL.

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::cache::ExpiringCache;
use crate::error::{PokedexError, Result};
use crate::models::{LocationAreaDetail, LocationAreaPage, Pokemon};

/// Client for the PokeAPI REST service.
///
/// Every request goes through [`fetch_raw`](PokeApiClient::fetch_raw), which
/// answers from the cache when it can and stores fresh bodies otherwise. The
/// cache only ever sees raw bytes; decoding happens here.
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    /// HTTP client for making requests
    http: Client,
    /// Response cache keyed by URL
    cache: ExpiringCache,
    /// API root without a trailing slash
    base_url: String,
}

impl PokeApiClient {
    /// Creates a client for the API rooted at `base_url`.
    pub fn new(base_url: impl Into<String>, cache: ExpiringCache) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            cache,
            base_url,
        }
    }

    /// The response cache shared by this client.
    pub fn cache(&self) -> &ExpiringCache {
        &self.cache
    }

    /// URL of the first page of location areas.
    pub fn location_areas_url(&self) -> String {
        format!("{}/location-area/", self.base_url)
    }

    /// URL of a single location area.
    pub fn location_area_url(&self, name: &str) -> String {
        format!("{}/location-area/{}", self.base_url, name)
    }

    /// URL of a single Pokemon.
    pub fn pokemon_url(&self, name: &str) -> String {
        format!("{}/pokemon/{}", self.base_url, name)
    }

    /// Fetches a page of location areas.
    ///
    /// `page_url` is a `next`/`previous` link from an earlier page; `None`
    /// fetches the first page.
    pub async fn fetch_location_areas(&self, page_url: Option<&str>) -> Result<LocationAreaPage> {
        let url = match page_url {
            Some(url) => url.to_string(),
            None => self.location_areas_url(),
        };
        self.fetch_json(&url).await
    }

    /// Fetches the encounter list of a location area.
    pub async fn fetch_location_area(&self, name: &str) -> Result<LocationAreaDetail> {
        self.fetch_json(&self.location_area_url(name)).await
    }

    /// Fetches a Pokemon by name.
    pub async fn fetch_pokemon(&self, name: &str) -> Result<Pokemon> {
        self.fetch_json(&self.pokemon_url(name)).await
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let body = self.fetch_raw(url).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    // == Fetch Raw ==
    /// Returns the body for `url`, from the cache or from the network.
    ///
    /// Only 200 responses are cached.
    pub async fn fetch_raw(&self, url: &str) -> Result<Vec<u8>> {
        if let Some(body) = self.cache.get(url).await {
            debug!(url, "Cache hit");
            return Ok(body);
        }
        debug!(url, "Cache miss, fetching from API");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            warn!(url, status = status.as_u16(), "PokeAPI request failed");
            return Err(PokedexError::UnexpectedStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?.to_vec();
        self.cache.add(url, body.clone()).await;
        Ok(body)
    }
}
