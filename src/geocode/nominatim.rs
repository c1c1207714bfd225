//! Nominatim geocoding provider (OpenStreetMap)
//!
//! Uses the free Nominatim search API. Fair use requires a User-Agent
//! identifying the client; pacing between calls is the caller's job.

use crate::coord::Coordinate;
use crate::error::{Error, Result};
use crate::geocode::{AddressCandidate, GeocodeClient};
use reqwest::StatusCode;
use serde::Deserialize;
use std::collections::HashMap;

/// Nominatim-backed geocoding client
#[derive(Debug, Clone)]
pub struct NominatimClient {
    client: reqwest::Client,
    base_url: String,
    limit: usize,
    accept_language: String,
}

/// Nominatim search response item (jsonv2)
#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
    display_name: String,
    #[serde(default)]
    address: HashMap<String, String>,
}

impl NominatimClient {
    /// Create a new Nominatim client identifying itself as `user_agent`
    pub fn new(user_agent: &str) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: crate::constants::api::NOMINATIM_URL.to_string(),
            limit: 5,
            accept_language: "fr".to_string(),
        }
    }

    /// Point the client at a different endpoint (tests, self-hosted mirrors)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Cap the number of candidates per search
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Language for returned address labels
    pub fn with_accept_language(mut self, language: impl Into<String>) -> Self {
        self.accept_language = language.into();
        self
    }

    /// Parse lat/lng strings to a coordinate
    fn parse_coords(lat: &str, lng: &str) -> Result<Coordinate> {
        let lat: f64 = lat
            .parse()
            .map_err(|_| Error::MalformedResponse(format!("Invalid latitude: {}", lat)))?;
        let lng: f64 = lng
            .parse()
            .map_err(|_| Error::MalformedResponse(format!("Invalid longitude: {}", lng)))?;
        let coordinate = Coordinate::new(lat, lng);
        coordinate.validate().map_err(|e| {
            Error::MalformedResponse(format!("Coordinate out of range: {}", e))
        })?;
        Ok(coordinate)
    }

    /// Build a compact label from structured address fields
    ///
    /// Falls back to the provider display name when the response carries
    /// no usable structured fields.
    fn format_label(result: &NominatimResult) -> String {
        let addr = &result.address;
        let mut parts: Vec<&str> = Vec::new();

        for key in ["house_number", "road", "suburb", "postcode"] {
            if let Some(value) = addr.get(key) {
                parts.push(value);
            }
        }
        if let Some(city) = addr
            .get("city")
            .or_else(|| addr.get("town"))
            .or_else(|| addr.get("village"))
        {
            parts.push(city);
        }

        if parts.is_empty() {
            result.display_name.clone()
        } else {
            parts.join(", ")
        }
    }
}

impl GeocodeClient for NominatimClient {
    async fn search(
        &self,
        query: &str,
        country_filter: Option<&str>,
    ) -> Result<Vec<AddressCandidate>> {
        let mut url = format!(
            "{}/search?q={}&format=jsonv2&addressdetails=1&namedetails=1&limit={}&accept-language={}",
            self.base_url,
            urlencoding::encode(query),
            self.limit,
            urlencoding::encode(&self.accept_language),
        );
        if let Some(codes) = country_filter {
            url.push_str(&format!("&countrycodes={}", urlencoding::encode(codes)));
        }

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::ProviderUnavailable(format!("Nominatim request failed: {}", e)))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(Error::RateLimited);
        }
        if !status.is_success() {
            return Err(Error::ProviderUnavailable(format!(
                "Nominatim returned status: {}",
                status
            )));
        }

        let results: Vec<NominatimResult> = response.json().await.map_err(|e| {
            Error::MalformedResponse(format!("Failed to parse Nominatim response: {}", e))
        })?;

        results
            .into_iter()
            .map(|result| {
                let coordinate = Self::parse_coords(&result.lat, &result.lon)?;
                Ok(AddressCandidate {
                    label: Self::format_label(&result),
                    coordinate,
                    raw_fields: result.address,
                })
            })
            .collect()
    }
}
