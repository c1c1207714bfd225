//! Address geocoding
//!
//! Turns free-text address input into coordinate candidates via an
//! external provider. The client never retries on its own; retry and
//! rate-limit pacing belong to the suggestion layer.

pub mod nominatim;

use crate::coord::Coordinate;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single geocoding candidate
///
/// Candidates are ordered by provider relevance and discarded once the
/// user picks one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressCandidate {
    /// Human-readable label built from structured address fields
    pub label: String,
    pub coordinate: Coordinate,
    /// Raw structured address fields as returned by the provider
    #[serde(default)]
    pub raw_fields: HashMap<String, String>,
}

/// Trait for geocoding providers
pub trait GeocodeClient: Send + Sync {
    /// Search for address candidates matching a free-text query
    ///
    /// Returns at most the configured number of candidates, ordered by
    /// provider relevance. Fails with `ProviderUnavailable` on network or
    /// non-2xx errors, `RateLimited` on throttling, `MalformedResponse`
    /// on an unparsable payload.
    fn search(
        &self,
        query: &str,
        country_filter: Option<&str>,
    ) -> impl std::future::Future<Output = Result<Vec<AddressCandidate>>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_serialization() {
        let candidate = AddressCandidate {
            label: "10 Rue de Rivoli, 75004, Paris".to_string(),
            coordinate: Coordinate::new(48.8556, 2.3603),
            raw_fields: HashMap::from([("road".to_string(), "Rue de Rivoli".to_string())]),
        };

        let json = serde_json::to_string(&candidate).unwrap();
        let parsed: AddressCandidate = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.label, candidate.label);
        assert_eq!(parsed.coordinate.lat, 48.8556);
        assert_eq!(parsed.raw_fields.get("road").unwrap(), "Rue de Rivoli");
    }
}
