//! Session location state
//!
//! Single source of truth for "where is this seller/buyer" within a
//! session. Local edits never touch the store; persisting is a separate,
//! explicit commit so the map can preview changes before they are saved.

use crate::constants::delivery::{MAX_RADIUS_KM, MIN_RADIUS_KM};
use crate::coord::Coordinate;
use crate::error::{Error, Result};
use crate::geocode::AddressCandidate;
use crate::geofence::SellerLocation;
use crate::store::CatalogStore;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Serializable view of the session location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationSnapshot {
    pub address: Option<String>,
    pub coordinate: Option<Coordinate>,
    pub radius_km: f64,
}

/// The current (address, coordinate, radius) triple for one session
///
/// Reads never hit the network; `load` runs once per session and
/// `commit` is the only path back to the store.
#[derive(Debug, Clone)]
pub struct LocationState {
    owner_id: Uuid,
    address: Option<String>,
    coordinate: Option<Coordinate>,
    radius_km: f64,
}

impl LocationState {
    pub fn new(owner_id: Uuid, default_radius_km: f64) -> Self {
        Self {
            owner_id,
            address: None,
            coordinate: None,
            radius_km: clamp_radius(default_radius_km),
        }
    }

    /// Load the saved location once per session
    ///
    /// A seller with nothing saved yet starts from the defaults.
    pub async fn load<S: CatalogStore>(
        store: &S,
        owner_id: Uuid,
        default_radius_km: f64,
    ) -> Result<Self> {
        let mut state = Self::new(owner_id, default_radius_km);
        if let Some(saved) = store.get_seller_location(owner_id).await? {
            state.address = Some(saved.address);
            state.coordinate = Some(saved.coordinate);
            state.radius_km = clamp_radius(saved.delivery_radius_km);
        }
        Ok(state)
    }

    pub fn owner_id(&self) -> Uuid {
        self.owner_id
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn coordinate(&self) -> Option<Coordinate> {
        self.coordinate
    }

    pub fn radius_km(&self) -> f64 {
        self.radius_km
    }

    /// Adopt a picked suggestion; the radius is left untouched
    pub fn set_from_candidate(&mut self, candidate: &AddressCandidate) {
        self.address = Some(candidate.label.clone());
        self.coordinate = Some(candidate.coordinate);
    }

    /// Manual address entry, used when suggestions are degraded
    ///
    /// Keeps the last resolved coordinate; committing still requires one.
    pub fn set_manual_address(&mut self, text: &str) {
        self.address = Some(text.trim().to_string());
    }

    /// Set the delivery radius, clamped into the allowed band
    pub fn set_radius(&mut self, km: f64) {
        self.radius_km = clamp_radius(km);
    }

    pub fn snapshot(&self) -> LocationSnapshot {
        LocationSnapshot {
            address: self.address.clone(),
            coordinate: self.coordinate,
            radius_km: self.radius_km,
        }
    }

    /// Persist the current triple to the external store
    ///
    /// An address without a resolved coordinate cannot be saved. Local
    /// state is untouched on failure; the caller may simply retry.
    pub async fn commit<S: CatalogStore>(&self, store: &S) -> Result<()> {
        let address = self
            .address
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .ok_or(Error::AddressNotResolved)?;
        let coordinate = self.coordinate.ok_or(Error::AddressNotResolved)?;
        coordinate.validate()?;

        let location = SellerLocation {
            owner_id: self.owner_id,
            address: address.to_string(),
            coordinate,
            delivery_radius_km: self.radius_km,
        };
        store.save_seller_location(&location).await
    }
}

fn clamp_radius(km: f64) -> f64 {
    if !km.is_finite() {
        return MIN_RADIUS_KM;
    }
    km.clamp(MIN_RADIUS_KM, MAX_RADIUS_KM)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use std::collections::HashMap;

    fn candidate(label: &str, lat: f64, lng: f64) -> AddressCandidate {
        AddressCandidate {
            label: label.to_string(),
            coordinate: Coordinate::new(lat, lng),
            raw_fields: HashMap::new(),
        }
    }

    #[test]
    fn test_radius_clamped_high_and_low() {
        let mut state = LocationState::new(Uuid::new_v4(), 5.0);

        state.set_radius(60.0);
        assert_eq!(state.radius_km(), 50.0);

        state.set_radius(0.0);
        assert_eq!(state.radius_km(), 1.0);

        state.set_radius(-3.0);
        assert_eq!(state.radius_km(), 1.0);

        state.set_radius(12.5);
        assert_eq!(state.radius_km(), 12.5);
    }

    #[test]
    fn test_candidate_updates_address_not_radius() {
        let mut state = LocationState::new(Uuid::new_v4(), 5.0);
        state.set_radius(20.0);

        state.set_from_candidate(&candidate("Paris", 48.8566, 2.3522));

        assert_eq!(state.address(), Some("Paris"));
        assert_eq!(state.coordinate().unwrap().lat, 48.8566);
        assert_eq!(state.radius_km(), 20.0);
    }

    #[test]
    fn test_manual_address_keeps_coordinate() {
        let mut state = LocationState::new(Uuid::new_v4(), 5.0);
        state.set_from_candidate(&candidate("Paris", 48.8566, 2.3522));

        state.set_manual_address("  12 Rue du Bac, Paris  ");

        assert_eq!(state.address(), Some("12 Rue du Bac, Paris"));
        assert!(state.coordinate().is_some());
    }

    #[tokio::test]
    async fn test_commit_requires_resolved_coordinate() {
        let store = MemoryStore::new();
        let mut state = LocationState::new(Uuid::new_v4(), 5.0);
        state.set_manual_address("typed but never resolved");

        let err = state.commit(&store).await.unwrap_err();
        assert!(matches!(err, Error::AddressNotResolved));
        assert!(store
            .get_seller_location(state.owner_id())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_commit_roundtrip() {
        let store = MemoryStore::new();
        let owner_id = Uuid::new_v4();

        let mut state = LocationState::new(owner_id, 5.0);
        state.set_from_candidate(&candidate("Paris", 48.8566, 2.3522));
        state.set_radius(8.0);
        state.commit(&store).await.unwrap();

        let reloaded = LocationState::load(&store, owner_id, 5.0).await.unwrap();
        assert_eq!(reloaded.address(), Some("Paris"));
        assert_eq!(reloaded.radius_km(), 8.0);
        assert_eq!(reloaded.coordinate().unwrap().lng, 2.3522);
    }

    #[tokio::test]
    async fn test_load_without_saved_location_uses_defaults() {
        let store = MemoryStore::new();
        let state = LocationState::load(&store, Uuid::new_v4(), 5.0).await.unwrap();

        assert!(state.address().is_none());
        assert!(state.coordinate().is_none());
        assert_eq!(state.radius_km(), 5.0);
    }

    #[tokio::test]
    async fn test_saved_out_of_band_radius_is_clamped_on_load() {
        let store = MemoryStore::new();
        let owner_id = Uuid::new_v4();
        store.insert_location(SellerLocation {
            owner_id,
            address: "Paris".to_string(),
            coordinate: Coordinate::new(48.8566, 2.3522),
            delivery_radius_km: 80.0,
        });

        let state = LocationState::load(&store, owner_id, 5.0).await.unwrap();
        assert_eq!(state.radius_km(), 50.0);
    }
}
