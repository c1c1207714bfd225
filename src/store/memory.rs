//! In-memory catalog store
//!
//! Backs tests and `serve` when no store URL is configured.

use crate::error::Result;
use crate::geofence::{CatalogItem, SellerLocation};
use crate::store::CatalogStore;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use uuid::Uuid;

/// Catalog store held entirely in process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    locations: RwLock<HashMap<Uuid, SellerLocation>>,
    items: RwLock<Vec<CatalogItem>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a seller location
    pub fn insert_location(&self, location: SellerLocation) {
        self.locations
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(location.owner_id, location);
    }

    /// Seed a catalog item
    pub fn insert_item(&self, item: CatalogItem) {
        self.items
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(item);
    }
}

impl CatalogStore for MemoryStore {
    async fn get_seller_location(&self, seller_id: Uuid) -> Result<Option<SellerLocation>> {
        Ok(self
            .locations
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&seller_id)
            .cloned())
    }

    async fn save_seller_location(&self, location: &SellerLocation) -> Result<()> {
        self.insert_location(location.clone());
        Ok(())
    }

    async fn list_catalog_items(&self) -> Result<Vec<CatalogItem>> {
        Ok(self
            .items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::Coordinate;
    use chrono::Utc;

    #[tokio::test]
    async fn test_location_roundtrip() {
        let store = MemoryStore::new();
        let owner_id = Uuid::new_v4();

        assert!(store.get_seller_location(owner_id).await.unwrap().is_none());

        let location = SellerLocation {
            owner_id,
            address: "Paris".to_string(),
            coordinate: Coordinate::new(48.8566, 2.3522),
            delivery_radius_km: 5.0,
        };
        store.save_seller_location(&location).await.unwrap();

        let fetched = store.get_seller_location(owner_id).await.unwrap().unwrap();
        assert_eq!(fetched.address, "Paris");
    }

    #[tokio::test]
    async fn test_item_listing() {
        let store = MemoryStore::new();
        store.insert_item(CatalogItem {
            id: Uuid::new_v4(),
            seller_id: Uuid::new_v4(),
            title: "Nocturne".to_string(),
            artist: "A. Peintre".to_string(),
            price: 450.0,
            image_url: None,
            created_at: Utc::now(),
        });

        assert_eq!(store.list_catalog_items().await.unwrap().len(), 1);
    }
}
