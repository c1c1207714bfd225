//! Delivery-zone matching
//!
//! Filters catalog items down to those whose seller can deliver to a
//! reference location. Pure and synchronous: a linear scan over the
//! catalog, no spatial index. Revisit only if the catalog grows past a
//! few tens of thousands of items.

use crate::constants::delivery::MAX_RADIUS_KM;
use crate::coord::distance::haversine_km;
use crate::coord::Coordinate;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A seller's registered home base and delivery circle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SellerLocation {
    pub owner_id: Uuid,
    pub address: String,
    pub coordinate: Coordinate,
    pub delivery_radius_km: f64,
}

/// Catalog item fields relevant to zone matching and listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: Uuid,
    pub seller_id: Uuid,
    pub title: String,
    pub artist: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// One in-range item, annotated with its distance from the reference
///
/// Ephemeral: recomputed per query, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeofenceResult {
    pub item: CatalogItem,
    pub distance_km: f64,
    /// The seller's delivery radius, shown alongside the distance
    pub delivery_radius_km: f64,
}

/// Filter items to those whose seller delivers to `reference`
///
/// Output is ordered ascending by distance, with ties broken by item id
/// so the ordering is deterministic. A missing reference is an error,
/// not an empty result: the caller should prompt for address setup
/// rather than show "no items nearby".
pub fn filter(
    reference: Option<Coordinate>,
    items: &[(CatalogItem, SellerLocation)],
) -> Result<Vec<GeofenceResult>> {
    let reference = reference.ok_or(Error::NoReferenceLocation)?;
    reference.validate()?;

    let mut results: Vec<GeofenceResult> = items
        .iter()
        .filter_map(|(item, seller)| {
            // The store is an external writer; enforce the (0, 50] band
            // here rather than trust what it returned
            if !seller.delivery_radius_km.is_finite() || seller.delivery_radius_km <= 0.0 {
                return None;
            }
            let radius_km = seller.delivery_radius_km.min(MAX_RADIUS_KM);
            let distance_km = haversine_km(reference, seller.coordinate);
            (distance_km <= radius_km).then(|| GeofenceResult {
                item: item.clone(),
                distance_km,
                delivery_radius_km: radius_km,
            })
        })
        .collect();

    results.sort_by(|a, b| {
        a.distance_km
            .partial_cmp(&b.distance_km)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.item.id.cmp(&b.item.id))
    });

    Ok(results)
}
