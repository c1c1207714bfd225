//! gallery-zone: seller delivery zones and address resolution
//!
//! A library and CLI/server for a local-delivery art marketplace:
//! free-text addresses resolve to coordinates through a debounced,
//! race-safe suggestion pipeline, sellers carry a circular delivery
//! zone, and buyers see only the catalog items within range.
//!
//! ## Features
//!
//! - Nominatim-backed geocoding with candidate labels
//! - Debounced suggestions with last-issued-wins race resolution
//! - Per-session location state with explicit commit
//! - Haversine delivery-zone matching, sorted by distance
//! - Map marker/overlay synchronization behind a widget trait
//! - HTTP API + CLI interface
//!
//! ## Quick Start
//!
//! ```rust
//! use gallery_zone::coord::Coordinate;
//! use gallery_zone::geofence::{self, CatalogItem, SellerLocation};
//! use chrono::Utc;
//! use uuid::Uuid;
//!
//! let seller = SellerLocation {
//!     owner_id: Uuid::new_v4(),
//!     address: "Place Charles de Gaulle, Paris".to_string(),
//!     coordinate: Coordinate::new(48.8738, 2.2950),
//!     delivery_radius_km: 10.0,
//! };
//! let item = CatalogItem {
//!     id: Uuid::new_v4(),
//!     seller_id: seller.owner_id,
//!     title: "Nocturne".to_string(),
//!     artist: "A. Peintre".to_string(),
//!     price: 450.0,
//!     image_url: None,
//!     created_at: Utc::now(),
//! };
//!
//! // A buyer in central Paris sees the item, about 5.3 km away
//! let buyer = Coordinate::new(48.8566, 2.3522);
//! let results = geofence::filter(Some(buyer), &[(item, seller)]).unwrap();
//! assert_eq!(results.len(), 1);
//! assert!(results[0].distance_km < 10.0);
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod coord;
pub mod error;
pub mod geocode;
pub mod geofence;
pub mod location;
pub mod map;
pub mod server;
pub mod store;
pub mod suggest;

// Re-export commonly used types
pub use config::Config;
pub use coord::Coordinate;
pub use error::{Error, Result};
pub use geofence::{CatalogItem, GeofenceResult, SellerLocation};
pub use location::LocationState;
pub use suggest::SuggestionController;
