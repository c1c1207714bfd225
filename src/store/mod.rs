//! Catalog/store service boundary
//!
//! The catalog store is an external collaborator; this module defines
//! the narrow client trait plus an HTTP implementation and an in-memory
//! one used by tests and by offline serving.

pub mod http;
pub mod memory;

use crate::error::Result;
use crate::geofence::{CatalogItem, SellerLocation};
use uuid::Uuid;

/// Per-session credentials, threaded explicitly into every store client
///
/// Store clients never read ambient state; whoever builds the client
/// decides what it is allowed to do.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    pub api_token: Option<String>,
}

impl SessionContext {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            api_token: Some(token.into()),
        }
    }
}

/// Trait for catalog store backends
pub trait CatalogStore: Send + Sync {
    /// Fetch a seller's saved location, if any
    fn get_seller_location(
        &self,
        seller_id: Uuid,
    ) -> impl std::future::Future<Output = Result<Option<SellerLocation>>> + Send;

    /// Persist a seller's location and delivery radius
    fn save_seller_location(
        &self,
        location: &SellerLocation,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// List all catalog items
    fn list_catalog_items(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<CatalogItem>>> + Send;
}
