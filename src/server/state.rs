//! Server shared state
//!
//! Holds one user session: configuration, the catalog store client, the
//! session's location state and its suggestion controller.

use crate::config::Config;
use crate::error::Result;
use crate::geocode::nominatim::NominatimClient;
use crate::location::LocationState;
use crate::store::CatalogStore;
use crate::suggest::SuggestionController;
use tokio::sync::RwLock;
use tracing::warn;

/// Shared state for the HTTP server
///
/// One instance serves one session; the location state is owned here
/// exclusively and mutated only through its own methods.
pub struct AppState<S> {
    pub config: Config,
    pub store: S,
    pub location: RwLock<LocationState>,
    pub suggestions: SuggestionController<NominatimClient>,
}

impl<S: CatalogStore> AppState<S> {
    /// Build session state, loading the saved location from the store
    ///
    /// A store that cannot be reached is not fatal: the session starts
    /// from defaults and the seller can save again later.
    pub async fn new(config: Config, store: S) -> Result<Self> {
        let owner_id = config.seller_id()?;

        let suggestions = SuggestionController::new(
            config.geocoder(),
            config.debounce_policy(),
            config.country_filter().map(str::to_string),
        );

        let default_radius = config.delivery.default_radius_km;
        let location = match LocationState::load(&store, owner_id, default_radius).await {
            Ok(state) => state,
            Err(e) => {
                warn!("failed to load saved location, starting empty: {}", e);
                LocationState::new(owner_id, default_radius)
            }
        };

        Ok(Self {
            config,
            store,
            location: RwLock::new(location),
            suggestions,
        })
    }
}
