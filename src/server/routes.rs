//! HTTP API routes
//!
//! Defines all REST API endpoints for the server.

use crate::error::Error;
use crate::geocode::AddressCandidate;
use crate::geofence::{self, GeofenceResult, SellerLocation};
use crate::location::LocationSnapshot;
use crate::server::state::AppState;
use crate::store::CatalogStore;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tower_http::services::ServeDir;
use uuid::Uuid;

/// Create the API router
pub fn create_router<S: CatalogStore + 'static>(state: Arc<AppState<S>>) -> Router {
    // Determine static files path
    // Try relative to cwd first, then fallback to common locations
    let static_path = if std::path::Path::new("static").exists() {
        "static".to_string()
    } else if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let path = exe_dir.join("static");
            if path.exists() {
                path.to_string_lossy().to_string()
            } else {
                "static".to_string()
            }
        } else {
            "static".to_string()
        }
    } else {
        "static".to_string()
    };

    Router::new()
        .route("/api/status", get(status_handler::<S>))
        .route("/api/address/input", post(address_input_handler::<S>))
        .route("/api/address/suggestions", get(suggestions_handler::<S>))
        .route("/api/address/select", post(address_select_handler::<S>))
        .route("/api/location", get(location_handler::<S>))
        .route("/api/location/address", put(manual_address_handler::<S>))
        .route("/api/location/radius", put(radius_handler::<S>))
        .route("/api/location/commit", post(commit_handler::<S>))
        .route("/api/gallery", get(gallery_handler::<S>))
        .nest_service(
            "/",
            ServeDir::new(&static_path).append_index_html_on_directories(true),
        )
        .with_state(state)
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
    #[serde(skip, default = "default_error_status")]
    status: StatusCode,
}

fn default_error_status() -> StatusCode {
    StatusCode::INTERNAL_SERVER_ERROR
}

impl ApiError {
    fn new(status: StatusCode, code: &str, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.to_string(),
            status,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status;
        (status, Json(self)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let (status, code) = match &err {
            Error::NoReferenceLocation => (StatusCode::BAD_REQUEST, "NO_REFERENCE_LOCATION"),
            Error::AddressNotResolved => (StatusCode::BAD_REQUEST, "ADDRESS_NOT_RESOLVED"),
            Error::InvalidRadius(_) => (StatusCode::BAD_REQUEST, "INVALID_RADIUS"),
            Error::InvalidCoordinates(_) => (StatusCode::BAD_REQUEST, "INVALID_COORDINATES"),
            Error::RateLimited => (StatusCode::SERVICE_UNAVAILABLE, "RATE_LIMITED"),
            Error::ProviderUnavailable(_) => (StatusCode::BAD_GATEWAY, "PROVIDER_UNAVAILABLE"),
            Error::MalformedResponse(_) => (StatusCode::BAD_GATEWAY, "MALFORMED_RESPONSE"),
            Error::Store(_) => (StatusCode::BAD_GATEWAY, "STORE_ERROR"),
            Error::MapInitFailed(_) => (StatusCode::INTERNAL_SERVER_ERROR, "MAP_INIT_FAILED"),
            Error::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };
        ApiError::new(status, code, err.to_string())
    }
}

/// Status response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub running: bool,
    pub version: String,
    pub seller_id: Uuid,
    pub location: LocationSnapshot,
}

/// Server status endpoint
///
/// GET /api/status
async fn status_handler<S: CatalogStore>(
    State(state): State<Arc<AppState<S>>>,
) -> Json<StatusResponse> {
    let location = state.location.read().await;
    Json(StatusResponse {
        running: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        seller_id: location.owner_id(),
        location: location.snapshot(),
    })
}

/// Address input request body
#[derive(Debug, Deserialize)]
pub struct AddressInputRequest {
    pub text: String,
}

/// Address input response
#[derive(Debug, Serialize, Deserialize)]
pub struct AddressInputResponse {
    /// Sequence number issued for this keystroke
    pub seq: u64,
}

/// Feed a keystroke to the suggestion controller
///
/// POST /api/address/input
async fn address_input_handler<S: CatalogStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<AddressInputRequest>,
) -> Json<AddressInputResponse> {
    let seq = state.suggestions.input(&req.text);
    Json(AddressInputResponse { seq })
}

/// Suggestions snapshot response
#[derive(Debug, Serialize, Deserialize)]
pub struct SuggestionsResponse {
    pub candidates: Vec<AddressCandidate>,
    pub loading: bool,
    /// Set when the provider failed; clients fall back to manual entry
    pub degraded: bool,
}

/// Current suggestion list
///
/// GET /api/address/suggestions
async fn suggestions_handler<S: CatalogStore>(
    State(state): State<Arc<AppState<S>>>,
) -> Json<SuggestionsResponse> {
    let snapshot = state.suggestions.snapshot();
    Json(SuggestionsResponse {
        candidates: snapshot.candidates,
        loading: snapshot.loading,
        degraded: snapshot.degraded,
    })
}

/// Candidate selection request body
#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    pub index: usize,
}

/// Pick a suggestion; its coordinate moves into the session location
///
/// POST /api/address/select
async fn address_select_handler<S: CatalogStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<SelectRequest>,
) -> Result<Json<LocationSnapshot>, ApiError> {
    let Some(candidate) = state.suggestions.select(req.index) else {
        return Err(ApiError::new(
            StatusCode::BAD_REQUEST,
            "INVALID_SELECTION",
            format!("No candidate at index {}", req.index),
        ));
    };

    let mut location = state.location.write().await;
    location.set_from_candidate(&candidate);
    Ok(Json(location.snapshot()))
}

/// Current session location
///
/// GET /api/location
async fn location_handler<S: CatalogStore>(
    State(state): State<Arc<AppState<S>>>,
) -> Json<LocationSnapshot> {
    Json(state.location.read().await.snapshot())
}

/// Manual address request body
#[derive(Debug, Deserialize)]
pub struct ManualAddressRequest {
    pub address: String,
}

/// Set the address text directly, bypassing suggestions
///
/// PUT /api/location/address
async fn manual_address_handler<S: CatalogStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<ManualAddressRequest>,
) -> Json<LocationSnapshot> {
    let mut location = state.location.write().await;
    location.set_manual_address(&req.address);
    Json(location.snapshot())
}

/// Radius request body
#[derive(Debug, Deserialize)]
pub struct RadiusRequest {
    pub radius_km: f64,
}

/// Set the delivery radius; out-of-band values are clamped
///
/// PUT /api/location/radius
async fn radius_handler<S: CatalogStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<RadiusRequest>,
) -> Json<LocationSnapshot> {
    let mut location = state.location.write().await;
    location.set_radius(req.radius_km);
    Json(location.snapshot())
}

/// Persist the session location to the store
///
/// POST /api/location/commit
async fn commit_handler<S: CatalogStore>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<LocationSnapshot>, ApiError> {
    let location = state.location.read().await;
    location.commit(&state.store).await.map_err(ApiError::from)?;
    Ok(Json(location.snapshot()))
}

/// Gallery response
#[derive(Debug, Serialize, Deserialize)]
pub struct GalleryResponse {
    pub items: Vec<GeofenceResult>,
    pub count: usize,
}

/// Catalog items deliverable to the session location
///
/// GET /api/gallery
async fn gallery_handler<S: CatalogStore>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<GalleryResponse>, ApiError> {
    let reference = state.location.read().await.coordinate();

    let items = state.store.list_catalog_items().await.map_err(ApiError::from)?;

    // Join each item with its seller's location; items whose seller never
    // saved one are not deliverable anywhere
    let mut sellers: HashMap<Uuid, Option<SellerLocation>> = HashMap::new();
    let mut pairs = Vec::with_capacity(items.len());
    for item in items {
        let seller = match sellers.get(&item.seller_id) {
            Some(cached) => cached.clone(),
            None => {
                let fetched = state
                    .store
                    .get_seller_location(item.seller_id)
                    .await
                    .map_err(ApiError::from)?;
                sellers.insert(item.seller_id, fetched.clone());
                fetched
            }
        };
        if let Some(seller) = seller {
            pairs.push((item, seller));
        }
    }

    let results = geofence::filter(reference, &pairs).map_err(ApiError::from)?;
    let count = results.len();
    Ok(Json(GalleryResponse {
        items: results,
        count,
    }))
}
