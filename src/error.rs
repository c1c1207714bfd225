//! Error types for gallery-zone

use thiserror::Error;

/// Main error type for gallery-zone operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Geocoding provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Geocoding provider rate limited")]
    RateLimited,

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    #[error("No reference location is set for this session")]
    NoReferenceLocation,

    #[error("Invalid radius: {0}")]
    InvalidRadius(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Address is not resolved to coordinates")]
    AddressNotResolved,

    #[error("Map initialization failed: {0}")]
    MapInitFailed(String),

    #[error("Stale response discarded (seq {seq}, latest {latest})")]
    StaleResponse { seq: u64, latest: u64 },

    #[error("Store error: {0}")]
    Store(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for gallery-zone operations
pub type Result<T> = std::result::Result<T, Error>;
