//! Centralized constants for the gallery-zone crate
//!
//! This module consolidates constants that are used across multiple modules
//! to avoid duplication and ensure consistency.

/// Geographic constants
pub mod geo {
    /// Mean Earth radius in kilometers
    pub const EARTH_RADIUS_KM: f64 = 6371.0;

    /// Kilometers per degree of latitude (approximate, varies slightly with latitude)
    pub const KM_PER_DEGREE_LAT: f64 = 111.32;
}

/// External API endpoints
pub mod api {
    /// OpenStreetMap Nominatim geocoding API
    pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";
}

/// Delivery radius bounds in kilometers
///
/// Values outside the band are clamped at the input boundary, never rejected.
pub mod delivery {
    pub const MIN_RADIUS_KM: f64 = 1.0;
    pub const MAX_RADIUS_KM: f64 = 50.0;
}
