//! Geographic primitives
//!
//! This module handles:
//! - The `Coordinate` value type with range validation
//! - Great-circle distance (haversine)
//! - Bounding boxes of delivery circles, used for viewport fitting

pub mod distance;

use crate::constants::geo::KM_PER_DEGREE_LAT;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// A geographic coordinate (latitude, longitude)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    /// Create a new coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validate that the coordinate is within valid ranges
    ///
    /// Latitude: -90 to 90
    /// Longitude: -180 to 180
    pub fn validate(&self) -> crate::error::Result<()> {
        if !self.lat.is_finite() || self.lat < -90.0 || self.lat > 90.0 {
            return Err(crate::error::Error::InvalidCoordinates(format!(
                "Latitude {} is out of range [-90, 90]",
                self.lat
            )));
        }
        if !self.lng.is_finite() || self.lng < -180.0 || self.lng > 180.0 {
            return Err(crate::error::Error::InvalidCoordinates(format!(
                "Longitude {} is out of range [-180, 180]",
                self.lng
            )));
        }
        Ok(())
    }
}

/// A latitude/longitude bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl GeoBounds {
    /// Whether a coordinate falls inside the box (inclusive)
    pub fn contains(&self, c: Coordinate) -> bool {
        c.lat >= self.south && c.lat <= self.north && c.lng >= self.west && c.lng <= self.east
    }
}

/// Compute the bounding box of a circle on the sphere
///
/// The longitude span widens with latitude; past the point where the
/// circle wraps a pole the box degenerates to the full longitude range.
pub fn circle_bounds(center: Coordinate, radius_km: f64) -> GeoBounds {
    let delta_lat = radius_km / KM_PER_DEGREE_LAT;

    let cos_lat = (center.lat * PI / 180.0).cos();
    let delta_lng = if cos_lat > 1e-6 {
        radius_km / (KM_PER_DEGREE_LAT * cos_lat)
    } else {
        180.0
    };

    GeoBounds {
        south: (center.lat - delta_lat).max(-90.0),
        north: (center.lat + delta_lat).min(90.0),
        west: (center.lng - delta_lng).max(-180.0),
        east: (center.lng + delta_lng).min(180.0),
    }
}
