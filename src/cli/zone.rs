//! Zone command handler
//!
//! Distance and in-range check between a buyer point and a seller's
//! delivery circle.

use crate::config::Config;
use crate::coord::distance::{haversine_km, within_radius};
use crate::coord::Coordinate;
use crate::error::{Error, Result};
use clap::Args;
use serde::Serialize;

/// Zone command arguments
#[derive(Args)]
pub struct ZoneArgs {
    /// Buyer latitude
    #[arg(long)]
    pub lat: f64,

    /// Buyer longitude
    #[arg(long)]
    pub lng: f64,

    /// Seller latitude
    #[arg(long)]
    pub seller_lat: f64,

    /// Seller longitude
    #[arg(long)]
    pub seller_lng: f64,

    /// Delivery radius in kilometers (defaults to config)
    #[arg(long)]
    pub radius: Option<f64>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct ZoneReport {
    distance_km: f64,
    radius_km: f64,
    in_range: bool,
}

/// Run the zone command
pub fn run(args: ZoneArgs) -> Result<()> {
    let buyer = Coordinate::new(args.lat, args.lng);
    let seller = Coordinate::new(args.seller_lat, args.seller_lng);
    buyer.validate()?;
    seller.validate()?;

    let radius_km = match args.radius {
        Some(radius) => radius,
        None => Config::load()?.delivery.default_radius_km,
    };
    if !radius_km.is_finite() || radius_km <= 0.0 {
        return Err(Error::InvalidRadius(format!(
            "Radius must be positive: {}",
            radius_km
        )));
    }

    let report = ZoneReport {
        distance_km: haversine_km(buyer, seller),
        radius_km,
        in_range: within_radius(buyer, seller, radius_km),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if report.in_range {
        println!(
            "{:.2} km: within the {} km delivery zone",
            report.distance_km, report.radius_km
        );
    } else {
        println!(
            "{:.2} km: outside the {} km delivery zone",
            report.distance_km, report.radius_km
        );
    }

    Ok(())
}
