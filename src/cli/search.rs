//! Search command handler
//!
//! One-shot geocoding of a free-text address from the terminal.

use crate::config::Config;
use crate::error::Result;
use crate::geocode::GeocodeClient;
use clap::Args;

/// Search command arguments
#[derive(Args)]
pub struct SearchArgs {
    /// Free-text address to geocode
    pub query: String,

    /// Country filter (ISO 3166-1 alpha-2), overrides config
    #[arg(long)]
    pub country: Option<String>,

    /// Maximum number of candidates
    #[arg(long)]
    pub limit: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the search command
pub async fn run(args: SearchArgs) -> Result<()> {
    let config = Config::load()?;

    let mut client = config.geocoder();
    if let Some(limit) = args.limit {
        client = client.with_limit(limit);
    }

    let country = args
        .country
        .as_deref()
        .or_else(|| config.country_filter());

    let candidates = client.search(&args.query, country).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&candidates)?);
        return Ok(());
    }

    if candidates.is_empty() {
        println!("No matches for \"{}\"", args.query);
        return Ok(());
    }

    for (index, candidate) in candidates.iter().enumerate() {
        println!(
            "{}. {} ({:.5}, {:.5})",
            index + 1,
            candidate.label,
            candidate.coordinate.lat,
            candidate.coordinate.lng
        );
    }

    Ok(())
}
