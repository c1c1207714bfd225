//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod config;
pub mod search;
pub mod serve;
pub mod zone;

use clap::{Parser, Subcommand};

/// Seller delivery zones and address resolution for a local art marketplace
#[derive(Parser)]
#[command(name = "gallery-zone")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start web server (foreground)
    Serve(serve::ServeArgs),

    /// Geocode a free-text address
    Search(search::SearchArgs),

    /// Check whether a point falls inside a delivery circle
    Zone(zone::ZoneArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

/// Run the CLI
pub async fn run() -> crate::error::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => serve::run(args).await,
        Commands::Search(args) => search::run(args).await,
        Commands::Zone(args) => zone::run(args),
        Commands::Config(args) => config::run(args),
    }
}
