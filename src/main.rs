//! gallery-zone CLI entry point
//!
//! Seller delivery zones and address resolution - CLI + web app

use gallery_zone::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
