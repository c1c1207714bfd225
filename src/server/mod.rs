//! HTTP server for gallery-zone
//!
//! Serves the session API (address suggestions, location, gallery) and
//! the static frontend.

pub mod routes;
pub mod state;

use crate::config::Config;
use crate::error::Result;
use crate::store::http::HttpStore;
use crate::store::memory::MemoryStore;
use axum::Router;
use routes::create_router;
use state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Start the HTTP server
///
/// # Returns
/// Never returns unless the server shuts down
pub async fn run(config: Config) -> Result<()> {
    let addr = parse_addr(&config.server_addr())?;
    let app = build_router(config).await?;
    serve(addr, app).await
}

/// Start the HTTP server with a specific address
///
/// Useful for tests or when you want to override config
pub async fn run_on(addr: &str, config: Config) -> Result<()> {
    let addr = parse_addr(addr)?;
    let app = build_router(config).await?;
    serve(addr, app).await
}

async fn build_router(config: Config) -> Result<Router> {
    let base_url = config.store.base_url.trim().to_string();
    if base_url.is_empty() {
        info!("no store configured, serving from an in-memory catalog");
        let state = Arc::new(AppState::new(config, MemoryStore::new()).await?);
        Ok(create_router(state))
    } else {
        let store = HttpStore::new(base_url, config.session_context());
        let state = Arc::new(AppState::new(config, store).await?);
        Ok(create_router(state))
    }
}

fn parse_addr(addr: &str) -> Result<SocketAddr> {
    addr.parse()
        .map_err(|e| crate::error::Error::Server(format!("Invalid server address: {}", e)))
}

async fn serve(addr: SocketAddr, app: Router) -> Result<()> {
    info!("Starting server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| crate::error::Error::Server(format!("Failed to bind to {}: {}", addr, e)))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| crate::error::Error::Server(format!("Server error: {}", e)))?;

    Ok(())
}
