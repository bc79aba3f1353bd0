//! AURA HTTP Server Binary
//!
//! This is the main entry point for the AURA REST API server.
//! It loads the configuration, creates the data sources, sets up the HTTP
//! router, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! # Run with the file-backed data sources (default)
//! cargo run --bin aura-server
//!
//! # Run with in-memory sources for development
//! AURA_SOURCE=local cargo run --bin aura-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8000)
//! - `AURA_SOURCE`: Data source backend override (file, local, remote)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use aura_rust::http::{create_router, AppState};
use aura_rust::sources::{self, AuraConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .init();

    info!("Starting AURA HTTP Server");

    // Initialize the global data sources once and reuse them across the app
    let config = AuraConfig::from_default_location();
    sources::init_sources()?;
    let data_sources = std::sync::Arc::clone(sources::get_sources()?);
    info!("Data sources initialized successfully");

    // Create application state
    let state = AppState::new(data_sources, &config);

    // Create router with all endpoints
    let app = create_router(state);

    // Determine bind address
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8000);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
