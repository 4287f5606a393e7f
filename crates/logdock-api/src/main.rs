//! Logdock server binary.
//!
//! Serves the log ingestion and query API over HTTP.

use logdock_api::{ApiConfig, ApiServer};
use logdock_core::shared_store;
use std::net::SocketAddr;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Parse command line args
    let args: Vec<String> = std::env::args().collect();

    let bind_addr: SocketAddr = args
        .get(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

    info!("Starting logdock API on {}", bind_addr);
    info!("  Ingest endpoint: http://{}/api/logdata", bind_addr);
    info!("  Search endpoint: http://{}/api/query_search", bind_addr);

    let config = ApiConfig::new(bind_addr);
    let server = ApiServer::new(config, shared_store());

    // Run until error or shutdown
    if let Err(e) = server.serve(bind_addr).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
