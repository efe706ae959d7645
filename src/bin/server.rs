//! costar server binary.
//!
//! Serves the SSE connection-finder API backed by TMDB, with optional GIPHY
//! annotation.

use clap::Parser;
use costar::server::{serve, ServerConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> costar::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = ServerConfig::parse();
    serve(config).await
}
