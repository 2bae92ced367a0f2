//! Postboard - Posts with Threaded Comments
//!
//! Starts the HTTP API over the storage backend chosen by `--use-memory`.

use clap::Parser;
use postboard::config::{self, Cli};
use postboard::{api, APP_VERSION};

// =============================================================================
// Main
// =============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before clap reads DATABASE_URL
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_filter().into()),
        )
        .init();

    tracing::info!("Postboard v{}", APP_VERSION);

    let store = config::open_store(&cli).await?;
    tracing::info!(backend = cli.backend().as_str(), "Storage backend ready");

    let addr: std::net::SocketAddr = cli.bind.parse()?;
    let app = api::router(store);

    tracing::info!("Starting HTTP server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
