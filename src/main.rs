use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;

use vialink::api::{AppState, create_router};
use vialink::config::CONFIG;
use vialink::http::build_client;

/// Keyword search and document download proxy for the VIA/VAS registry.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Port to listen on (overrides PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory holding the built UI (overrides VIALINK_STATIC_DIR)
    #[arg(long)]
    static_dir: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber (handles both tracing and log crate)
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(true)
        .init();

    let args = Args::parse();
    let port = args.port.unwrap_or(CONFIG.port);
    let static_dir = args.static_dir.unwrap_or_else(|| CONFIG.static_dir.clone());

    let state = Arc::new(AppState::new(build_client()?, &CONFIG.base_url)?);
    let app = create_router(state, &static_dir);

    let listener = TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("Failed to bind port {port}"))?;
    tracing::info!(upstream = %CONFIG.base_url, static_dir = %static_dir, "server running on port {port}");
    axum::serve(listener, app).await?;
    Ok(())
}
