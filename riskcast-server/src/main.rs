//! Binary entry point for the riskcast proxy server.

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use riskcast_core::Config;
use riskcast_server::{AppState, router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("riskcast_server=info,tower_http=info")),
        )
        .init();

    let config = Config::load()?;
    let state = AppState::from_config(&config);

    let listener = tokio::net::TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind))?;

    tracing::info!(addr = %config.server.bind, "riskcast server listening");

    axum::serve(listener, router(state)).await.context("Server error")?;

    Ok(())
}
