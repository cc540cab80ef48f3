// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::application::navigation_service::NavigationService;
use crate::infrastructure::config::load_config;
use crate::infrastructure::resource_api_client::ResourceApiClient;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = load_config()?;

    // Create resource client (infrastructure layer)
    let client = Arc::new(ResourceApiClient::new(
        config.api.host.clone(),
        config.api.key.clone(),
        config.api.token.clone(),
        config.api.version.clone(),
        config.api.timeout(),
    )?);

    // Create services (application layer)
    let navigation_service = NavigationService::new(client, config.tags.clone());

    let state = Arc::new(AppState { navigation_service });
    let router = build_router(state);

    // Start server
    let addr: SocketAddr = config
        .server
        .bind_addr
        .parse()
        .with_context(|| format!("Invalid bind address '{}'", config.server.bind_addr))?;
    tracing::info!("Starting dashboard-navigation service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
