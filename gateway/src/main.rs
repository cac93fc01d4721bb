//! Warehouse Inventory Management Gateway - Server

use std::net::SocketAddr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use warehouse_inventory_gateway::{create_app, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warehouse_inventory_gateway=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting Warehouse Inventory Management Gateway");
    tracing::info!("Environment: {}", config.environment);

    match &config.upstream.base_url {
        Some(base) => tracing::info!("Backend API: {}", base),
        None => tracing::warn!("Backend API base URL is not configured; proxied requests will fail"),
    }

    let port = config.server.port;
    let state = AppState::new(config);
    let app = create_app(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
