//! Warehouse Inventory Management Gateway
//!
//! An authenticated gateway in front of the inventory backend. It owns the
//! session cookie, resolves the caller's identity per request, applies
//! warehouse scoping to everything warehouse-partitioned, and relays the
//! rest verbatim.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod services;

pub use config::Config;

use error::{AppError, AppResult};
use external::InventoryApiClient;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Upstream client; `None` while the backend base URL is unconfigured
    pub upstream: Option<InventoryApiClient>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let upstream = config
            .upstream
            .base_url
            .clone()
            .map(InventoryApiClient::new);

        Self {
            upstream,
            config: Arc::new(config),
        }
    }

    /// The upstream client, or the fixed configuration error
    ///
    /// Requests must keep failing with the same message until the gateway
    /// is redeployed with a base URL.
    pub fn require_upstream(&self) -> AppResult<&InventoryApiClient> {
        self.upstream.as_ref().ok_or(AppError::MissingBackendConfig)
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .nest("/api", routes::api_routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Warehouse Inventory Management Gateway v1.0"
}
