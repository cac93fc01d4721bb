//! Route definitions for the Warehouse Inventory Management gateway

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{handlers, middleware::session, AppState};

/// Create API routes
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Auth routes (public)
        .nest("/auth", auth_routes())
        // Proxy routes that only need the session cookie
        .nest("/products", product_routes(state.clone()))
        .nest("/warehouses", warehouse_routes(state.clone()))
        .nest("/users", user_routes(state.clone()))
        .nest("/logs", log_routes(state.clone()))
        // Warehouse-scoped routes; the resolved identity drives filtering
        .merge(scoped_routes(state))
}

/// Authentication routes (public)
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(handlers::login))
        .route("/logout", post(handlers::logout))
}

/// Product catalog routes (session required)
fn product_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_products).post(handlers::create_product),
        )
        .route(
            "/:id",
            get(handlers::get_product)
                .put(handlers::update_product)
                .delete(handlers::delete_product),
        )
        .route_layer(middleware::from_fn_with_state(
            state,
            session::require_token,
        ))
}

/// Warehouse management routes (session required)
fn warehouse_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_warehouses).post(handlers::create_warehouse),
        )
        .route(
            "/:id",
            get(handlers::get_warehouse)
                .put(handlers::update_warehouse)
                .delete(handlers::delete_warehouse),
        )
        .route_layer(middleware::from_fn_with_state(
            state,
            session::require_token,
        ))
}

/// User management routes (session required)
fn user_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_users).post(handlers::create_user))
        .route("/me", get(handlers::get_current_user))
        .route(
            "/:id",
            get(handlers::get_user)
                .put(handlers::update_user)
                .delete(handlers::delete_user),
        )
        .route_layer(middleware::from_fn_with_state(
            state,
            session::require_token,
        ))
}

/// Activity log routes (session required)
fn log_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_logs))
        .route_layer(middleware::from_fn_with_state(
            state,
            session::require_token,
        ))
}

/// Warehouse-scoped routes (session and resolved identity required)
fn scoped_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/scan-qr", post(handlers::scan_qr))
        .route("/product-units", get(handlers::list_product_units))
        .route("/dashboard", get(handlers::get_dashboard))
        .route(
            "/stock-in",
            get(handlers::list_stock_in).post(handlers::create_stock_in),
        )
        .route("/stock-in/:id", get(handlers::get_stock_in))
        .route(
            "/stock-in/:id/delivery-note",
            get(handlers::print_delivery_note),
        )
        .route("/stock-out", get(handlers::list_stock_out))
        .route(
            "/stock-out/from-units",
            post(handlers::create_stock_out_from_units),
        )
        .route("/reports/sales", get(handlers::get_sales_report))
        .route("/reports/stock-in", get(handlers::get_stock_in_report))
        .route(
            "/reports/stock-in/export-units",
            get(handlers::export_stock_in_units),
        )
        .route("/reports/stock-out", get(handlers::get_stock_out_report))
        .route(
            "/reports/stock-out/export-units",
            get(handlers::export_stock_out_units),
        )
        .route(
            "/reports/stock-balance",
            get(handlers::get_stock_balance_report),
        )
        .route_layer(middleware::from_fn_with_state(
            state,
            session::resolve_identity,
        ))
}
