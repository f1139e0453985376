//! Order Desk Backend
//!
//! A REST backend for recording client orders against a product catalog,
//! with per-client credit balances persisted to a single JSON document.

mod api;
mod config;
mod errors;
mod ledger;
mod models;
mod store;

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use store::Store;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Order Desk Backend");
    tracing::info!("Data file: {:?}", config.data_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Load the document and seed defaults; a corrupt data file is fatal here
    let store = Arc::new(Store::open(&config.data_path).await?);

    // Create application state
    let state = AppState { store };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API routes
    let api_routes = Router::new()
        // Document
        .route("/document", get(api::get_document))
        // Clients
        .route("/clients", get(api::list_clients))
        .route("/clients", post(api::create_client))
        .route("/clients/{name}", get(api::get_client))
        .route("/clients/{name}", put(api::update_client))
        .route("/clients/{name}/reset-credit", post(api::reset_client_credit))
        // Products
        .route("/products", get(api::list_products))
        .route("/products", post(api::create_product))
        .route("/products/{name}", put(api::update_product))
        // Orders
        .route("/orders", post(api::place_order))
        .route("/orders/{name}", get(api::order_report));

    // Health check
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests;
