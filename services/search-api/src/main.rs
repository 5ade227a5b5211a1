use anyhow::Result;
use axum::{
    extract::{DefaultBodyLimit, State},
    http::{header, Method},
    response::Json,
    routing::get,
    serve, Router,
};
use labstock_storage::{create_inventory_store, create_ledger, InventoryStore, ReorderLedger};
use labstock_utils::{init_logging, AppConfig, LabstockError, LabstockResult};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

mod handlers;
mod metrics;
mod middleware;
mod routes;

use metrics::ServiceMetrics;
use middleware::*;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = AppConfig::load().unwrap_or_else(|_| {
        eprintln!("Failed to load configuration, using defaults");
        AppConfig::default()
    });

    // Initialize logging
    init_logging(&config.logging)?;
    info!("Starting Labstock search API");

    let state = AppState::new(config.clone())?;
    info!(
        sources = config.inventory.sources.len(),
        ledger = %state.ledger.path().display(),
        "Inventory sources configured"
    );

    let app = create_app(state);

    let listener = TcpListener::bind((config.server.host.as_str(), config.server.port)).await?;
    info!("Search API listening on {}", listener.local_addr()?);

    serve(listener, app).await?;

    Ok(())
}

pub fn create_app(state: AppState) -> Router {
    let config = &state.config;

    let mut app = Router::new().route("/health", get(health_check));
    if config.monitoring.metrics_enabled {
        app = app.route("/metrics", get(metrics_handler));
    }

    app
        // API routes
        .nest("/api/v1", routes::create_api_routes())
        // Middleware stack
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods([Method::GET, Method::POST])
                        .allow_headers([header::CONTENT_TYPE]),
                )
                .layer(TimeoutLayer::new(Duration::from_secs(config.server.timeout_seconds)))
                .layer(DefaultBodyLimit::max(config.server.max_request_size))
                .layer(axum::middleware::from_fn(request_id_middleware))
                .layer(axum::middleware::from_fn(error_logging_middleware)),
        )
        .with_state(state)
}

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub store: InventoryStore,
    pub ledger: Arc<ReorderLedger>,
    pub metrics: Arc<ServiceMetrics>,
}

impl AppState {
    pub fn new(config: AppConfig) -> LabstockResult<Self> {
        let store = create_inventory_store(&config.inventory)?;
        let ledger = Arc::new(create_ledger(&config.ledger));
        let metrics = ServiceMetrics::new(&config.monitoring.prometheus_namespace)
            .map_err(|e| LabstockError::configuration(format!("Invalid metrics setup: {}", e)))?;

        Ok(Self {
            config,
            store,
            ledger,
            metrics: Arc::new(metrics),
        })
    }
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "service": "labstock-search-api",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn metrics_handler(State(state): State<AppState>) -> String {
    state.metrics.encode()
}
