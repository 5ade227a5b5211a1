use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers::*, AppState};

pub fn create_api_routes() -> Router<AppState> {
    Router::new()
        .route("/health/detailed", get(detailed_health_check))
        .route("/sources", get(list_sources))
        .route("/sources/refresh", post(refresh_sources))
        .route("/search", get(search_inventory))
        .route("/reorders", get(list_reorders).post(submit_reorder))
}
