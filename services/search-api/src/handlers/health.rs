use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::AppState;

pub async fn detailed_health_check(State(state): State<AppState>) -> Json<Value> {
    let mut health_status = json!({
        "status": "healthy",
        "service": "labstock-search-api",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "checks": {}
    });

    let ledger_status = match state.ledger.health_check().await {
        Ok(_) => json!({"status": "healthy", "path": state.ledger.path().display().to_string()}),
        Err(e) => json!({"status": "unhealthy", "message": e.to_string()}),
    };
    health_status["checks"]["ledger"] = ledger_status;

    health_status["checks"]["inventory"] = json!({
        "status": "healthy",
        "configured_sources": state.config.inventory.sources.len(),
        "cached_sources": state.store.cache().fresh_count().await,
    });

    let all_healthy = health_status["checks"]
        .as_object()
        .map(|checks| checks.values().all(|check| check["status"] == "healthy"))
        .unwrap_or(true);

    if !all_healthy {
        health_status["status"] = json!("degraded");
    }

    Json(health_status)
}
