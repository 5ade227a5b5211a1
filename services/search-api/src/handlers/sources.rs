use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use labstock_utils::LabstockError;
use serde::{Deserialize, Serialize};

use super::api_error;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct SourceSummary {
    pub name: String,
    pub owner: String,
    pub url: String,
    /// A fresh dump is held in the cache
    pub cached: bool,
}

#[derive(Debug, Deserialize)]
pub struct RefreshParams {
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub invalidated: usize,
}

/// GET /api/v1/sources
pub async fn list_sources(State(state): State<AppState>) -> Json<Vec<SourceSummary>> {
    let mut summaries = Vec::new();
    for source in state.config.inventory.inventory_sources() {
        let cached = state.store.cache().get(&source.name).await.is_some();
        summaries.push(SourceSummary {
            owner: source.owner_label(),
            name: source.name,
            url: source.url,
            cached,
        });
    }
    Json(summaries)
}

/// Drops cached dumps so the next search refetches them
///
/// POST /api/v1/sources/refresh[?name=]
pub async fn refresh_sources(
    State(state): State<AppState>,
    Query(params): Query<RefreshParams>,
) -> Result<Json<RefreshResponse>, (StatusCode, String)> {
    let name = params.name.as_deref().map(str::trim).filter(|name| !name.is_empty());

    let name = match name {
        Some(name) => {
            let source = state
                .config
                .inventory
                .inventory_sources()
                .into_iter()
                .find(|source| source.is_named(name))
                .ok_or_else(|| api_error(LabstockError::not_found(format!("inventory source '{}'", name))))?;
            Some(source.name)
        }
        None => None,
    };

    let invalidated = state.store.refresh(name.as_deref()).await;
    Ok(Json(RefreshResponse { invalidated }))
}
