//! Inventory Search Handler
//!
//! Searches the configured inventory sources with the part number, value
//! and footprint filters from the query string. A value naming an owner
//! fetches and lists that owner's source only.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use labstock_models::{owner_label, ComponentRecord, SearchQuery};
use labstock_utils::{find_owner, validate_search_query, QueryMatcher, SearchMode, SearchOptions};
use serde::Serialize;
use tracing::info;

use super::api_error;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub mode: SearchMode,
    pub total: usize,
    pub records: Vec<ComponentRecord>,
    pub searched_sources: Vec<String>,
    pub skipped_sources: Vec<String>,
    /// One message per source that could not be fetched
    pub warnings: Vec<String>,
}

/// Search inventory
///
/// GET /api/v1/search?part_number=&value=&footprint=
pub async fn search_inventory(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    validate_search_query(&query).map_err(api_error)?;

    let mut sources = state.config.inventory.inventory_sources();
    if state.config.inventory.owner_shortcut {
        // An owner search only needs that owner's dump
        let owner = find_owner(&query, sources.iter().map(|source| source.name.as_str())).map(str::to_string);
        if let Some(owner) = owner {
            sources.retain(|source| source.name == owner);
        }
    }
    let dumps = state.store.load_all(&sources).await.map_err(api_error)?;

    let options = SearchOptions {
        owner_shortcut: state.config.inventory.owner_shortcut,
    };
    let outcome = QueryMatcher::new()
        .search_sources(&dumps, &query, &options)
        .map_err(api_error)?;

    state.metrics.record_search(&outcome.mode, outcome.records.len());
    info!(
        mode = ?outcome.mode,
        matched = outcome.records.len(),
        skipped = outcome.skipped_sources.len(),
        "Inventory search completed"
    );

    let warnings = outcome
        .skipped_sources
        .iter()
        .map(|name| format!("Failed to fetch {} file.", owner_label(name)))
        .collect();

    Ok(Json(SearchResponse {
        mode: outcome.mode,
        total: outcome.records.len(),
        records: outcome.records,
        searched_sources: outcome.searched_sources,
        skipped_sources: outcome.skipped_sources,
        warnings,
    }))
}
