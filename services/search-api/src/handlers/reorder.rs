//! Re-order Handlers
//!
//! Records re-order requests in the ledger, both for search results that are
//! out of stock and for parts entered by hand.

use axum::{extract::State, http::StatusCode, response::Json};
use labstock_models::ReorderRequest;
use labstock_utils::validate_model;
use serde::{Deserialize, Serialize};
use tracing::error;

use super::api_error;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ReorderForm {
    pub part_number: String,
    pub description: String,
    pub requester_name: String,
}

#[derive(Debug, Serialize)]
pub struct ReorderResponse {
    pub request: ReorderRequest,
    /// Line appended to the ledger
    pub line: String,
}

#[derive(Debug, Serialize)]
pub struct ReorderListResponse {
    pub total: usize,
    pub entries: Vec<ReorderRequest>,
}

/// Submit a re-order request
///
/// POST /api/v1/reorders
pub async fn submit_reorder(
    State(state): State<AppState>,
    Json(form): Json<ReorderForm>,
) -> Result<(StatusCode, Json<ReorderResponse>), (StatusCode, String)> {
    let request = ReorderRequest::new(
        form.part_number.trim().to_string(),
        form.description.trim().to_string(),
        form.requester_name.trim().to_string(),
    );

    if let Err(e) = validate_model(&request) {
        state.metrics.record_reorder("rejected");
        return Err(api_error(e));
    }

    match state.ledger.append(&request).await {
        Ok(line) => {
            state.metrics.record_reorder("recorded");
            Ok((StatusCode::CREATED, Json(ReorderResponse { request, line })))
        }
        Err(e) => {
            error!(part_number = %request.part_number, error = %e, "Failed to record re-order request");
            state.metrics.record_reorder("failed");
            Err(api_error(e))
        }
    }
}

/// GET /api/v1/reorders
pub async fn list_reorders(
    State(state): State<AppState>,
) -> Result<Json<ReorderListResponse>, (StatusCode, String)> {
    let entries = state.ledger.entries().await.map_err(api_error)?;
    Ok(Json(ReorderListResponse {
        total: entries.len(),
        entries,
    }))
}
