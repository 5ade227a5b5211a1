pub mod health;
pub mod reorder;
pub mod search;
pub mod sources;

pub use health::*;
pub use reorder::*;
pub use search::*;
pub use sources::*;

use axum::http::StatusCode;
use labstock_utils::LabstockError;

/// Maps a domain error onto the handler error tuple
pub fn api_error(error: LabstockError) -> (StatusCode, String) {
    let status = StatusCode::from_u16(error.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, error.to_string())
}
