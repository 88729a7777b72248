//! Guardian fan-out search handler

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use edubloc_core::error::DomainError;
use edubloc_infrastructure::fanout::GuardianMatch;

use crate::error::error_response;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GuardianSearchQuery {
    pub email: String,
}

/// Guardian search handler - GET /api/v1/guardians/search
///
/// Spans every school a guardian has children in; implemented as
/// repeated single-tenant lookups through the connection manager.
pub async fn search_guardian(
    State(state): State<AppState>,
    Query(query): Query<GuardianSearchQuery>,
) -> Result<Json<ApiResponse<Vec<GuardianMatch>>>, (StatusCode, Json<ApiResponse<()>>)> {
    if query.email.is_empty() {
        return Err(error_response(&DomainError::ValidationError(
            "Guardian email is required".to_string(),
        )));
    }

    let matches = state
        .guardian_search
        .search(&query.email)
        .await
        .map_err(|e| error_response(&e))?;

    Ok(Json(ApiResponse::success(matches)))
}
