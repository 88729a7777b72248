//! Audit trail handlers
//!
//! Each tenant's audit entries are queried only within that tenant's
//! own administrative views.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use edubloc_core::domain::AuditEntry;
use edubloc_core::repositories::AuditLog;
use edubloc_shared::types::Pagination;

use crate::error::error_response;
use crate::extract::CurrentContext;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AuditListQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// List audit entries handler - GET /api/v1/audit
pub async fn list_audit_entries(
    State(state): State<AppState>,
    CurrentContext(ctx): CurrentContext,
    Query(query): Query<AuditListQuery>,
) -> Result<Json<ApiResponse<Vec<AuditEntry>>>, (StatusCode, Json<ApiResponse<()>>)> {
    let repos = state
        .provider
        .for_context(&ctx)
        .await
        .map_err(|e| error_response(&e))?;

    let defaults = Pagination::default();
    let pagination = Pagination {
        page: query.page.unwrap_or(defaults.page),
        per_page: query.per_page.unwrap_or(defaults.per_page),
    };

    let entries = repos
        .audit_log()
        .list(&pagination)
        .await
        .map_err(|e| error_response(&e))?;

    Ok(Json(ApiResponse::success(entries)))
}
