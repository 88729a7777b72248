// ============================================================================
// Edubloc API - Tenant Administration Handlers
// File: crates/edubloc-api/src/handlers/tenants.rs
// ============================================================================
//! Central registry handlers for the administration portal
//!
//! These operate against the registry store directly; the admin
//! portal pseudo-tenant has no tenant database of its own.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use edubloc_core::domain::Tenant;
use edubloc_core::error::DomainError;

use crate::error::error_response;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Tenant DTO for administrative responses
#[derive(Debug, Serialize)]
pub struct TenantDto {
    pub id: String,
    pub name: String,
    pub subdomain: String,
    pub database_name: String,
}

impl From<Tenant> for TenantDto {
    fn from(tenant: Tenant) -> Self {
        Self {
            id: tenant.id.to_string(),
            name: tenant.name,
            subdomain: tenant.subdomain,
            database_name: tenant.database_name,
        }
    }
}

/// Tenant registration payload
#[derive(Debug, Deserialize)]
pub struct RegisterTenantRequest {
    pub name: String,
    pub subdomain: String,
    pub database_name: String,
    pub bloc_id: i64,
}

/// List tenants handler - GET /api/v1/admin/tenants
pub async fn list_tenants(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<TenantDto>>>, (StatusCode, Json<ApiResponse<()>>)> {
    let tenants = state
        .registry
        .list()
        .await
        .map_err(|e| error_response(&e))?;

    Ok(Json(ApiResponse::success(
        tenants.into_iter().map(TenantDto::from).collect(),
    )))
}

/// Register tenant handler - POST /api/v1/admin/tenants
pub async fn register_tenant(
    State(state): State<AppState>,
    Json(payload): Json<RegisterTenantRequest>,
) -> Result<Json<ApiResponse<TenantDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    let tenant = Tenant::new(payload.name, payload.subdomain, payload.database_name)
        .map_err(|e| error_response(&DomainError::ValidationError(e.to_string())))?;

    let created = state
        .registry
        .create(&tenant, payload.bloc_id)
        .await
        .map_err(|e| error_response(&e))?;

    Ok(Json(ApiResponse::success(TenantDto::from(created))))
}
