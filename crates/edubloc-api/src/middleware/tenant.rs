// ============================================================================
// Edubloc API - Tenant Resolution Middleware
// File: crates/edubloc-api/src/middleware/tenant.rs
// ============================================================================
//! Attaches a tenant identifier to every request's context

use axum::extract::{Query, Request};
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use tracing::debug;

use edubloc_core::context::{Actor, RequestContext};
use edubloc_core::tenant::TenantId;

use crate::error::error_response;
use crate::response::ApiResponse;

#[derive(Debug, Deserialize)]
struct BlocIdQuery {
    #[serde(rename = "blocId")]
    bloc_id: Option<i64>,
}

/// First pass of tenant resolution, before authentication.
///
/// Idempotent: a context that already carries a tenant identifier is
/// left unchanged. Otherwise the `blocId` query parameter is taken
/// when present, else the identifier is derived from the `Host`
/// header. A malformed host fails the request with 400.
pub async fn resolve_tenant(
    mut req: Request,
    next: Next,
) -> Result<Response, (StatusCode, Json<ApiResponse<()>>)> {
    let existing = req.extensions().get::<RequestContext>().cloned();
    if existing.as_ref().is_some_and(|ctx| ctx.tenant.is_some()) {
        return Ok(next.run(req).await);
    }

    let from_query = Query::<BlocIdQuery>::try_from_uri(req.uri())
        .ok()
        .and_then(|q| q.bloc_id);

    let tenant = match from_query {
        Some(bloc_id) => TenantId::Bloc(bloc_id),
        None => {
            let host = req
                .headers()
                .get(header::HOST)
                .and_then(|value| value.to_str().ok())
                .unwrap_or("");
            TenantId::from_host(host).map_err(|e| error_response(&e))?
        }
    };

    debug!("Resolved tenant identifier: {}", tenant);

    let ctx = existing.unwrap_or_default().with_tenant(tenant);
    req.extensions_mut().insert(ctx);

    Ok(next.run(req).await)
}

/// Second pass, after authentication has attached an [`Actor`].
///
/// An identity carrying a bloc reference supersedes the host-derived
/// identifier: it is more precise and uniform across access channels.
pub async fn override_tenant_from_identity(mut req: Request, next: Next) -> Response {
    if let Some(actor) = req.extensions().get::<Actor>().cloned() {
        let mut ctx = req
            .extensions()
            .get::<RequestContext>()
            .cloned()
            .unwrap_or_default();

        if let Some(bloc_id) = actor.bloc_id {
            debug!("Overriding tenant identifier with bloc_{}", bloc_id);
            ctx.tenant = Some(TenantId::Bloc(bloc_id));
        }
        ctx.actor = Some(actor);

        req.extensions_mut().insert(ctx);
    }

    next.run(req).await
}
