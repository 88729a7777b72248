//! Request context extractor

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::Json;

use edubloc_core::context::RequestContext;
use edubloc_core::error::DomainError;

use crate::error::error_response;
use crate::response::ApiResponse;

/// Extracts the request context attached by the tenant middleware.
/// Missing context is the configuration-error condition: the route
/// was wired without tenant resolution.
pub struct CurrentContext(pub RequestContext);

impl<S> FromRequestParts<S> for CurrentContext
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ApiResponse<()>>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestContext>()
            .cloned()
            .map(CurrentContext)
            .ok_or_else(|| error_response(&DomainError::MissingTenantContext))
    }
}
