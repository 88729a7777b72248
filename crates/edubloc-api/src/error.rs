//! HTTP mapping for domain errors

use axum::http::StatusCode;
use axum::Json;

use edubloc_core::error::DomainError;

use crate::response::ApiResponse;

/// Convert a domain error into the user-facing HTTP error response.
/// Resolution and connection errors are recovered here, at the
/// request boundary; they are never retried inside the core.
pub fn error_response(err: &DomainError) -> (StatusCode, Json<ApiResponse<()>>) {
    let (status, code) = match err {
        DomainError::TenantNotFound(_) => (StatusCode::NOT_FOUND, "TENANT_NOT_FOUND"),
        DomainError::MalformedHost(_) => (StatusCode::BAD_REQUEST, "MALFORMED_HOST"),
        DomainError::NoTenantDatabase => (StatusCode::NOT_FOUND, "NO_TENANT_DATABASE"),
        DomainError::ConnectionUnavailable(_) => {
            (StatusCode::SERVICE_UNAVAILABLE, "TENANT_DATABASE_UNAVAILABLE")
        }
        DomainError::MissingTenantContext => {
            (StatusCode::INTERNAL_SERVER_ERROR, "MISSING_TENANT_CONTEXT")
        }
        DomainError::EntityNotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        DomainError::ValidationError(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        DomainError::DatabaseError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
    };

    (status, Json(ApiResponse::error(code, &err.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (DomainError::TenantNotFound("bloc_9".into()), StatusCode::NOT_FOUND),
            (DomainError::MalformedHost("x".into()), StatusCode::BAD_REQUEST),
            (DomainError::NoTenantDatabase, StatusCode::NOT_FOUND),
            (
                DomainError::ConnectionUnavailable("down".into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                DomainError::MissingTenantContext,
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            let (status, _) = error_response(&err);
            assert_eq!(status, expected, "{err}");
        }
    }
}
