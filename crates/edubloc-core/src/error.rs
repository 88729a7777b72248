//! Domain errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Tenant not found: {0}")]
    TenantNotFound(String),

    #[error("Malformed host header: {0}")]
    MalformedHost(String),

    #[error("No tenant database behind this identifier")]
    NoTenantDatabase,

    #[error("Tenant database unavailable: {0}")]
    ConnectionUnavailable(String),

    #[error("No tenant context attached to the request")]
    MissingTenantContext,

    #[error("Entity not found: {0}")]
    EntityNotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
