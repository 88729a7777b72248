//! Audit log trait (port)

use async_trait::async_trait;

use crate::domain::AuditEntry;
use crate::error::DomainError;
use edubloc_shared::types::Pagination;

#[async_trait]
pub trait AuditLog: Send + Sync {
    /// Append one entry to the tenant's audit trail.
    async fn record(&self, entry: &AuditEntry) -> Result<(), DomainError>;

    /// Entries of this tenant, newest first.
    async fn list(&self, pagination: &Pagination) -> Result<Vec<AuditEntry>, DomainError>;
}
