// ============================================================================
// Edubloc Infrastructure - Scoped Repository Provider
// File: crates/edubloc-infrastructure/src/tenancy/scoped.rs
// ============================================================================
//! Request-scoped data-access handles bound to the current tenant

use std::sync::Arc;

use sqlx::PgPool;

use edubloc_core::context::RequestContext;
use edubloc_core::error::DomainError;

use crate::audit::{AuditRecorder, AuditedStudentRepository};
use crate::database::postgres::{PgAuditLog, PgStudentRepository};

use super::manager::TenantConnectionManager;

/// Long-lived factory that turns a request context into a bundle of
/// repositories wired to that request's tenant database. Feature code
/// never touches connection plumbing.
pub struct ScopedRepositoryProvider {
    manager: Arc<TenantConnectionManager>,
    recorder: Arc<AuditRecorder>,
}

impl ScopedRepositoryProvider {
    pub fn new(manager: Arc<TenantConnectionManager>, recorder: Arc<AuditRecorder>) -> Self {
        Self { manager, recorder }
    }

    /// Repositories for one request. Fails fast with the
    /// programming-error condition when no tenant identifier has been
    /// attached to the context yet.
    pub async fn for_context(
        &self,
        ctx: &RequestContext,
    ) -> Result<TenantRepositories, DomainError> {
        let tenant = ctx.tenant()?;
        let pool = self.manager.resolve(tenant).await?;

        Ok(TenantRepositories {
            pool,
            recorder: self.recorder.clone(),
            ctx: ctx.clone(),
        })
    }
}

/// Repository bundle for exactly one request. Handles are constructed
/// fresh per request; only the underlying pool is shared and cached.
#[derive(Debug)]
pub struct TenantRepositories {
    pool: Arc<PgPool>,
    recorder: Arc<AuditRecorder>,
    ctx: RequestContext,
}

impl TenantRepositories {
    /// Student repository with audit recording wired in.
    pub fn students(&self) -> AuditedStudentRepository<PgStudentRepository, PgAuditLog> {
        AuditedStudentRepository::new(
            PgStudentRepository::new((*self.pool).clone()),
            PgAuditLog::new((*self.pool).clone()),
            self.recorder.clone(),
            self.ctx.clone(),
        )
    }

    /// Read side of this tenant's audit trail.
    pub fn audit_log(&self) -> PgAuditLog {
        PgAuditLog::new((*self.pool).clone())
    }
}
