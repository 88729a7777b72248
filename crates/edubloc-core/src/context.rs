//! Explicit per-request context
//!
//! Threaded through every call into the core instead of ambient
//! thread-local state, so the audit recorder and the scoped provider
//! stay unit-testable without a request pipeline.

use uuid::Uuid;

use crate::error::DomainError;
use crate::tenant::TenantId;

/// Authenticated actor attached to a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: Uuid,
    pub display_name: String,
    /// Bloc reference carried in the identity's token claims.
    pub bloc_id: Option<i64>,
}

/// Request-scoped context carrying the resolved tenant identifier and
/// the authenticated actor, when present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub tenant: Option<TenantId>,
    pub actor: Option<Actor>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tenant(mut self, tenant: TenantId) -> Self {
        self.tenant = Some(tenant);
        self
    }

    pub fn with_actor(mut self, actor: Actor) -> Self {
        self.actor = Some(actor);
        self
    }

    /// Tenant identifier, or the programming-error condition when
    /// data access is attempted before resolution ran.
    pub fn tenant(&self) -> Result<&TenantId, DomainError> {
        self.tenant.as_ref().ok_or(DomainError::MissingTenantContext)
    }

    pub fn is_authenticated(&self) -> bool {
        self.actor.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tenant_missing_is_a_context_error() {
        let ctx = RequestContext::new();
        assert!(matches!(ctx.tenant(), Err(DomainError::MissingTenantContext)));
    }

    #[test]
    fn test_tenant_present() {
        let ctx = RequestContext::new().with_tenant(TenantId::Bloc(7));
        assert_eq!(ctx.tenant().unwrap(), &TenantId::Bloc(7));
    }
}
