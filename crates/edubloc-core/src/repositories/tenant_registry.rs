//! Central registry trait (port)
//!
//! The single shared store listing every onboarded school and the
//! bloc mappings pointing at them.

use async_trait::async_trait;

use crate::domain::Tenant;
use crate::error::DomainError;

#[async_trait]
pub trait TenantRegistry: Send + Sync {
    /// Tenant whose unique subdomain equals the given string.
    async fn find_by_subdomain(&self, subdomain: &str) -> Result<Option<Tenant>, DomainError>;

    /// Tenant mapped from the given numeric bloc identifier.
    async fn find_by_bloc(&self, bloc_id: i64) -> Result<Option<Tenant>, DomainError>;

    /// Every onboarded tenant, for the fan-out search.
    async fn list(&self) -> Result<Vec<Tenant>, DomainError>;

    /// Provisioning write path: register a tenant together with its
    /// bloc mapping.
    async fn create(&self, tenant: &Tenant, bloc_id: i64) -> Result<Tenant, DomainError>;
}
