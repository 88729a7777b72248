// ============================================================================
// Edubloc Infrastructure - Guardian Fan-Out Search
// File: crates/edubloc-infrastructure/src/fanout.rs
// ============================================================================
//! Cross-tenant guardian search as repeated single-tenant lookups

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use edubloc_core::domain::Student;
use edubloc_core::error::DomainError;
use edubloc_core::repositories::{StudentRepository, TenantRegistry};
use edubloc_shared::utils::mask_email;

use crate::database::postgres::PgStudentRepository;
use crate::tenancy::TenantConnectionManager;

/// One student record found for a guardian, tagged with the school it
/// belongs to.
#[derive(Debug, Clone, Serialize)]
pub struct GuardianMatch {
    pub tenant_id: Uuid,
    pub tenant_name: String,
    pub subdomain: String,
    pub student: Student,
}

/// Guardian search across every onboarded school. The one legitimate
/// cross-tenant operation: iterates the central registry and performs
/// isolated per-tenant lookups, never a joined query.
pub struct GuardianSearchService {
    registry: Arc<dyn TenantRegistry>,
    manager: Arc<TenantConnectionManager>,
}

impl GuardianSearchService {
    pub fn new(registry: Arc<dyn TenantRegistry>, manager: Arc<TenantConnectionManager>) -> Self {
        Self { registry, manager }
    }

    pub async fn search(&self, guardian_email: &str) -> Result<Vec<GuardianMatch>, DomainError> {
        let tenants = self.registry.list().await?;
        info!(
            "Guardian search for {} across {} tenants",
            mask_email(guardian_email),
            tenants.len()
        );

        let mut matches = Vec::new();
        for tenant in tenants {
            let pool = match self.manager.open(&tenant.database_name).await {
                Ok(pool) => pool,
                Err(e) => {
                    warn!("Skipping tenant {} in guardian search: {}", tenant.subdomain, e);
                    continue;
                }
            };

            let students = PgStudentRepository::new((*pool).clone());
            match students.find_by_guardian_email(guardian_email).await {
                Ok(found) => matches.extend(found.into_iter().map(|student| GuardianMatch {
                    tenant_id: tenant.id,
                    tenant_name: tenant.name.clone(),
                    subdomain: tenant.subdomain.clone(),
                    student,
                })),
                Err(e) => {
                    warn!("Guardian lookup failed in tenant {}: {}", tenant.subdomain, e);
                }
            }
        }

        Ok(matches)
    }
}
