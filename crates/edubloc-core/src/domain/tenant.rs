// ============================================================================
// Edubloc Core - Tenant Entity
// File: crates/edubloc-core/src/domain/tenant.rs
// Description: One onboarded school with its own isolated database
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// One onboarded school. Created by the provisioning flow, read-only
/// to the routing core.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Tenant {
    pub id: Uuid,

    #[validate(length(min = 1, message = "Tenant name is required"))]
    pub name: String,

    /// Unique subdomain the school is reached under.
    #[validate(length(min = 1, message = "Subdomain is required"))]
    pub subdomain: String,

    /// Unique physical database name owned by this school.
    #[validate(length(min = 1, message = "Database name is required"))]
    pub database_name: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Tenant {
    pub fn new(
        name: String,
        subdomain: String,
        database_name: String,
    ) -> Result<Self, validator::ValidationErrors> {
        let tenant = Self {
            id: Uuid::new_v4(),
            name,
            subdomain: subdomain.to_ascii_lowercase(),
            database_name,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        tenant.validate()?;
        Ok(tenant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tenant() {
        let tenant = Tenant::new(
            "St Marys".to_string(),
            "StMarys".to_string(),
            "edubloc_stmarys".to_string(),
        )
        .unwrap();
        assert_eq!(tenant.subdomain, "stmarys");
    }

    #[test]
    fn test_empty_subdomain_rejected() {
        let tenant = Tenant::new(
            "St Marys".to_string(),
            String::new(),
            "edubloc_stmarys".to_string(),
        );
        assert!(tenant.is_err());
    }
}
