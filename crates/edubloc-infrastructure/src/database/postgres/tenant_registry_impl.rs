// ============================================================================
// Edubloc Infrastructure - PostgreSQL Tenant Registry
// File: crates/edubloc-infrastructure/src/database/postgres/tenant_registry_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{error, info};
use uuid::Uuid;

use edubloc_core::domain::Tenant;
use edubloc_core::error::DomainError;
use edubloc_core::repositories::TenantRegistry;

/// Central registry store over the shared, eagerly-initialized pool.
pub struct PgTenantRegistry {
    pool: PgPool,
}

impl PgTenantRegistry {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct TenantRow {
    pub id: Uuid,
    pub name: String,
    pub subdomain: String,
    pub database_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TenantRow> for Tenant {
    fn from(row: TenantRow) -> Self {
        Tenant {
            id: row.id,
            name: row.name,
            subdomain: row.subdomain,
            database_name: row.database_name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl TenantRegistry for PgTenantRegistry {
    async fn find_by_subdomain(&self, subdomain: &str) -> Result<Option<Tenant>, DomainError> {
        let row: Option<TenantRow> = sqlx::query_as(
            r#"
            SELECT id, name, subdomain, database_name, created_at, updated_at
            FROM tenants
            WHERE LOWER(subdomain) = LOWER($1)
            "#,
        )
        .bind(subdomain)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding tenant by subdomain: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_by_bloc(&self, bloc_id: i64) -> Result<Option<Tenant>, DomainError> {
        let row: Option<TenantRow> = sqlx::query_as(
            r#"
            SELECT t.id, t.name, t.subdomain, t.database_name, t.created_at, t.updated_at
            FROM tenants t
            JOIN bloc_tenants b ON b.tenant_id = t.id
            WHERE b.bloc_id = $1
            "#,
        )
        .bind(bloc_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding tenant by bloc: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn list(&self) -> Result<Vec<Tenant>, DomainError> {
        let rows: Vec<TenantRow> = sqlx::query_as(
            r#"
            SELECT id, name, subdomain, database_name, created_at, updated_at
            FROM tenants
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error listing tenants: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn create(&self, tenant: &Tenant, bloc_id: i64) -> Result<Tenant, DomainError> {
        info!("Registering tenant: {} ({})", tenant.name, tenant.subdomain);

        let mut tx = self.pool.begin().await.map_err(|e: sqlx::Error| {
            error!("Database error starting tenant registration: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        let row: TenantRow = sqlx::query_as(
            r#"
            INSERT INTO tenants (id, name, subdomain, database_name, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, subdomain, database_name, created_at, updated_at
            "#,
        )
        .bind(tenant.id)
        .bind(&tenant.name)
        .bind(&tenant.subdomain)
        .bind(&tenant.database_name)
        .bind(tenant.created_at)
        .bind(tenant.updated_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error registering tenant: {}", e);
            let msg = e.to_string();
            if msg.contains("unique") || msg.contains("duplicate") {
                DomainError::ValidationError(format!(
                    "Subdomain or database name already registered: {}",
                    tenant.subdomain
                ))
            } else {
                DomainError::DatabaseError(msg)
            }
        })?;

        sqlx::query(
            r#"
            INSERT INTO bloc_tenants (bloc_id, tenant_id)
            VALUES ($1, $2)
            "#,
        )
        .bind(bloc_id)
        .bind(tenant.id)
        .execute(&mut *tx)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error registering bloc mapping: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        tx.commit().await.map_err(|e: sqlx::Error| {
            error!("Database error committing tenant registration: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        info!("Tenant registered: {}", row.id);
        Ok(row.into())
    }
}
