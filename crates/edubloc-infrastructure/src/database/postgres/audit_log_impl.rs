// ============================================================================
// Edubloc Infrastructure - PostgreSQL Audit Log
// File: crates/edubloc-infrastructure/src/database/postgres/audit_log_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{FromRow, PgPool};
use tracing::error;
use uuid::Uuid;

use edubloc_core::domain::{AuditAction, AuditDetails, AuditEntry};
use edubloc_core::error::DomainError;
use edubloc_core::repositories::AuditLog;
use edubloc_shared::types::Pagination;

/// Audit trail table inside one tenant database, isolated from every
/// other tenant.
pub struct PgAuditLog {
    pool: PgPool,
}

impl PgAuditLog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct AuditEntryRow {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub actor_id: Uuid,
    pub action: String,
    pub entity_type: String,
    pub entity_id: String,
    pub description: String,
    pub details: Option<Value>,
}

impl TryFrom<AuditEntryRow> for AuditEntry {
    type Error = DomainError;

    fn try_from(row: AuditEntryRow) -> Result<Self, Self::Error> {
        let action = AuditAction::from_str(&row.action).ok_or_else(|| {
            DomainError::DatabaseError(format!("Unknown audit action: {}", row.action))
        })?;

        let details = match row.details {
            Some(value) => Some(serde_json::from_value::<AuditDetails>(value).map_err(|e| {
                DomainError::DatabaseError(format!("Malformed audit details: {}", e))
            })?),
            None => None,
        };

        Ok(AuditEntry {
            id: row.id,
            timestamp: row.timestamp,
            actor_id: row.actor_id,
            action,
            entity_type: row.entity_type,
            entity_id: row.entity_id,
            description: row.description,
            details,
        })
    }
}

#[async_trait]
impl AuditLog for PgAuditLog {
    async fn record(&self, entry: &AuditEntry) -> Result<(), DomainError> {
        let details = match &entry.details {
            Some(details) => Some(serde_json::to_value(details).map_err(|e| {
                DomainError::ValidationError(format!("Unserializable audit details: {}", e))
            })?),
            None => None,
        };

        sqlx::query(
            r#"
            INSERT INTO audit_entries
                (id, timestamp, actor_id, action, entity_type, entity_id, description, details)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(entry.id)
        .bind(entry.timestamp)
        .bind(entry.actor_id)
        .bind(entry.action.as_str())
        .bind(&entry.entity_type)
        .bind(&entry.entity_id)
        .bind(&entry.description)
        .bind(details)
        .execute(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error recording audit entry: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(())
    }

    async fn list(&self, pagination: &Pagination) -> Result<Vec<AuditEntry>, DomainError> {
        let rows: Vec<AuditEntryRow> = sqlx::query_as(
            r#"
            SELECT id, timestamp, actor_id, action, entity_type, entity_id, description, details
            FROM audit_entries
            ORDER BY timestamp DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error listing audit entries: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        rows.into_iter().map(AuditEntry::try_from).collect()
    }
}
