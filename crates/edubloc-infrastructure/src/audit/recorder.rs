// ============================================================================
// Edubloc Infrastructure - Audit Recorder
// File: crates/edubloc-infrastructure/src/audit/recorder.rs
// ============================================================================
//! Best-effort audit recording for mutations on allow-listed entities

use std::collections::HashSet;

use tracing::{debug, error};

use edubloc_core::context::RequestContext;
use edubloc_core::domain::{AuditAction, AuditDetails, AuditEntry};
use edubloc_core::repositories::AuditLog;

/// Records one audit entry per observed mutation. System-initiated or
/// unauthenticated mutations are skipped; write failures are logged
/// and swallowed so the originating mutation never fails.
#[derive(Debug)]
pub struct AuditRecorder {
    allowed_entities: HashSet<String>,
}

impl AuditRecorder {
    pub fn new(allowed_entities: impl IntoIterator<Item = String>) -> Self {
        Self {
            allowed_entities: allowed_entities.into_iter().collect(),
        }
    }

    pub fn is_audited(&self, entity_type: &str) -> bool {
        self.allowed_entities.contains(entity_type)
    }

    /// Record one mutation into the given tenant's audit log. The log
    /// handle must be bound to the same tenant connection that
    /// performed the mutation.
    pub async fn record(
        &self,
        ctx: &RequestContext,
        log: &dyn AuditLog,
        action: AuditAction,
        entity_type: &str,
        entity_id: &str,
        details: AuditDetails,
    ) {
        if !self.is_audited(entity_type) {
            return;
        }

        let Some(actor) = &ctx.actor else {
            debug!(
                "Skipping audit for unauthenticated {} on {}",
                action.as_str(),
                entity_type
            );
            return;
        };

        let entry = AuditEntry::build(actor, action, entity_type, entity_id, details);

        if let Err(e) = log.record(&entry).await {
            error!(
                "Failed to write audit entry for {} {} {}: {}",
                action.as_str(),
                entity_type,
                entity_id,
                e
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use edubloc_core::context::Actor;
    use edubloc_core::error::DomainError;
    use edubloc_core::tenant::TenantId;
    use edubloc_shared::types::Pagination;
    use mockall::mock;
    use serde_json::json;
    use uuid::Uuid;

    mock! {
        Log {}

        #[async_trait]
        impl AuditLog for Log {
            async fn record(&self, entry: &AuditEntry) -> Result<(), DomainError>;
            async fn list(&self, pagination: &Pagination) -> Result<Vec<AuditEntry>, DomainError>;
        }
    }

    fn recorder() -> AuditRecorder {
        AuditRecorder::new(["student".to_string()])
    }

    fn authenticated_ctx() -> RequestContext {
        RequestContext::new()
            .with_tenant(TenantId::Subdomain("stmarys".to_string()))
            .with_actor(Actor {
                id: Uuid::new_v4(),
                display_name: "Alice Dupont".to_string(),
                bloc_id: None,
            })
    }

    #[tokio::test]
    async fn test_records_allow_listed_mutation() {
        let mut log = MockLog::new();
        log.expect_record()
            .times(1)
            .withf(|entry| {
                entry.entity_type == "student"
                    && entry.action == AuditAction::Created
                    && entry
                        .details
                        .as_ref()
                        .is_some_and(|d| d.before.is_none() && d.after.is_some())
            })
            .returning(|_| Ok(()));

        recorder()
            .record(
                &authenticated_ctx(),
                &log,
                AuditAction::Created,
                "student",
                "abc",
                AuditDetails::for_create(json!({"name": "Jean"})),
            )
            .await;
    }

    #[tokio::test]
    async fn test_skips_unauthenticated_mutation() {
        let mut log = MockLog::new();
        log.expect_record().times(0);

        let ctx = RequestContext::new().with_tenant(TenantId::Default);
        recorder()
            .record(
                &ctx,
                &log,
                AuditAction::Deleted,
                "student",
                "abc",
                AuditDetails::for_delete(json!({})),
            )
            .await;
    }

    #[tokio::test]
    async fn test_skips_entity_outside_allow_list() {
        let mut log = MockLog::new();
        log.expect_record().times(0);

        recorder()
            .record(
                &authenticated_ctx(),
                &log,
                AuditAction::Updated,
                "timetable",
                "abc",
                AuditDetails::for_update(json!({}), json!({})),
            )
            .await;
    }

    #[tokio::test]
    async fn test_write_failure_is_swallowed() {
        let mut log = MockLog::new();
        log.expect_record()
            .times(1)
            .returning(|_| Err(DomainError::DatabaseError("down".to_string())));

        // Must not panic or propagate.
        recorder()
            .record(
                &authenticated_ctx(),
                &log,
                AuditAction::Created,
                "student",
                "abc",
                AuditDetails::for_create(json!({})),
            )
            .await;
    }
}
