// ============================================================================
// Edubloc Infrastructure - Audited Student Repository
// File: crates/edubloc-infrastructure/src/audit/audited_students.rs
// ============================================================================
//! Student repository decorator that records mutations in the audit
//! trail of the same tenant connection

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use edubloc_core::context::RequestContext;
use edubloc_core::domain::{AuditAction, AuditDetails, Student};
use edubloc_core::error::DomainError;
use edubloc_core::repositories::{AuditLog, StudentRepository};

use super::recorder::AuditRecorder;

const ENTITY_TYPE: &str = "student";

/// Wraps a student repository so every successful create, update, and
/// delete leaves exactly one audit entry, written through the same
/// tenant connection. Feature code only ever sees the
/// `StudentRepository` trait.
pub struct AuditedStudentRepository<R, L> {
    inner: R,
    audit_log: L,
    recorder: Arc<AuditRecorder>,
    ctx: RequestContext,
}

impl<R, L> AuditedStudentRepository<R, L> {
    pub fn new(inner: R, audit_log: L, recorder: Arc<AuditRecorder>, ctx: RequestContext) -> Self {
        Self {
            inner,
            audit_log,
            recorder,
            ctx,
        }
    }
}

fn snapshot(student: &Student) -> Value {
    serde_json::to_value(student).unwrap_or(Value::Null)
}

#[async_trait]
impl<R, L> StudentRepository for AuditedStudentRepository<R, L>
where
    R: StudentRepository,
    L: AuditLog,
{
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Student>, DomainError> {
        self.inner.find_by_id(id).await
    }

    async fn find_by_guardian_email(&self, email: &str) -> Result<Vec<Student>, DomainError> {
        self.inner.find_by_guardian_email(email).await
    }

    async fn create(&self, student: &Student) -> Result<Student, DomainError> {
        let created = self.inner.create(student).await?;

        self.recorder
            .record(
                &self.ctx,
                &self.audit_log,
                AuditAction::Created,
                ENTITY_TYPE,
                &created.id.to_string(),
                AuditDetails::for_create(snapshot(&created)),
            )
            .await;

        Ok(created)
    }

    async fn update(&self, student: &Student) -> Result<Student, DomainError> {
        let before = self
            .inner
            .find_by_id(&student.id)
            .await?
            .ok_or_else(|| DomainError::EntityNotFound(student.id.to_string()))?;

        let updated = self.inner.update(student).await?;

        self.recorder
            .record(
                &self.ctx,
                &self.audit_log,
                AuditAction::Updated,
                ENTITY_TYPE,
                &updated.id.to_string(),
                AuditDetails::for_update(snapshot(&before), snapshot(&updated)),
            )
            .await;

        Ok(updated)
    }

    async fn delete(&self, id: &Uuid) -> Result<Option<Student>, DomainError> {
        let deleted = self.inner.delete(id).await?;

        if let Some(before) = &deleted {
            self.recorder
                .record(
                    &self.ctx,
                    &self.audit_log,
                    AuditAction::Deleted,
                    ENTITY_TYPE,
                    &id.to_string(),
                    AuditDetails::for_delete(snapshot(before)),
                )
                .await;
        }

        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edubloc_core::context::Actor;
    use edubloc_core::domain::AuditEntry;
    use edubloc_core::tenant::TenantId;
    use edubloc_shared::types::Pagination;
    use mockall::mock;

    mock! {
        Students {}

        #[async_trait]
        impl StudentRepository for Students {
            async fn find_by_id(&self, id: &Uuid) -> Result<Option<Student>, DomainError>;
            async fn find_by_guardian_email(&self, email: &str) -> Result<Vec<Student>, DomainError>;
            async fn create(&self, student: &Student) -> Result<Student, DomainError>;
            async fn update(&self, student: &Student) -> Result<Student, DomainError>;
            async fn delete(&self, id: &Uuid) -> Result<Option<Student>, DomainError>;
        }
    }

    mock! {
        Log {}

        #[async_trait]
        impl AuditLog for Log {
            async fn record(&self, entry: &AuditEntry) -> Result<(), DomainError>;
            async fn list(&self, pagination: &Pagination) -> Result<Vec<AuditEntry>, DomainError>;
        }
    }

    fn student() -> Student {
        Student::new(
            "Jean Martin".to_string(),
            "parent@example.com".to_string(),
            Some("CM2".to_string()),
        )
        .unwrap()
    }

    fn recorder() -> Arc<AuditRecorder> {
        Arc::new(AuditRecorder::new(["student".to_string()]))
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
    async fn test_create_records_after_only_snapshot() {
        let subject = student();
        let returned = subject.clone();

        let mut inner = MockStudents::new();
        inner.expect_create().returning(move |_| Ok(returned.clone()));

        let mut log = MockLog::new();
        log.expect_record()
            .times(1)
            .withf(|entry| {
                entry.action == AuditAction::Created
                    && entry
                        .details
                        .as_ref()
                        .is_some_and(|d| d.before.is_none() && d.after.is_some())
            })
            .returning(|_| Ok(()));

        let repo = AuditedStudentRepository::new(inner, log, recorder(), authenticated_ctx());
        repo.create(&subject).await.unwrap();
    }

    #[tokio::test]
    async fn test_update_records_before_and_after_snapshots() {
        let mut subject = student();
        let before = subject.clone();
        subject
            .update_details(
                "Jean M. Martin".to_string(),
                "parent@example.com".to_string(),
                Some("CM2".to_string()),
            )
            .unwrap();
        let after = subject.clone();

        let mut inner = MockStudents::new();
        inner
            .expect_find_by_id()
            .returning(move |_| Ok(Some(before.clone())));
        inner.expect_update().returning(move |_| Ok(after.clone()));

        let mut log = MockLog::new();
        log.expect_record()
            .times(1)
            .withf(|entry| {
                entry.action == AuditAction::Updated
                    && entry
                        .details
                        .as_ref()
                        .is_some_and(|d| d.before.is_some() && d.after.is_some())
            })
            .returning(|_| Ok(()));

        let repo = AuditedStudentRepository::new(inner, log, recorder(), authenticated_ctx());
        repo.update(&subject).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_records_before_only_snapshot() {
        let subject = student();
        let deleted = subject.clone();

        let mut inner = MockStudents::new();
        inner
            .expect_delete()
            .returning(move |_| Ok(Some(deleted.clone())));

        let mut log = MockLog::new();
        log.expect_record()
            .times(1)
            .withf(|entry| {
                entry.action == AuditAction::Deleted
                    && entry
                        .details
                        .as_ref()
                        .is_some_and(|d| d.before.is_some() && d.after.is_none())
            })
            .returning(|_| Ok(()));

        let repo = AuditedStudentRepository::new(inner, log, recorder(), authenticated_ctx());
        repo.delete(&subject.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_unauthenticated_mutation_produces_no_entry() {
        let subject = student();
        let returned = subject.clone();

        let mut inner = MockStudents::new();
        inner.expect_create().returning(move |_| Ok(returned.clone()));

        let mut log = MockLog::new();
        log.expect_record().times(0);

        let ctx = RequestContext::new().with_tenant(TenantId::Default);
        let repo = AuditedStudentRepository::new(inner, log, recorder(), ctx);
        repo.create(&subject).await.unwrap();
    }

    #[tokio::test]
    async fn test_audit_failure_never_fails_the_mutation() {
        let subject = student();
        let returned = subject.clone();

        let mut inner = MockStudents::new();
        inner.expect_create().returning(move |_| Ok(returned.clone()));

        let mut log = MockLog::new();
        log.expect_record()
            .returning(|_| Err(DomainError::DatabaseError("down".to_string())));

        let repo = AuditedStudentRepository::new(inner, log, recorder(), authenticated_ctx());
        assert!(repo.create(&subject).await.is_ok());
    }
}
