//! PostgreSQL repository implementations

pub mod tenant_registry_impl;
pub mod student_repo_impl;
pub mod audit_log_impl;

pub use tenant_registry_impl::PgTenantRegistry;
pub use student_repo_impl::PgStudentRepository;
pub use audit_log_impl::PgAuditLog;
