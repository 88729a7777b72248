//! Repository traits (ports)

pub mod tenant_registry;
pub mod student_repository;
pub mod audit_log;

pub use tenant_registry::TenantRegistry;
pub use student_repository::StudentRepository;
pub use audit_log::AuditLog;
