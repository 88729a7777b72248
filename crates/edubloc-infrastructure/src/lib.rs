//! # Edubloc Infrastructure
//!
//! PostgreSQL adapters, tenant connection routing, scoped repository
//! provisioning, and the audit recorder.

pub mod database;
pub mod tenancy;
pub mod audit;
pub mod fanout;

pub use database::{create_central_pool, PgAuditLog, PgStudentRepository, PgTenantRegistry};
pub use tenancy::{ScopedRepositoryProvider, TenantConnectionManager, TenantRepositories};
pub use audit::AuditRecorder;
pub use fanout::{GuardianMatch, GuardianSearchService};
