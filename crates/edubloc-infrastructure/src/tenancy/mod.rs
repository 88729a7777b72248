//! Tenant connection routing
//!
//! Resolves a per-request tenant identifier to that tenant's pooled
//! connection and hands out request-scoped repository bundles.

pub mod manager;
pub mod scoped;

pub use manager::TenantConnectionManager;
pub use scoped::{ScopedRepositoryProvider, TenantRepositories};
