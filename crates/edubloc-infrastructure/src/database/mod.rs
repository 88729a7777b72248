//! Database module (PostgreSQL adapters)

pub mod connection;
pub mod postgres;

pub use connection::create_central_pool;
pub use postgres::{PgAuditLog, PgStudentRepository, PgTenantRegistry};
