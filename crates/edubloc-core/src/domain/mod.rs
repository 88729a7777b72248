//! # Edubloc Core - Domain Module
//!
//! Domain entities for the edubloc platform.

pub mod tenant;
pub mod bloc_mapping;
pub mod student;
pub mod audit;

// Re-export all entities and enums
pub use tenant::Tenant;
pub use bloc_mapping::BlocMapping;
pub use student::Student;
pub use audit::{AuditAction, AuditDetails, AuditEntry};
