//! # Edubloc Core
//!
//! Domain entities, tenant resolution, request context, and
//! repository traits for the edubloc platform.

pub mod domain;
pub mod tenant;
pub mod context;
pub mod repositories;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use tenant::TenantId;
pub use context::{Actor, RequestContext};
pub use error::DomainError;
