//! Request middleware

pub mod tenant;

pub use tenant::{override_tenant_from_identity, resolve_tenant};
