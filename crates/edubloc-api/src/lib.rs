//! # Edubloc API
//!
//! HTTP handlers, tenant-resolution middleware, response envelope,
//! and application state.

pub mod handlers;
pub mod middleware;
pub mod extract;
pub mod response;
pub mod error;
pub mod state;
