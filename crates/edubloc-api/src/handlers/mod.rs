//! HTTP handlers

pub mod health;
pub mod tenants;
pub mod students;
pub mod audit;
pub mod guardians;
