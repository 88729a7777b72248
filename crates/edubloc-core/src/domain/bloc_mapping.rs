//! Bloc-to-tenant mapping entity

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Associates an internal numeric bloc identifier (embedded in
/// authenticated identities) with a tenant. Immutable once
/// provisioned; lookups by bloc id return at most one tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlocMapping {
    pub bloc_id: i64,
    pub tenant_id: Uuid,
}

impl BlocMapping {
    pub fn new(bloc_id: i64, tenant_id: Uuid) -> Self {
        Self { bloc_id, tenant_id }
    }
}
