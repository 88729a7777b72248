// ============================================================================
// Edubloc Core - Tenant Identifier
// File: crates/edubloc-core/src/tenant.rs
// ============================================================================
//! Tenant identifier resolution from request-derived signals

use std::fmt;

use edubloc_shared::constants::{
    ADMIN_HOST_LABEL, BLOC_ID_PREFIX, TENANT_ADMIN_PORTAL, TENANT_DEFAULT,
};

use crate::error::DomainError;

/// Per-request tenant identifier derived from the host header, an
/// authenticated identity's bloc reference, or a query parameter.
/// Lives exactly one request; only the resolved connection is cached.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TenantId {
    /// Local/default database sentinel (`default`).
    Default,
    /// Central administration pseudo-tenant (`admin_portal`). Has no
    /// tenant database of its own.
    AdminPortal,
    /// Bloc-derived identifier (`bloc_<id>`), from an authenticated
    /// identity or the `blocId` query parameter.
    Bloc(i64),
    /// Bare subdomain taken from the host's leftmost label.
    Subdomain(String),
}

impl TenantId {
    /// Derive a tenant identifier from an HTTP `Host` header value.
    ///
    /// Precedence: localhost/loopback hosts resolve to `Default`, a
    /// leftmost `admin` label resolves to `AdminPortal`, anything
    /// else takes its leftmost label as the subdomain and requires at
    /// least three dot-separated labels.
    pub fn from_host(host: &str) -> Result<Self, DomainError> {
        let normalized = host.trim().to_ascii_lowercase();

        if normalized.contains("localhost")
            || normalized.starts_with("127.0.0.1")
            || normalized.starts_with("[::1]")
            || normalized.starts_with("::1")
        {
            return Ok(TenantId::Default);
        }

        // Strip any port suffix before splitting into labels.
        let hostname = normalized.split(':').next().unwrap_or("");
        let labels: Vec<&str> = hostname.split('.').collect();
        let leftmost = labels.first().copied().unwrap_or("");

        if leftmost == ADMIN_HOST_LABEL {
            return Ok(TenantId::AdminPortal);
        }

        if leftmost.is_empty() || labels.len() < 3 {
            return Err(DomainError::MalformedHost(host.to_string()));
        }

        Ok(TenantId::Subdomain(leftmost.to_string()))
    }

    /// Parse the string form back into an identifier. A `bloc_`
    /// prefix with a non-numeric tail is treated as a plain
    /// subdomain.
    pub fn parse(value: &str) -> Self {
        match value {
            TENANT_DEFAULT => TenantId::Default,
            TENANT_ADMIN_PORTAL => TenantId::AdminPortal,
            other => match other.strip_prefix(BLOC_ID_PREFIX) {
                Some(tail) => tail
                    .parse::<i64>()
                    .map(TenantId::Bloc)
                    .unwrap_or_else(|_| TenantId::Subdomain(other.to_string())),
                None => TenantId::Subdomain(other.to_string()),
            },
        }
    }

    pub fn is_admin_portal(&self) -> bool {
        matches!(self, TenantId::AdminPortal)
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TenantId::Default => f.write_str(TENANT_DEFAULT),
            TenantId::AdminPortal => f.write_str(TENANT_ADMIN_PORTAL),
            TenantId::Bloc(id) => write!(f, "{}{}", BLOC_ID_PREFIX, id),
            TenantId::Subdomain(subdomain) => f.write_str(subdomain),
        }
    }
}
