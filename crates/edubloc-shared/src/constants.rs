//! Application-wide constants

/// Sentinel tenant identifier for the local/default database.
pub const TENANT_DEFAULT: &str = "default";

/// Sentinel tenant identifier for the central administration portal.
/// No tenant database exists behind it.
pub const TENANT_ADMIN_PORTAL: &str = "admin_portal";

/// Prefix of bloc-derived tenant identifiers (`bloc_<id>`).
pub const BLOC_ID_PREFIX: &str = "bloc_";

/// Host label that routes to the central administration portal.
pub const ADMIN_HOST_LABEL: &str = "admin";

/// Query parameter carrying a bloc identifier for channels that
/// cannot embed it in the authenticated identity.
pub const BLOC_ID_QUERY_PARAM: &str = "blocId";

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;
