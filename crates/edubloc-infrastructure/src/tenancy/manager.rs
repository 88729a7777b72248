// ============================================================================
// Edubloc Infrastructure - Tenant Connection Manager
// File: crates/edubloc-infrastructure/src/tenancy/manager.rs
// ============================================================================
//! Resolves tenant identifiers to cached per-tenant connection pools

use std::sync::Arc;

use dashmap::DashMap;
use sqlx::PgPool;
use tracing::{debug, info, warn};

use edubloc_core::error::DomainError;
use edubloc_core::repositories::TenantRegistry;
use edubloc_core::tenant::TenantId;
use edubloc_shared::config::DatabaseSettings;

use crate::database::connection;

/// Owns every live tenant pool for the lifetime of the process.
///
/// Pools are cached by physical database name, not by the transient
/// tenant identifier, so a bloc-based and a subdomain-based resolution
/// of the same tenant share one cached pool. Entries are never
/// evicted; the tenant set is small and changes rarely.
pub struct TenantConnectionManager {
    registry: Arc<dyn TenantRegistry>,
    settings: DatabaseSettings,
    pools: DashMap<String, Arc<PgPool>>,
}

impl TenantConnectionManager {
    pub fn new(registry: Arc<dyn TenantRegistry>, settings: DatabaseSettings) -> Self {
        info!("Initializing tenant connection manager");
        Self {
            registry,
            settings,
            pools: DashMap::new(),
        }
    }

    /// Resolve an identifier to its tenant's pool, opening and caching
    /// the pool on first use.
    pub async fn resolve(&self, tenant: &TenantId) -> Result<Arc<PgPool>, DomainError> {
        let database_name = self.database_name_for(tenant).await?;
        self.open(&database_name).await
    }

    async fn database_name_for(&self, tenant: &TenantId) -> Result<String, DomainError> {
        match tenant {
            TenantId::Default => Ok(self.settings.default_database.clone()),
            // The central administration portal operates against the
            // registry store directly; it owns no tenant database.
            TenantId::AdminPortal => Err(DomainError::NoTenantDatabase),
            TenantId::Bloc(bloc_id) => self
                .registry
                .find_by_bloc(*bloc_id)
                .await?
                .map(|t| t.database_name)
                .ok_or_else(|| DomainError::TenantNotFound(tenant.to_string())),
            TenantId::Subdomain(subdomain) => self
                .registry
                .find_by_subdomain(subdomain)
                .await?
                .map(|t| t.database_name)
                .ok_or_else(|| DomainError::TenantNotFound(tenant.to_string())),
        }
    }

    /// Pool for a known database name: cache hit, or lazy open plus
    /// atomic get-or-insert so concurrent racers converge on one entry.
    pub async fn open(&self, database_name: &str) -> Result<Arc<PgPool>, DomainError> {
        if let Some(existing) = self.pools.get(database_name) {
            if !existing.value().is_closed() {
                debug!("Connection cache hit for {}", database_name);
                return Ok(existing.value().clone());
            }
            // Torn-down entry: fall through and re-initialize below.
        }

        let pool = Arc::new(connection::lazy_tenant_pool(&self.settings, database_name));

        if self.settings.validate_on_open {
            if let Err(e) = pool.acquire().await {
                warn!("Tenant database {} unavailable: {}", database_name, e);
                return Err(DomainError::ConnectionUnavailable(e.to_string()));
            }
        }

        let mut entry = self
            .pools
            .entry(database_name.to_string())
            .or_insert_with(|| pool.clone());
        if entry.value().is_closed() {
            *entry.value_mut() = pool;
        }
        let cached = entry.value().clone();
        drop(entry);

        info!("Tenant connection cached for {}", database_name);
        Ok(cached)
    }

    /// Database names with a live cached pool, in insertion-agnostic
    /// order. Torn-down entries are excluded.
    pub fn cached_databases(&self) -> Vec<String> {
        self.pools
            .iter()
            .filter(|e| !e.value().is_closed())
            .map(|e| e.key().clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use edubloc_core::domain::Tenant;
    use mockall::mock;

    mock! {
        Registry {}

        #[async_trait]
        impl TenantRegistry for Registry {
            async fn find_by_subdomain(&self, subdomain: &str) -> Result<Option<Tenant>, DomainError>;
            async fn find_by_bloc(&self, bloc_id: i64) -> Result<Option<Tenant>, DomainError>;
            async fn list(&self) -> Result<Vec<Tenant>, DomainError>;
            async fn create(&self, tenant: &Tenant, bloc_id: i64) -> Result<Tenant, DomainError>;
        }
    }

    fn settings() -> DatabaseSettings {
        DatabaseSettings {
            host: "127.0.0.1".to_string(),
            port: 5432,
            username: "postgres".to_string(),
            password: String::new(),
            central_database: "edubloc_central".to_string(),
            default_database: "edubloc_default".to_string(),
            max_connections: 2,
            min_connections: 0,
            validate_on_open: false,
        }
    }

    fn stmarys() -> Tenant {
        Tenant::new(
            "St Marys".to_string(),
            "stmarys".to_string(),
            "edubloc_stmarys".to_string(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_second_resolve_is_served_from_cache() {
        let mut registry = MockRegistry::new();
        registry
            .expect_find_by_subdomain()
            .times(2)
            .returning(|_| Ok(Some(stmarys())));

        let manager = TenantConnectionManager::new(Arc::new(registry), settings());
        let id = TenantId::Subdomain("stmarys".to_string());

        let first = manager.resolve(&id).await.unwrap();
        let second = manager.resolve(&id).await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(manager.cached_databases(), vec!["edubloc_stmarys".to_string()]);
    }

    #[tokio::test]
    async fn test_unmapped_bloc_is_not_found_and_cache_stays_empty() {
        let mut registry = MockRegistry::new();
        registry.expect_find_by_bloc().returning(|_| Ok(None));

        let manager = TenantConnectionManager::new(Arc::new(registry), settings());

        let err = manager.resolve(&TenantId::Bloc(99)).await.unwrap_err();
        assert!(matches!(err, DomainError::TenantNotFound(_)));
        assert!(manager.cached_databases().is_empty());
    }

    #[tokio::test]
    async fn test_admin_portal_never_resolves() {
        let manager =
            TenantConnectionManager::new(Arc::new(MockRegistry::new()), settings());

        let err = manager.resolve(&TenantId::AdminPortal).await.unwrap_err();
        assert!(matches!(err, DomainError::NoTenantDatabase));
        assert!(manager.cached_databases().is_empty());
    }

    #[tokio::test]
    async fn test_default_resolves_to_configured_default_database() {
        let manager =
            TenantConnectionManager::new(Arc::new(MockRegistry::new()), settings());

        manager.resolve(&TenantId::Default).await.unwrap();
        assert_eq!(manager.cached_databases(), vec!["edubloc_default".to_string()]);
    }

    #[tokio::test]
    async fn test_bloc_and_subdomain_share_one_cached_pool() {
        let mut registry = MockRegistry::new();
        registry
            .expect_find_by_bloc()
            .returning(|_| Ok(Some(stmarys())));
        registry
            .expect_find_by_subdomain()
            .returning(|_| Ok(Some(stmarys())));

        let manager = TenantConnectionManager::new(Arc::new(registry), settings());

        let by_bloc = manager.resolve(&TenantId::Bloc(3)).await.unwrap();
        let by_subdomain = manager
            .resolve(&TenantId::Subdomain("stmarys".to_string()))
            .await
            .unwrap();

        assert!(Arc::ptr_eq(&by_bloc, &by_subdomain));
        assert_eq!(manager.cached_databases().len(), 1);
    }

    #[tokio::test]
    async fn test_closed_pool_is_not_listed_and_is_reopened_on_resolve() {
        let manager =
            TenantConnectionManager::new(Arc::new(MockRegistry::new()), settings());

        let pool = manager.resolve(&TenantId::Default).await.unwrap();
        assert_eq!(manager.cached_databases(), vec!["edubloc_default".to_string()]);

        pool.close().await;
        assert!(manager.cached_databases().is_empty());

        let reopened = manager.resolve(&TenantId::Default).await.unwrap();
        assert!(!Arc::ptr_eq(&pool, &reopened));
        assert_eq!(manager.cached_databases(), vec!["edubloc_default".to_string()]);
    }

    #[tokio::test]
    async fn test_concurrent_first_resolution_converges_on_one_entry() {
        let mut registry = MockRegistry::new();
        registry
            .expect_find_by_subdomain()
            .returning(|_| Ok(Some(stmarys())));

        let manager = Arc::new(TenantConnectionManager::new(Arc::new(registry), settings()));
        let id = TenantId::Subdomain("stmarys".to_string());

        let (a, b, c, d) = tokio::join!(
            manager.resolve(&id),
            manager.resolve(&id),
            manager.resolve(&id),
            manager.resolve(&id),
        );

        let a = a.unwrap();
        for pool in [b.unwrap(), c.unwrap(), d.unwrap()] {
            assert!(Arc::ptr_eq(&a, &pool));
        }
        assert_eq!(manager.cached_databases().len(), 1);
    }
}
