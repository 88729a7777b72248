//! Application state shared across handlers

use std::sync::Arc;

use edubloc_core::repositories::TenantRegistry;
use edubloc_infrastructure::fanout::GuardianSearchService;
use edubloc_infrastructure::tenancy::{ScopedRepositoryProvider, TenantConnectionManager};
use edubloc_shared::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    /// Central registry over the shared, process-lifetime pool. The
    /// admin portal operates against this directly.
    pub registry: Arc<dyn TenantRegistry>,
    pub manager: Arc<TenantConnectionManager>,
    pub provider: Arc<ScopedRepositoryProvider>,
    pub guardian_search: Arc<GuardianSearchService>,
}
