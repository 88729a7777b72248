use std::net::SocketAddr;
use std::sync::Arc;

use axum::middleware::from_fn;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use edubloc_api::handlers::{audit, guardians, health, students, tenants};
use edubloc_api::middleware::{override_tenant_from_identity, resolve_tenant};
use edubloc_api::state::AppState;
use edubloc_core::repositories::TenantRegistry;
use edubloc_infrastructure::audit::AuditRecorder;
use edubloc_infrastructure::database::{connection, PgTenantRegistry};
use edubloc_infrastructure::fanout::GuardianSearchService;
use edubloc_infrastructure::tenancy::{ScopedRepositoryProvider, TenantConnectionManager};
use edubloc_shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Initialize telemetry
    edubloc_shared::telemetry::init_telemetry();

    info!("Edubloc server starting...");

    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Connect the central registry database (eager, process lifetime)
    info!(
        "Connecting to central registry database {}...",
        config.database.central_database
    );
    let central_pool = connection::create_central_pool(&config.database).await?;
    info!("Central registry connection established.");

    // Wire the tenant routing core
    let registry: Arc<dyn TenantRegistry> = Arc::new(PgTenantRegistry::new(central_pool));
    let manager = Arc::new(TenantConnectionManager::new(
        registry.clone(),
        config.database.clone(),
    ));
    let recorder = Arc::new(AuditRecorder::new(config.audit.entities.clone()));
    let provider = Arc::new(ScopedRepositoryProvider::new(
        manager.clone(),
        recorder.clone(),
    ));
    let guardian_search = Arc::new(GuardianSearchService::new(
        registry.clone(),
        manager.clone(),
    ));

    let state = AppState {
        config: config.clone(),
        registry,
        manager,
        provider,
        guardian_search,
    };

    // Build router. The tenant resolver runs first on every request;
    // the identity override runs after the (external) authentication
    // layer has attached the actor.
    let app = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Central administration portal
        .route(
            "/api/v1/admin/tenants",
            get(tenants::list_tenants).post(tenants::register_tenant),
        )
        // Tenant-scoped routes
        .route("/api/v1/students", post(students::create_student))
        .route(
            "/api/v1/students/{id}",
            get(students::get_student)
                .put(students::update_student)
                .delete(students::delete_student),
        )
        .route("/api/v1/audit", get(audit::list_audit_entries))
        // Guardian fan-out search
        .route("/api/v1/guardians/search", get(guardians::search_guardian))
        // Add State
        .with_state(state)
        // Middleware (outermost layer runs first)
        .layer(from_fn(override_tenant_from_identity))
        .layer(from_fn(resolve_tenant))
        // Add CORS
        .layer(CorsLayer::permissive());

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
