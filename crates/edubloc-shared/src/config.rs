//! Configuration management

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub audit: AuditSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
}

/// Shared PostgreSQL settings. All tenant databases live on the same
/// host and share credentials; only the database name differs.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Central registry database (tenants + bloc mappings).
    pub central_database: String,
    /// Database used for the `default` tenant sentinel (local dev).
    pub default_database: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// When true, a freshly opened tenant pool is validated with one
    /// acquire before it is cached.
    pub validate_on_open: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuditSettings {
    /// Entity types whose mutations are recorded in the tenant's
    /// audit trail.
    pub entities: Vec<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.host", "127.0.0.1")?
            .set_default("app.port", 8080)?
            .set_default("app.name", "edubloc-server")?
            .set_default("database.host", "127.0.0.1")?
            .set_default("database.port", 5432)?
            .set_default("database.username", "postgres")?
            .set_default("database.password", "")?
            .set_default("database.central_database", "edubloc_central")?
            .set_default("database.default_database", "edubloc_default")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default("database.validate_on_open", true)?
            .set_default(
                "audit.entities",
                vec!["student".to_string(), "guardian".to_string()],
            )?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::default().separator("__").try_parsing(true))
            .build()?;
        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_load() {
        let config = AppConfig::load().expect("defaults should deserialize");
        assert_eq!(config.database.central_database, "edubloc_central");
        assert_eq!(config.database.default_database, "edubloc_default");
        assert!(config.audit.entities.contains(&"student".to_string()));
    }
}
