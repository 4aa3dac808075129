use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    /// Allowed origins. No CORS layer is installed when empty.
    #[serde(default)]
    pub allow_origins: Vec<String>,
    #[serde(default = "default_cors_max_age")]
    pub max_age: u64,
}

fn default_cors_max_age() -> u64 {
    3600
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_origins: Vec::new(),
            max_age: default_cors_max_age(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Log every SQL statement through `tracing`. Default: false.
    #[serde(default)]
    pub log_queries: bool,
}

fn default_max_connections() -> u32 {
    10
}
fn default_min_connections() -> u32 {
    1
}

impl DatabaseConfig {
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            log_queries: false,
        }
    }
}

/// Location of the front-end assets mounted under `/static`.
#[derive(Debug, Deserialize, Clone)]
pub struct StaticConfig {
    pub dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SeedConfig {
    /// Insert the sample provider and workshops when the server starts.
    #[serde(default)]
    pub on_startup: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(rename = "static")]
    pub static_files: StaticConfig,
    #[serde(default)]
    pub seed: SeedConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("MERGINGTON_CONFIG").unwrap_or_else(|_| "config/config".to_string());

        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8000)?
            .set_default("database.url", "sqlite://./dev.db?mode=rwc")?
            .set_default("static.dir", "./static")?
            .add_source(File::with_name(&config_path).required(false))
            // Override from environment (e.g., MERGINGTON__DATABASE__URL)
            .add_source(Environment::with_prefix("MERGINGTON").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
