//! Server configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the remind server.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind (default `"127.0.0.1"`).
    pub host: String,
    /// Port to bind (default `8080`).
    pub port: u16,
    /// Path to the `SQLite` database file (default `"reminds.db"`).
    pub database_path: String,
    /// Maximum database connection pool size.
    pub db_pool_size: u32,
    /// Webhook URL for cancellation events. Events are dropped when unset.
    pub event_webhook_url: Option<String>,
    /// Default log filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8080,
            database_path: "reminds.db".into(),
            db_pool_size: 8,
            event_webhook_url: None,
            log_level: "info".into(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from the environment, falling back to defaults
    /// for anything unset. Unparseable numeric values also fall back.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env_or("SERVER_HOST", defaults.host),
            port: env_parse_or("SERVER_PORT", defaults.port),
            database_path: env_or("DATABASE_PATH", defaults.database_path),
            db_pool_size: env_parse_or("DB_POOL_SIZE", defaults.db_pool_size),
            event_webhook_url: std::env::var("EVENT_WEBHOOK_URL").ok().filter(|v| !v.is_empty()),
            log_level: env_or("LOG_LEVEL", defaults.log_level),
        }
    }

    /// The socket address string to bind.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn env_or(key: &str, default: String) -> String {
    std::env::var(key).ok().filter(|v| !v.is_empty()).unwrap_or(default)
}

fn env_parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
