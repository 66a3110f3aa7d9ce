use dotenv::dotenv;
use once_cell::sync::Lazy;
use std::env;
use thiserror::Error;

pub const IN_MEMORY_DATABASE_URL: &str = "memory:";

const POSTGRES_SCHEMES: [&str; 2] = ["postgres://", "postgresql://"];

/// Store selected by `DATABASE_URL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    InMemory,
    Postgres,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unsupported DATABASE_URL scheme `{0}`, expected `memory:`, `postgres://` or `postgresql://`")]
    UnsupportedDatabaseUrl(String),
}

pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub database_max_connections: u32,
    pub log_level: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("database_url", &"<redacted>")
            .field("database_max_connections", &self.database_max_connections)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl Config {
    fn from_env() -> Self {
        dotenv().ok();

        Self {
            port: env::var("PORT").ok().and_then(|v| v.parse().ok()).unwrap_or(3000),
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| IN_MEMORY_DATABASE_URL.to_string()),
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        }
    }

    /// Resolves `database_url` to a store. Any other scheme is an error.
    pub fn backend(&self) -> Result<Backend, ConfigError> {
        let url = self.database_url.trim();
        if url == IN_MEMORY_DATABASE_URL {
            Ok(Backend::InMemory)
        } else if POSTGRES_SCHEMES.iter().any(|scheme| url.starts_with(scheme)) {
            Ok(Backend::Postgres)
        } else {
            // Only the scheme is reported; the rest may hold credentials.
            let scheme = url.split_once(':').map_or(url, |(scheme, _)| scheme);
            Err(ConfigError::UnsupportedDatabaseUrl(scheme.to_string()))
        }
    }
}

// Global static accessible everywhere
pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);
