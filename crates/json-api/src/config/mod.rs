//! Server configuration module

use clap::Parser;
use pantry_app::context::{AppSettings, DatabaseSettings};

use crate::config::{
    auth::AuthConfig,
    db::DatabaseConfig,
    observability::LoggingConfig,
    server::ServerRuntimeConfig,
    storage::StorageConfig,
};

pub(crate) mod auth;
pub(crate) mod db;
pub(crate) mod observability;
pub(crate) mod server;
pub(crate) mod storage;

pub(crate) use observability::LogFormat;

/// Pantry JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "pantry-json", about = "Pantry JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Credential and session settings.
    #[command(flatten)]
    pub auth: AuthConfig,

    /// Recipe storage settings.
    #[command(flatten)]
    pub storage: StorageConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }

    /// Settings used to assemble the application context.
    #[must_use]
    pub fn app_settings(&self) -> AppSettings {
        AppSettings {
            credentials: self.auth.credentials_backend(),
            recipes: self.storage.recipe_backend(),
            token_ttl: self.auth.token_ttl(),
            database: self
                .database
                .database_url
                .as_ref()
                .map(|url| DatabaseSettings {
                    url: url.clone(),
                    max_connections: self.database.max_connections,
                    run_migrations: self.database.run_migrations,
                }),
        }
    }
}
