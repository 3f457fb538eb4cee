//! Database Config

use clap::Args;

/// Database settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection string. Required when any backend is postgres.
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Maximum pooled connections
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = 25)]
    pub max_connections: u32,

    /// Apply pending migrations at startup
    #[arg(long, env = "RUN_MIGRATIONS", default_value_t = true)]
    pub run_migrations: bool,
}
