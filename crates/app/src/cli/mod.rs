use clap::{Parser, Subcommand};
use pantry_app::{auth::PasswordHasherConfig, database};
use sqlx::PgPool;

mod db;
mod user;

#[derive(Debug, Parser)]
#[command(name = "pantry-app", about = "Pantry administration CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Manage accounts used by the postgres credentials mode
    User(user::UserCommand),

    /// Database maintenance
    Db(db::DbCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::User(command) => user::run(command).await,
            Commands::Db(command) => db::run(command).await,
        }
    }
}

#[derive(Debug, clap::Args)]
pub(crate) struct DatabaseArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

impl DatabaseArgs {
    pub(crate) async fn connect(&self) -> Result<PgPool, String> {
        database::connect(&self.database_url)
            .await
            .map_err(|error| format!("failed to connect to database: {error}"))
    }
}

#[derive(Debug, clap::Args)]
pub(crate) struct HasherArgs {
    /// Argon2 memory cost in KiB
    #[arg(long, env = "PASSWORD_HASH_MEMORY_KIB", default_value_t = PasswordHasherConfig::default().memory_kib)]
    hash_memory_kib: u32,

    /// Argon2 iterations
    #[arg(long, env = "PASSWORD_HASH_ITERATIONS", default_value_t = PasswordHasherConfig::default().iterations)]
    hash_iterations: u32,

    /// Argon2 parallelism
    #[arg(long, env = "PASSWORD_HASH_PARALLELISM", default_value_t = PasswordHasherConfig::default().parallelism)]
    hash_parallelism: u32,
}

impl HasherArgs {
    pub(crate) fn config(&self) -> PasswordHasherConfig {
        PasswordHasherConfig {
            memory_kib: self.hash_memory_kib,
            iterations: self.hash_iterations,
            parallelism: self.hash_parallelism,
        }
    }
}
