//! Auth Config

use std::{path::PathBuf, time::Duration};

use clap::Args;
use jiff::SignedDuration;
use pantry_app::context::CredentialsBackend;

/// Where logins are checked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum CredentialsMode {
    /// Plaintext YAML users file. Not for production.
    Static,

    /// Argon2 hashes in `PostgreSQL`.
    Postgres,
}

/// Credential and session settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Credential source (static, postgres)
    #[arg(long, env = "CREDENTIALS_MODE", value_enum, default_value_t = CredentialsMode::Static)]
    pub credentials_mode: CredentialsMode,

    /// YAML users file for the static credential source
    #[arg(long, env = "USERS_FILE", default_value = "config/users.yaml")]
    pub users_file: PathBuf,

    /// Bearer token lifetime in hours
    #[arg(
        long,
        env = "TOKEN_TTL_HOURS",
        default_value_t = 24,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub token_ttl_hours: u32,

    /// Seconds between expired session sweeps
    #[arg(
        long,
        env = "SESSION_SWEEP_INTERVAL_SECONDS",
        default_value_t = 3_600,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub session_sweep_interval_seconds: u64,
}

impl AuthConfig {
    #[must_use]
    pub fn token_ttl(&self) -> SignedDuration {
        SignedDuration::from_hours(i64::from(self.token_ttl_hours))
    }

    #[must_use]
    pub const fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.session_sweep_interval_seconds)
    }

    #[must_use]
    pub fn credentials_backend(&self) -> CredentialsBackend {
        match self.credentials_mode {
            CredentialsMode::Static => CredentialsBackend::Static {
                users_file: self.users_file.clone(),
            },
            CredentialsMode::Postgres => CredentialsBackend::Postgres,
        }
    }
}
