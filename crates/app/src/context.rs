//! App Context

use std::{path::PathBuf, sync::Arc};

use jiff::SignedDuration;
use sqlx::{PgPool, migrate::MigrateError};
use thiserror::Error;

use crate::{
    auth::{
        AuthService, CredentialsError, DEFAULT_TOKEN_TTL, SessionAuthService, TokenRegistry,
        credentials::{CredentialsService, PgCredentials, StaticCredentials},
    },
    clock::{Clock, SystemClock},
    database,
    domain::recipes::{JsonRecipesService, PgRecipesService, RecipesService, RecipesServiceError},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrate(#[source] MigrateError),

    #[error("a database URL is required when {0} uses postgres")]
    MissingDatabaseUrl(&'static str),

    #[error("failed to load credentials")]
    Credentials(#[source] CredentialsError),

    #[error("failed to open recipe store")]
    Recipes(#[source] RecipesServiceError),
}

/// Where usernames and passwords are checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsBackend {
    /// Plaintext YAML list. Demo use only.
    Static { users_file: PathBuf },

    /// Argon2 hashes in the `users` table.
    Postgres,
}

/// Where recipes are persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeBackend {
    Json { path: PathBuf },
    Postgres,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub run_migrations: bool,
}

/// Everything needed to assemble an [`AppContext`].
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub credentials: CredentialsBackend,
    pub recipes: RecipeBackend,
    pub token_ttl: SignedDuration,
    pub database: Option<DatabaseSettings>,
}

impl AppSettings {
    fn needs_database(&self) -> Option<&'static str> {
        if self.credentials == CredentialsBackend::Postgres {
            return Some("credentials");
        }

        if self.recipes == RecipeBackend::Postgres {
            return Some("the recipe store");
        }

        None
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            credentials: CredentialsBackend::Static {
                users_file: PathBuf::from("config/users.yaml"),
            },
            recipes: RecipeBackend::Json {
                path: PathBuf::from("data/recipes.json"),
            },
            token_ttl: DEFAULT_TOKEN_TTL,
            database: None,
        }
    }
}

#[derive(Clone)]
pub struct AppContext {
    pub auth: Arc<dyn AuthService>,
    pub recipes: Arc<dyn RecipesService>,
    pub registry: Arc<TokenRegistry>,
    pub pool: Option<PgPool>,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("registry", &self.registry)
            .field("pool", &self.pool)
            .finish_non_exhaustive()
    }
}

impl AppContext {
    /// Build application context from settings.
    ///
    /// The credentials backend and the recipe backend are chosen independently.
    ///
    /// # Errors
    ///
    /// Returns an error when a required database URL is missing, the database is
    /// unreachable, migrations fail, or a file-backed source cannot be opened.
    pub async fn build(settings: AppSettings) -> Result<Self, AppInitError> {
        let pool = match (settings.needs_database(), &settings.database) {
            (Some(reason), None) => return Err(AppInitError::MissingDatabaseUrl(reason)),
            (_, Some(db)) => Some(connect(db).await?),
            (None, None) => None,
        };

        Self::build_with(settings, pool, Arc::new(SystemClock)).await
    }

    /// Build from an already open pool and an explicit clock.
    ///
    /// # Errors
    ///
    /// Returns an error when a required pool is missing or a file-backed source cannot be opened.
    pub async fn build_with(
        settings: AppSettings,
        pool: Option<PgPool>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, AppInitError> {
        let credentials: Arc<dyn CredentialsService> = match &settings.credentials {
            CredentialsBackend::Static { users_file } => Arc::new(
                StaticCredentials::from_file(users_file).map_err(AppInitError::Credentials)?,
            ),
            CredentialsBackend::Postgres => Arc::new(PgCredentials::new(
                pool.clone()
                    .ok_or(AppInitError::MissingDatabaseUrl("credentials"))?,
            )),
        };

        let recipes: Arc<dyn RecipesService> = match &settings.recipes {
            RecipeBackend::Json { path } => Arc::new(
                JsonRecipesService::new(path.clone(), clock.clone())
                    .await
                    .map_err(AppInitError::Recipes)?,
            ),
            RecipeBackend::Postgres => Arc::new(PgRecipesService::new(
                pool.clone()
                    .ok_or(AppInitError::MissingDatabaseUrl("the recipe store"))?,
            )),
        };

        let registry = Arc::new(TokenRegistry::new(settings.token_ttl, clock));

        tracing::info!(
            credentials = ?settings.credentials,
            recipes = ?settings.recipes,
            token_ttl = %settings.token_ttl,
            "application context ready"
        );

        Ok(Self {
            auth: Arc::new(SessionAuthService::new(credentials, registry.clone())),
            recipes,
            registry,
            pool,
        })
    }
}

async fn connect(settings: &DatabaseSettings) -> Result<PgPool, AppInitError> {
    let pool = database::connect_with(&settings.url, settings.max_connections)
        .await
        .map_err(AppInitError::Database)?;

    if settings.run_migrations {
        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migrate)?;

        tracing::info!("database migrations applied");
    }

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use testresult::TestResult;

    use crate::auth::AuthServiceError;

    use super::*;

    #[tokio::test]
    async fn postgres_selection_without_url_is_rejected() {
        let settings = AppSettings {
            recipes: RecipeBackend::Postgres,
            ..AppSettings::default()
        };

        let result = AppContext::build(settings).await;

        assert!(
            matches!(result, Err(AppInitError::MissingDatabaseUrl(_))),
            "expected MissingDatabaseUrl, got {result:?}"
        );
    }

    #[tokio::test]
    async fn missing_users_file_is_a_credentials_error() -> TestResult {
        let dir = TempDir::new()?;

        let settings = AppSettings {
            credentials: CredentialsBackend::Static {
                users_file: dir.path().join("absent.yaml"),
            },
            recipes: RecipeBackend::Json {
                path: dir.path().join("recipes.json"),
            },
            ..AppSettings::default()
        };

        let result = AppContext::build(settings).await;

        assert!(
            matches!(result, Err(AppInitError::Credentials(_))),
            "expected Credentials, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn file_backed_context_logs_in_and_stores_recipes() -> TestResult {
        let dir = TempDir::new()?;
        let users_file = dir.path().join("users.yaml");

        std::fs::write(&users_file, "users:\n  - username: chef\n    password: secret\n")?;

        let ctx = AppContext::build(AppSettings {
            credentials: CredentialsBackend::Static { users_file },
            recipes: RecipeBackend::Json {
                path: dir.path().join("data/recipes.json"),
            },
            ..AppSettings::default()
        })
        .await?;

        let issued = ctx.auth.login("chef", "secret").await?;
        let identity = ctx.auth.authenticate_bearer(&issued.token).await?;

        assert_eq!(identity.username, "chef");
        assert!(ctx.pool.is_none());
        assert!(ctx.recipes.list_recipes().await?.is_empty());

        let wrong = ctx.auth.login("chef", "nope").await;
        assert!(matches!(wrong, Err(AuthServiceError::InvalidCredentials)));

        Ok(())
    }
}
