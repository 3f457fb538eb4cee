//! Auth service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;

use crate::auth::{
    AuthServiceError, Identity, IssuedToken, TokenRegistry, credentials::CredentialsService,
};

/// Credential check in front of the token registry.
#[derive(Clone)]
pub struct SessionAuthService {
    credentials: Arc<dyn CredentialsService>,
    registry: Arc<TokenRegistry>,
}

impl std::fmt::Debug for SessionAuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionAuthService")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

impl SessionAuthService {
    #[must_use]
    pub fn new(credentials: Arc<dyn CredentialsService>, registry: Arc<TokenRegistry>) -> Self {
        Self {
            credentials,
            registry,
        }
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<TokenRegistry> {
        &self.registry
    }
}

#[async_trait]
impl AuthService for SessionAuthService {
    async fn login(&self, username: &str, password: &str) -> Result<IssuedToken, AuthServiceError> {
        let identity = self
            .credentials
            .validate_credentials(username, password)
            .await?
            .ok_or(AuthServiceError::InvalidCredentials)?;

        let issued = self.registry.issue(identity).await?;

        tracing::info!(username = %issued.session.identity, "login succeeded");

        Ok(issued)
    }

    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Identity, AuthServiceError> {
        self.registry
            .validate(bearer_token)
            .await
            .ok_or(AuthServiceError::NotFound)
    }

    async fn logout(&self, bearer_token: &str) -> Result<bool, AuthServiceError> {
        Ok(self.registry.revoke(bearer_token).await)
    }

    async fn active_sessions(&self) -> usize {
        self.registry.active_count().await
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Exchange a username and password for a bearer token.
    async fn login(&self, username: &str, password: &str) -> Result<IssuedToken, AuthServiceError>;

    /// Resolve a bearer token to the identity it was issued for.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Identity, AuthServiceError>;

    /// Revoke a bearer token. Returns whether it was live.
    async fn logout(&self, bearer_token: &str) -> Result<bool, AuthServiceError>;

    async fn active_sessions(&self) -> usize;
}
