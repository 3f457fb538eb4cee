//! Argon2-hashed credentials stored in `PostgreSQL`.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    auth::{
        CredentialsError, Identity,
        credentials::{CredentialsService, LookupOutcome},
        verify_password,
    },
    domain::users::PgUsersRepository,
};

#[derive(Debug, Clone)]
pub struct PgCredentials {
    repository: PgUsersRepository,
}

impl PgCredentials {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgUsersRepository::new(pool),
        }
    }
}

#[async_trait]
impl CredentialsService for PgCredentials {
    async fn validate_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<Identity>, CredentialsError> {
        let outcome = match self.repository.find_user_by_username(username).await? {
            None => LookupOutcome::UnknownUser,
            Some(user) if !user.is_active => LookupOutcome::InactiveUser,
            Some(user) => {
                if verify_password(password, &user.password_hash)? {
                    return Ok(Some(Identity::new(user.username, Some(user.id))));
                }

                LookupOutcome::PasswordMismatch
            }
        };

        outcome.log(username);

        Ok(None)
    }
}
