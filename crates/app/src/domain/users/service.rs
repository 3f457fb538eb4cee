//! Users service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;

use crate::{
    auth::PasswordHasherConfig,
    domain::users::{
        data::{NewUser, UserUpdate},
        errors::UsersServiceError,
        records::{UserId, UserRecord},
        repository::PgUsersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    repository: PgUsersRepository,
    hasher: PasswordHasherConfig,
}

impl PgUsersService {
    #[must_use]
    pub fn new(pool: PgPool, hasher: PasswordHasherConfig) -> Self {
        Self {
            repository: PgUsersRepository::new(pool),
            hasher,
        }
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError> {
        if user.username.trim().is_empty() || user.password.is_empty() {
            return Err(UsersServiceError::InvalidData);
        }

        let password_hash = self.hasher.hash_password(&user.password)?;

        let created = self
            .repository
            .create_user(
                &user.username,
                &password_hash,
                user.email.as_deref(),
                user.is_active,
                user.created_by,
            )
            .await?;

        tracing::info!(user_id = %created.id, username = %created.username, "user created");

        Ok(created)
    }

    async fn get_user_by_username(&self, username: &str) -> Result<UserRecord, UsersServiceError> {
        self.repository
            .find_user_by_username(username)
            .await?
            .filter(|user| user.is_active)
            .ok_or(UsersServiceError::NotFound)
    }

    async fn get_user_by_id(&self, id: UserId) -> Result<UserRecord, UsersServiceError> {
        self.repository
            .find_active_user_by_id(id)
            .await?
            .ok_or(UsersServiceError::NotFound)
    }

    async fn update_user(
        &self,
        id: UserId,
        update: UserUpdate,
    ) -> Result<UserRecord, UsersServiceError> {
        if update.username.trim().is_empty() {
            return Err(UsersServiceError::InvalidData);
        }

        self.repository
            .update_user(
                id,
                &update.username,
                update.email.as_deref(),
                update.is_active,
                update.updated_by,
            )
            .await
            .map_err(Into::into)
    }

    async fn deactivate_user(
        &self,
        id: UserId,
        updated_by: Option<UserId>,
    ) -> Result<(), UsersServiceError> {
        let rows_affected = self.repository.deactivate_user(id, updated_by).await?;

        if rows_affected == 0 {
            return Err(UsersServiceError::NotFound);
        }

        tracing::info!(user_id = %id, "user deactivated");

        Ok(())
    }

    async fn update_password(
        &self,
        id: UserId,
        new_password: &str,
        updated_by: Option<UserId>,
    ) -> Result<(), UsersServiceError> {
        if new_password.is_empty() {
            return Err(UsersServiceError::InvalidData);
        }

        let password_hash = self.hasher.hash_password(new_password)?;

        let rows_affected = self
            .repository
            .update_password(id, &password_hash, updated_by)
            .await?;

        if rows_affected == 0 {
            return Err(UsersServiceError::NotFound);
        }

        Ok(())
    }
}

#[automock]
#[async_trait]
/// Relational user account management.
pub trait UsersService: Send + Sync {
    /// Creates an account, hashing the supplied password.
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError>;

    /// Retrieves an active account by username.
    async fn get_user_by_username(&self, username: &str) -> Result<UserRecord, UsersServiceError>;

    /// Retrieves an active account by id.
    async fn get_user_by_id(&self, id: UserId) -> Result<UserRecord, UsersServiceError>;

    /// Updates the profile fields of an account.
    async fn update_user(
        &self,
        id: UserId,
        update: UserUpdate,
    ) -> Result<UserRecord, UsersServiceError>;

    /// Soft-deletes an account.
    async fn deactivate_user(
        &self,
        id: UserId,
        updated_by: Option<UserId>,
    ) -> Result<(), UsersServiceError>;

    /// Replaces the password of an active account.
    async fn update_password(
        &self,
        id: UserId,
        new_password: &str,
        updated_by: Option<UserId>,
    ) -> Result<(), UsersServiceError>;
}
