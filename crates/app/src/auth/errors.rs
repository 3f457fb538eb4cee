//! Auth errors.

use thiserror::Error;

use crate::auth::PasswordError;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("random source unavailable")]
    RandomSource(#[source] rand::Error),

    #[error("token lifetime overflows the timestamp range")]
    ExpiryOverflow(#[source] jiff::Error),
}

#[derive(Debug, Error)]
pub enum CredentialsError {
    #[error("credential storage error")]
    Storage(#[from] sqlx::Error),

    #[error("stored credential could not be checked")]
    Password(#[from] PasswordError),

    #[error("failed to read users file")]
    UsersFileIo(#[source] std::io::Error),

    #[error("failed to parse users file")]
    UsersFileFormat(#[source] serde_norway::Error),

    #[error("users file lists {0:?} more than once")]
    DuplicateUser(String),
}

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("token not found")]
    NotFound,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("credential check failed")]
    Credentials(#[from] CredentialsError),

    #[error("token issuance failed")]
    Token(#[from] TokenError),
}
