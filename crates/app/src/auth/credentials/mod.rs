//! Username/password verification.

use async_trait::async_trait;
use mockall::automock;

use crate::auth::{CredentialsError, Identity};

mod postgres;
mod static_list;

pub use postgres::PgCredentials;
pub use static_list::{StaticCredentials, StaticUser};

/// Why a credential check failed. Never leaves this module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LookupOutcome {
    UnknownUser,
    InactiveUser,
    PasswordMismatch,
}

impl LookupOutcome {
    fn log(self, username: &str) {
        tracing::debug!(username, outcome = ?self, "credential check rejected");
    }
}

#[automock]
#[async_trait]
/// Answers whether a username/password pair identifies a usable account.
pub trait CredentialsService: Send + Sync {
    /// Returns the matching identity, or `None` for any credential failure.
    ///
    /// Unknown users, inactive users and wrong passwords are indistinguishable to callers.
    async fn validate_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<Identity>, CredentialsError>;
}
