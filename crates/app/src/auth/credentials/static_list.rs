//! Plaintext users loaded from a YAML file. Demo use only.

use std::{collections::HashMap, fmt, path::Path};

use async_trait::async_trait;
use serde::Deserialize;

use crate::auth::{
    CredentialsError, Identity,
    credentials::{CredentialsService, LookupOutcome},
};

#[derive(Clone, Deserialize)]
pub struct StaticUser {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for StaticUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticUser")
            .field("username", &self.username)
            .field("password", &"**redacted**")
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct UsersFile {
    #[serde(default)]
    users: Vec<StaticUser>,
}

/// Exact plaintext comparison against a fixed user list.
///
/// There is no deactivation in this mode; remove a user from the file and restart.
pub struct StaticCredentials {
    users: HashMap<String, String>,
}

impl fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("users", &self.users.len())
            .finish()
    }
}

impl StaticCredentials {
    /// Build from an explicit list.
    ///
    /// # Errors
    ///
    /// Returns an error if a username appears twice.
    pub fn new(users: Vec<StaticUser>) -> Result<Self, CredentialsError> {
        let mut by_name = HashMap::with_capacity(users.len());

        for user in users {
            if by_name.contains_key(&user.username) {
                return Err(CredentialsError::DuplicateUser(user.username));
            }

            by_name.insert(user.username, user.password);
        }

        tracing::warn!(
            users = by_name.len(),
            "static credentials mode compares plaintext passwords and is not for production"
        );

        Ok(Self { users: by_name })
    }

    /// Parse a `users: [{username, password}]` YAML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed or lists a username twice.
    pub fn from_yaml(document: &str) -> Result<Self, CredentialsError> {
        let file: UsersFile =
            serde_norway::from_str(document).map_err(CredentialsError::UsersFileFormat)?;

        Self::new(file.users)
    }

    /// Load the users file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CredentialsError> {
        let document =
            std::fs::read_to_string(path.as_ref()).map_err(CredentialsError::UsersFileIo)?;

        Self::from_yaml(&document)
    }
}

#[async_trait]
impl CredentialsService for StaticCredentials {
    async fn validate_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<Identity>, CredentialsError> {
        let outcome = match self.users.get(username) {
            None => LookupOutcome::UnknownUser,
            Some(expected) if expected == password => {
                return Ok(Some(Identity::new(username, None)));
            }
            Some(_) => LookupOutcome::PasswordMismatch,
        };

        outcome.log(username);

        Ok(None)
    }
}
