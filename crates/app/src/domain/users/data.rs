//! Users Data

use crate::domain::users::records::UserId;

/// New User Data
///
/// `password` is plaintext here; it is hashed before it reaches storage.
#[derive(Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
    pub is_active: bool,
    pub created_by: Option<UserId>,
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("password", &"**redacted**")
            .field("email", &self.email)
            .field("is_active", &self.is_active)
            .field("created_by", &self.created_by)
            .finish()
    }
}

/// User Update Data
#[derive(Debug, Clone, PartialEq)]
pub struct UserUpdate {
    pub username: String,
    pub email: Option<String>,
    pub is_active: bool,
    pub updated_by: Option<UserId>,
}
