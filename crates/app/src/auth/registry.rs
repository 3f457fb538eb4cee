//! In-process bearer token registry.

use std::{collections::HashMap, fmt, sync::Arc};

use jiff::SignedDuration;
use tokio::sync::RwLock;

use crate::{
    auth::{Identity, IssuedToken, Session, TokenError, generate_token_secret, is_well_formed},
    clock::Clock,
};

/// Default token lifetime.
pub const DEFAULT_TOKEN_TTL: SignedDuration = SignedDuration::from_hours(24);

/// Owns every live session of the process.
///
/// Validity is registry membership plus `now < expires_at`. Nothing is persisted,
/// so a restart logs every client out.
pub struct TokenRegistry {
    sessions: RwLock<HashMap<String, Session>>,
    ttl: SignedDuration,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for TokenRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenRegistry")
            .field("ttl", &self.ttl)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

impl TokenRegistry {
    #[must_use]
    pub fn new(ttl: SignedDuration, clock: Arc<dyn Clock>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    #[must_use]
    pub const fn ttl(&self) -> SignedDuration {
        self.ttl
    }

    /// Issue a new token bound to `identity`.
    ///
    /// # Errors
    ///
    /// Returns an error if the random source fails or the expiry is out of range.
    pub async fn issue(&self, identity: Identity) -> Result<IssuedToken, TokenError> {
        let token = generate_token_secret()?.to_token();

        let created_at = self.clock.now();
        let expires_at = created_at
            .checked_add(self.ttl)
            .map_err(TokenError::ExpiryOverflow)?;

        let session = Session {
            identity,
            created_at,
            expires_at,
        };

        self.sessions
            .write()
            .await
            .insert(token.clone(), session.clone());

        tracing::debug!(username = %session.identity, %expires_at, "session issued");

        Ok(IssuedToken { token, session })
    }

    /// Resolve `token` to its identity, or `None` if it is unknown or expired.
    ///
    /// An expired entry found here is removed before returning.
    pub async fn validate(&self, token: &str) -> Option<Identity> {
        if !is_well_formed(token) {
            return None;
        }

        let now = self.clock.now();

        let expired = {
            let sessions = self.sessions.read().await;
            let session = sessions.get(token)?;

            if session.is_valid_at(now) {
                return Some(session.identity.clone());
            }

            session.clone()
        };

        let mut sessions = self.sessions.write().await;

        if sessions.get(token) == Some(&expired) {
            sessions.remove(token);
            tracing::debug!(username = %expired.identity, "expired session removed");
        }

        None
    }

    /// Remove `token`. Returns whether it was present.
    pub async fn revoke(&self, token: &str) -> bool {
        let removed = self.sessions.write().await.remove(token);

        if let Some(session) = &removed {
            tracing::debug!(username = %session.identity, "session revoked");
        }

        removed.is_some()
    }

    /// Remove every session whose window has passed. Returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut sessions = self.sessions.write().await;

        let before = sessions.len();
        sessions.retain(|_, session| session.is_valid_at(now));

        before - sessions.len()
    }

    /// Number of sessions currently held, including expired ones not yet purged.
    pub async fn active_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
