//! Bearer token generation and formatting.

use std::fmt;

use rand::{RngCore, rngs::OsRng};
use zeroize::Zeroize;

use crate::auth::TokenError;

/// Number of secret bytes encoded in a token.
pub const TOKEN_SECRET_BYTES: usize = 32;

/// Length of a formatted token.
pub const TOKEN_HEX_CHARS: usize = TOKEN_SECRET_BYTES * 2;

#[derive(Clone)]
pub struct TokenSecret {
    bytes: [u8; TOKEN_SECRET_BYTES],
}

impl TokenSecret {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; TOKEN_SECRET_BYTES]) -> Self {
        Self { bytes }
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; TOKEN_SECRET_BYTES] {
        &self.bytes
    }

    /// Lowercase hex rendering used as the bearer token.
    #[must_use]
    pub fn to_token(&self) -> String {
        self.bytes
            .iter()
            .fold(String::with_capacity(TOKEN_HEX_CHARS), |mut encoded, byte| {
                encoded.push_str(&format!("{byte:02x}"));
                encoded
            })
    }
}

impl fmt::Debug for TokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TokenSecret(**redacted**)")?;
        Ok(())
    }
}

impl Drop for TokenSecret {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

/// Draw a fresh secret from the operating system CSPRNG.
///
/// # Errors
///
/// Returns an error if the random source is unavailable.
pub fn generate_token_secret() -> Result<TokenSecret, TokenError> {
    let mut secret = [0_u8; TOKEN_SECRET_BYTES];

    OsRng
        .try_fill_bytes(&mut secret)
        .map_err(TokenError::RandomSource)?;

    let token_secret = TokenSecret::from_bytes(secret);

    secret.zeroize();

    Ok(token_secret)
}

/// Whether `token` has the shape of an issued token.
///
/// Lets callers reject garbage before taking the registry lock.
#[must_use]
pub fn is_well_formed(token: &str) -> bool {
    token.len() == TOKEN_HEX_CHARS
        && token
            .bytes()
            .all(|byte| matches!(byte, b'0'..=b'9' | b'a'..=b'f'))
}
