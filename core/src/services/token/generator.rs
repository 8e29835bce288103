//! Chained HMAC-SHA256 token generation
//!
//! Each token is the HMAC of fresh random input keyed with a rolling salt.
//! The digest is both the token and the next salt, so recovering the current
//! salt does not expose earlier tokens without their random input.

use std::fmt;

use base64::{engine::general_purpose::URL_SAFE, Engine};
use chrono::{DateTime, SecondsFormat, Timelike, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use crate::errors::TokenError;

use super::entropy::EntropySource;

type HmacSha256 = Hmac<Sha256>;

/// Size of the random block that carries the token's entropy
pub const RANDOM_BLOCK_SIZE: usize = 128;

/// Length of the digest, and so of the decoded token
pub const TOKEN_BYTES: usize = 32;

/// Produces unpredictable tokens from a rolling salt
pub struct TokenGenerator {
    salt: [u8; TOKEN_BYTES],
    entropy: Box<dyn EntropySource>,
}

impl TokenGenerator {
    /// Creates a generator whose first salt is `SHA-256(seed_secret)`
    pub fn new(seed_secret: &str, entropy: Box<dyn EntropySource>) -> Self {
        Self {
            salt: Sha256::digest(seed_secret.as_bytes()).into(),
            entropy,
        }
    }

    /// Generates the next token and advances the salt.
    ///
    /// The MAC is fed, in order:
    /// 1. `RANDOM_BLOCK_SIZE` secure random bytes
    /// 2. `second_of_minute / 2` further random bytes
    /// 3. the current timestamp as RFC 3339 text with nanoseconds
    ///
    /// The salt is left untouched when the entropy source fails.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - URL-safe base64 of the 256-bit digest
    /// * `Err(TokenError::RandomSourceUnavailable)` - no secure bytes available
    pub fn next_token(&mut self) -> Result<String, TokenError> {
        self.next_token_at(Utc::now())
    }

    /// Generates the next token using `now` as the timestamp input
    pub(crate) fn next_token_at(&mut self, now: DateTime<Utc>) -> Result<String, TokenError> {
        let mut block = [0u8; RANDOM_BLOCK_SIZE];
        self.entropy.fill(&mut block)?;

        let mut mixing = vec![0u8; (now.second() / 2) as usize];
        self.entropy.fill(&mut mixing)?;

        // HMAC takes keys of any length; the error arm cannot be reached.
        let mut mac = HmacSha256::new_from_slice(&self.salt)
            .unwrap_or_else(|_| unreachable!("HMAC accepts keys of any length"));
        mac.update(&block);
        mac.update(&mixing);
        mac.update(now.to_rfc3339_opts(SecondsFormat::Nanos, true).as_bytes());

        let digest: [u8; TOKEN_BYTES] = mac.finalize().into_bytes().into();
        self.salt = digest;

        Ok(URL_SAFE.encode(digest))
    }

    #[cfg(test)]
    pub(crate) fn salt(&self) -> &[u8; TOKEN_BYTES] {
        &self.salt
    }
}

impl fmt::Debug for TokenGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenGenerator")
            .field("salt", &"[redacted]")
            .finish_non_exhaustive()
    }
}
