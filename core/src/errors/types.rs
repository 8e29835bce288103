//! Error types for the expiring store and the token service

use thiserror::Error;

/// Errors raised by the expiring store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Key already exists and has not expired: {key}")]
    DuplicateKey { key: String },

    #[error("Key not found or expired: {key}")]
    NotFound { key: String },
}

/// Errors surfaced to callers addressing a session by token.
///
/// `InvalidOrExpiredToken` deliberately covers both unknown and expired
/// tokens, and never echoes the token value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("The requested token is invalid or is expired")]
    InvalidOrExpiredToken,

    /// Non-recoverable: the secure random generator could not supply bytes.
    /// There is no fallback to a weaker generator.
    #[error("Secure random generator unavailable: {reason}")]
    RandomSourceUnavailable { reason: String },
}

impl TokenError {
    /// Stable error code for programmatic handling
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::InvalidOrExpiredToken => "INVALID_OR_EXPIRED_TOKEN",
            TokenError::RandomSourceUnavailable { .. } => "RANDOM_SOURCE_UNAVAILABLE",
        }
    }

    /// Whether the error signals a fault the process should not try to recover from
    pub fn is_fatal(&self) -> bool {
        matches!(self, TokenError::RandomSourceUnavailable { .. })
    }
}

impl From<StoreError> for TokenError {
    fn from(_: StoreError) -> Self {
        TokenError::InvalidOrExpiredToken
    }
}
