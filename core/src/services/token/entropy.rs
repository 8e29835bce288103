//! Secure random byte sources for token generation

use rand::{rngs::OsRng, RngCore};

use crate::errors::TokenError;

/// Supplier of cryptographically secure random bytes
pub trait EntropySource: Send + Sync {
    /// Fills `dest` entirely, or fails with `TokenError::RandomSourceUnavailable`
    fn fill(&self, dest: &mut [u8]) -> Result<(), TokenError>;
}

/// Operating system random generator
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&self, dest: &mut [u8]) -> Result<(), TokenError> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| TokenError::RandomSourceUnavailable {
                reason: e.to_string(),
            })
    }
}
