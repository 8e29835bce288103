//! Business services built on top of the expiring store.

pub mod token;

// Re-export commonly used types
pub use token::{EntropySource, OsEntropy, TokenService, TokenServiceConfig};
