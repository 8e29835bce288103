//! Token service module for session token management
//!
//! This module handles all token-related operations including:
//! - Chained HMAC-SHA256 token generation from a rolling salt
//! - Unauthenticated and authenticated session lifetimes
//! - Per-token payload storage and token revocation

mod config;
mod entropy;
mod generator;
mod service;

#[cfg(test)]
mod tests;

pub use config::TokenServiceConfig;
pub use entropy::{EntropySource, OsEntropy};
pub use generator::{TokenGenerator, RANDOM_BLOCK_SIZE, TOKEN_BYTES};
pub use service::TokenService;
