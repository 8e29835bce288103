//! # Session token store
//!
//! In-memory, process-local session tokens:
//! - `store` - expiring key-value store with lazy expiry and optional sweeping
//! - `services` - token issuance, authentication promotion and payload storage
//! - `errors` - store and token error types
//!
//! ```no_run
//! use std::time::Duration;
//! use st_core::{TokenService, TokenServiceConfig};
//!
//! let service: TokenService<String> = TokenService::new(TokenServiceConfig::new(
//!     Duration::from_secs(15 * 60),
//!     Duration::from_secs(7 * 24 * 60 * 60),
//!     "seed-kept-outside-source-control",
//! ));
//!
//! let token = service.new_token()?;
//! service.set_token_as_authenticated(&token)?;
//! service.set_value(&token, "user-42".to_string())?;
//! # Ok::<(), st_core::TokenError>(())
//! ```

pub mod errors;
pub mod services;
pub mod store;

// Re-export commonly used types for convenience
pub use errors::{CoreError, CoreResult, StoreError, TokenError};
pub use services::{EntropySource, OsEntropy, TokenService, TokenServiceConfig};
pub use store::{CleanupResult, ExpiryCleanupConfig, ExpiryCleanupService, TimedStore};
