//! Configuration for the token service

use std::fmt;
use std::time::Duration;

use st_shared::config::session::DEFAULT_SEED_SECRET;
use st_shared::SessionConfig;

/// Configuration for the token service
#[derive(Clone)]
pub struct TokenServiceConfig {
    /// Lifetime of a freshly issued, unauthenticated token
    pub no_auth_duration: Duration,
    /// Lifetime applied once the session is authenticated
    pub auth_duration: Duration,
    /// Seed hashed into the initial salt
    pub seed_secret: String,
}

impl TokenServiceConfig {
    /// Create a configuration from explicit lifetimes and seed
    pub fn new(
        no_auth_duration: Duration,
        auth_duration: Duration,
        seed_secret: impl Into<String>,
    ) -> Self {
        Self {
            no_auth_duration,
            auth_duration,
            seed_secret: seed_secret.into(),
        }
    }

    /// Check if using default seed (security warning)
    pub fn is_using_default_seed(&self) -> bool {
        self.seed_secret == DEFAULT_SEED_SECRET
    }
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self::from(&SessionConfig::default())
    }
}

impl From<&SessionConfig> for TokenServiceConfig {
    fn from(config: &SessionConfig) -> Self {
        Self {
            no_auth_duration: config.no_auth_duration(),
            auth_duration: config.auth_duration(),
            seed_secret: config.seed_secret.clone(),
        }
    }
}

// The seed never shows up in logs.
impl fmt::Debug for TokenServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenServiceConfig")
            .field("no_auth_duration", &self.no_auth_duration)
            .field("auth_duration", &self.auth_duration)
            .field("seed_secret", &"[redacted]")
            .finish()
    }
}
